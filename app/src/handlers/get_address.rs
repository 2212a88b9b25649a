//! GET_ADDRESS (0x02): address of an account.
//!
//! Data is the big-endian account index. With P1 = 0x01 the address is shown
//! on the device before it is returned.

use common::constants::ACCOUNT_INDEX_LEN;
use common::Error;
use log::{debug, warn};

use crate::address::Address;
use crate::comm::ResponseBuffer;
use crate::crypto::{Ed25519Backend, KeyService};
use crate::utils::read_u32_be;
use crate::ux::Ux;

/// Handles GET_ADDRESS. Appends the address text, without terminator.
pub fn handle_get_address<B: Ed25519Backend, U: Ux>(
    keys: &mut KeyService<B>,
    ux: &mut U,
    confirm: bool,
    data: &[u8],
    response: &mut ResponseBuffer,
) -> Result<(), Error> {
    if data.len() != ACCOUNT_INDEX_LEN {
        return Err(Error::InvalidDataLength);
    }
    let account = read_u32_be(data).ok_or(Error::InvalidDataLength)?;

    let public_key = keys.public_key(account)?;
    let address = Address::from_public_key(&public_key)?;
    debug!("Address of account {}: {}", account, address.as_str());

    if confirm && !ux.confirm_address(address.as_str()) {
        warn!("Address rejected");
        return Err(Error::RejectedByUser);
    }

    response.append(address.as_bytes())
}
