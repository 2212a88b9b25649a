//! SIGN_TRANSACTION (0x04): sign a spend transaction.
//!
//! Data is the big-endian account index followed by the serialized
//! transaction. The signature covers the transaction bytes exactly as
//! received.
//!
//! # Security Model
//!
//! - Recipient, amount and fee are extracted on the device and shown to the user
//! - No key is derived before the user approves
//! - Only spend transactions are accepted

use common::constants::{ACCOUNT_INDEX_LEN, MAX_TX_LEN};
use common::Error;
use log::{debug, warn};

use crate::comm::ResponseBuffer;
use crate::crypto::{Ed25519Backend, KeyService};
use crate::parsing::TransactionParser;
use crate::utils::read_u32_be;
use crate::ux::{TxReview, Ux};

/// Handles SIGN_TRANSACTION. Appends the 64-byte signature.
///
/// # Returns
/// - `Error::InvalidDataLength` if no transaction follows the account index
/// - `Error::InvalidRlpLength`, `Error::WrongTransactionType` or
///   `Error::WrongAddressPrefix` if the transaction cannot be parsed
/// - `Error::RejectedByUser` if the user declines
pub fn handle_sign_transaction<B: Ed25519Backend, U: Ux>(
    keys: &mut KeyService<B>,
    ux: &mut U,
    data: &[u8],
    response: &mut ResponseBuffer,
) -> Result<(), Error> {
    if data.len() <= ACCOUNT_INDEX_LEN {
        return Err(Error::InvalidDataLength);
    }
    let (account, tx) = data.split_at(ACCOUNT_INDEX_LEN);
    if tx.len() > MAX_TX_LEN {
        return Err(Error::InvalidDataLength);
    }
    let account = read_u32_be(account).ok_or(Error::InvalidDataLength)?;

    let parsed = TransactionParser::parse(tx)?;
    debug!(
        "Spend of {} to {}, fee {}",
        parsed.amount.as_str(),
        parsed.recipient.as_str(),
        parsed.fee.as_str()
    );

    let review = TxReview {
        recipient: parsed.recipient.as_str(),
        amount: parsed.amount.as_str(),
        fee: parsed.fee.as_str(),
    };
    if !ux.confirm_transaction(&review) {
        warn!("Transaction rejected");
        return Err(Error::RejectedByUser);
    }

    let signature = keys.sign(account, tx)?;
    response.append(signature.as_bytes())
}
