//! Account address encoding.
//!
//! Address = "ak_" || base58(pubkey || sha256(sha256(pubkey))[..4])

use common::constants::{
    ADDRESS_BODY_MAX_LEN, ADDRESS_BUFFER_LEN, ADDRESS_PAYLOAD_LEN, ADDRESS_PREFIX, CHECKSUM_LEN,
    PUBLIC_KEY_LEN,
};
use sha2::{Digest, Sha256};

use crate::base58::{self, Base58Error};

/// Writes the NUL-terminated address of `public_key` into `out`.
///
/// Returns the length of the address text, without the terminator. On error
/// nothing is written to `out`.
pub fn encode_address(
    public_key: &[u8; PUBLIC_KEY_LEN],
    out: &mut [u8],
) -> Result<usize, Base58Error> {
    let prefix_len = ADDRESS_PREFIX.len();
    if out.len() < prefix_len + 1 {
        return Err(Base58Error::Overflow);
    }

    let mut payload = [0u8; ADDRESS_PAYLOAD_LEN];
    payload[..PUBLIC_KEY_LEN].copy_from_slice(public_key);
    let checksum = Sha256::digest(Sha256::digest(public_key));
    payload[PUBLIC_KEY_LEN..].copy_from_slice(&checksum[..CHECKSUM_LEN]);

    // keep one byte for the terminator
    let body_capacity = (out.len() - prefix_len - 1).min(ADDRESS_BODY_MAX_LEN);
    let body_len = base58::encode(&payload, &mut out[prefix_len..prefix_len + body_capacity])?;

    out[..prefix_len].copy_from_slice(ADDRESS_PREFIX);
    out[prefix_len + body_len] = 0;
    Ok(prefix_len + body_len)
}

/// An encoded account address in a fixed-size buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Address {
    buf: [u8; ADDRESS_BUFFER_LEN],
    len: usize,
}

impl Address {
    /// Encodes the address of `public_key`.
    pub fn from_public_key(public_key: &[u8; PUBLIC_KEY_LEN]) -> Result<Self, Base58Error> {
        let mut buf = [0u8; ADDRESS_BUFFER_LEN];
        let len = encode_address(public_key, &mut buf)?;
        Ok(Self { buf, len })
    }

    /// The address text, without the terminator.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The address text, including the NUL terminator.
    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf[..=self.len]
    }

    pub fn as_str(&self) -> &str {
        // base58 output is always ASCII
        core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }
}

impl core::fmt::Debug for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Address({})", self.as_str())
    }
}
