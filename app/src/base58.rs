//! Base58 encoding over fixed-size stack buffers.
//!
//! Only encoding is needed on the device. The input is treated as a big-endian
//! number and repeatedly divided by 58; leading zero bytes are kept as leading
//! `'1'` characters so that keys starting with zero bytes stay distinct.

use core::fmt;

use common::constants::BASE58_MAX_INPUT_LEN;

/// The Bitcoin base58 alphabet (no `0`, `O`, `I`, `l`).
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Base58 encoding errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base58Error {
    /// Input is larger than the working buffer.
    InvalidInput,
    /// Encoded output does not fit the destination.
    Overflow,
}

impl fmt::Display for Base58Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Base58Error::InvalidInput => write!(f, "Base58 input too large"),
            Base58Error::Overflow => write!(f, "Base58 output overflow"),
        }
    }
}

impl core::error::Error for Base58Error {}

impl From<Base58Error> for common::Error {
    fn from(e: Base58Error) -> Self {
        match e {
            Base58Error::InvalidInput => common::Error::InvalidInput,
            Base58Error::Overflow => common::Error::BufferOverflow,
        }
    }
}

/// Encodes `input` into `out`, most significant digit first.
///
/// Returns the number of characters written. `out` is left untouched unless
/// the whole encoding fits.
pub fn encode(input: &[u8], out: &mut [u8]) -> Result<usize, Base58Error> {
    let length = input.len();
    if length > BASE58_MAX_INPUT_LEN {
        return Err(Base58Error::InvalidInput);
    }

    let mut tmp = [0u8; BASE58_MAX_INPUT_LEN];
    tmp[..length].copy_from_slice(input);

    // Each input byte needs at most ~1.37 base58 digits
    let mut buffer = [0u8; 2 * BASE58_MAX_INPUT_LEN];
    let end = 2 * length;

    let zero_count = tmp[..length].iter().take_while(|&&b| b == 0).count();

    let mut j = end;
    let mut start_at = zero_count;
    while start_at < length {
        let mut remainder: u16 = 0;
        for digit in tmp[start_at..length].iter_mut() {
            let acc = remainder * 256 + *digit as u16;
            *digit = (acc / 58) as u8;
            remainder = acc % 58;
        }
        if tmp[start_at] == 0 {
            start_at += 1;
        }
        j -= 1;
        buffer[j] = ALPHABET[remainder as usize];
    }

    // Drop the zero digits produced once the quotient ran out
    while j < end && buffer[j] == ALPHABET[0] {
        j += 1;
    }
    for _ in 0..zero_count {
        j -= 1;
        buffer[j] = ALPHABET[0];
    }

    let encoded_len = end - j;
    if encoded_len > out.len() {
        return Err(Base58Error::Overflow);
    }
    out[..encoded_len].copy_from_slice(&buffer[j..end]);
    Ok(encoded_len)
}
