//! Error codes and status words of the Aeternity V-App.
//!
//! Every failure aborts the current command; the host only ever sees the
//! two-byte status word the error maps to. Messages are intentionally terse.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Two-byte status words appended to every response.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum StatusWord {
    /// Success
    OK = 0x9000,
    /// Rejected by user
    Deny = 0x6985,
    /// Malformed RLP length
    InvalidRlpLength = 0x6800,
    /// Incorrect Data
    IncorrectData = 0x6A80,
    /// Wrong P1P2
    WrongP1P2 = 0x6A86,
    /// Wrong DataLength
    WrongDataLength = 0x6A87,
    /// Ins not supported
    InsNotSupported = 0x6D00,
    /// Cla not supported
    ClaNotSupported = 0x6E00,
    /// Signature fail
    SignatureFail = 0xB008,
    /// Key derivation fail
    KeyDeriveFail = 0xB009,
    /// Output does not fit its buffer
    BufferOverflow = 0xB00B,
}

impl StatusWord {
    /// Big-endian encoding, as appended to the response.
    #[inline]
    pub fn to_be_bytes(self) -> [u8; 2] {
        (self as u16).to_be_bytes()
    }
}

impl TryFrom<u16> for StatusWord {
    type Error = ();

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0x9000 => Ok(StatusWord::OK),
            0x6985 => Ok(StatusWord::Deny),
            0x6800 => Ok(StatusWord::InvalidRlpLength),
            0x6A80 => Ok(StatusWord::IncorrectData),
            0x6A86 => Ok(StatusWord::WrongP1P2),
            0x6A87 => Ok(StatusWord::WrongDataLength),
            0x6D00 => Ok(StatusWord::InsNotSupported),
            0x6E00 => Ok(StatusWord::ClaNotSupported),
            0xB008 => Ok(StatusWord::SignatureFail),
            0xB009 => Ok(StatusWord::KeyDeriveFail),
            0xB00B => Ok(StatusWord::BufferOverflow),
            _ => Err(()),
        }
    }
}

/// Error codes for the Aeternity V-App.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Error {
    /// User rejected the operation on the device.
    RejectedByUser = 0x01,
    /// Unknown or unsupported instruction.
    InvalidCommand = 0x02,
    /// Unsupported APDU class.
    InvalidClass = 0x03,
    /// Invalid P1/P2 for the instruction.
    InvalidParameter = 0x04,
    /// Command data has the wrong length.
    InvalidDataLength = 0x05,
    /// RLP header is malformed, truncated or wider than 32 bits.
    InvalidRlpLength = 0x10,
    /// Transaction is not a spend transaction.
    WrongTransactionType = 0x11,
    /// Account identifier does not carry the account tag.
    WrongAddressPrefix = 0x12,
    /// Key derivation failed.
    KeyDerivationFailed = 0x20,
    /// Signing operation failed.
    SigningFailed = 0x21,
    /// Input exceeds a working buffer.
    InvalidInput = 0x30,
    /// Output does not fit its destination buffer.
    BufferOverflow = 0x31,
}

impl Error {
    /// Returns the error code as a u8.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the status word reported to the host.
    pub fn status_word(self) -> StatusWord {
        match self {
            Error::RejectedByUser => StatusWord::Deny,
            Error::InvalidCommand => StatusWord::InsNotSupported,
            Error::InvalidClass => StatusWord::ClaNotSupported,
            Error::InvalidParameter => StatusWord::WrongP1P2,
            Error::InvalidDataLength => StatusWord::WrongDataLength,
            Error::InvalidRlpLength => StatusWord::InvalidRlpLength,
            Error::WrongTransactionType | Error::WrongAddressPrefix => StatusWord::IncorrectData,
            Error::KeyDerivationFailed => StatusWord::KeyDeriveFail,
            Error::SigningFailed => StatusWord::SignatureFail,
            Error::InvalidInput | Error::BufferOverflow => StatusWord::BufferOverflow,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RejectedByUser => write!(f, "Rejected by user"),
            Error::InvalidCommand => write!(f, "Invalid command"),
            Error::InvalidClass => write!(f, "Invalid class"),
            Error::InvalidParameter => write!(f, "Invalid parameter"),
            Error::InvalidDataLength => write!(f, "Invalid data length"),
            Error::InvalidRlpLength => write!(f, "Invalid RLP length"),
            Error::WrongTransactionType => write!(f, "Wrong transaction type"),
            Error::WrongAddressPrefix => write!(f, "Wrong address prefix"),
            Error::KeyDerivationFailed => write!(f, "Key derivation failed"),
            Error::SigningFailed => write!(f, "Signing failed"),
            Error::InvalidInput => write!(f, "Invalid input"),
            Error::BufferOverflow => write!(f, "Buffer overflow"),
        }
    }
}

impl core::error::Error for Error {}
