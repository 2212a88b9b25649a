//! Spend transaction field extraction.
//!
//! The serialized transaction is walked once, front to back, by a small state
//! machine. Only the fields shown to the user are kept:
//!
//! ```text
//! [ tag=12, version, sender, recipient, amount, fee, ttl, nonce, payload ]
//! ```
//!
//! Account identifiers are 33-byte strings: the account tag followed by the
//! 32 raw key bytes. Amount and fee are big-endian unsigned integers of at most
//! 8 bytes. Everything after the fee is signed but not inspected.

use core::fmt;

use common::constants::{
    ACCOUNT_ADDRESS_TAG, MAX_INTEGER_LEN, PUBLIC_KEY_LEN, SPEND_TRANSACTION_TAG,
};
use log::warn;

use super::rlp::{Cursor, RlpError, RlpItem};
use crate::address::Address;
use crate::base58::Base58Error;
use crate::utils::Decimal;

/// Length of an account identifier field: tag byte and key.
const ACCOUNT_FIELD_LEN: u32 = 1 + PUBLIC_KEY_LEN as u32;

/// Transaction parsing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxParseError {
    /// Header malformed, truncated or inconsistent with the field it announces.
    InvalidRlpLength,
    /// First field is not the spend transaction tag.
    WrongTransactionType,
    /// Account identifier without the account tag.
    WrongAddressPrefix,
    /// Rendered field does not fit its buffer.
    Overflow,
}

impl fmt::Display for TxParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxParseError::InvalidRlpLength => write!(f, "Invalid RLP length"),
            TxParseError::WrongTransactionType => write!(f, "Wrong transaction type"),
            TxParseError::WrongAddressPrefix => write!(f, "Wrong address prefix"),
            TxParseError::Overflow => write!(f, "Field overflow"),
        }
    }
}

impl core::error::Error for TxParseError {}

impl From<RlpError> for TxParseError {
    fn from(_: RlpError) -> Self {
        TxParseError::InvalidRlpLength
    }
}

impl From<Base58Error> for TxParseError {
    fn from(_: Base58Error) -> Self {
        TxParseError::Overflow
    }
}

impl From<TxParseError> for common::Error {
    fn from(e: TxParseError) -> Self {
        match e {
            TxParseError::InvalidRlpLength => common::Error::InvalidRlpLength,
            TxParseError::WrongTransactionType => common::Error::WrongTransactionType,
            TxParseError::WrongAddressPrefix => common::Error::WrongAddressPrefix,
            TxParseError::Overflow => common::Error::BufferOverflow,
        }
    }
}

/// Fields of a spend transaction shown for review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTransaction {
    pub recipient: Address,
    pub amount: Decimal,
    pub fee: Decimal,
}

/// Extraction progress. Each state names the next field to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Type,
    Sender,
    Recipient,
    Amount,
    Fee,
    Done,
}

/// Field extractor over a serialized spend transaction.
pub struct TransactionParser<'a> {
    cursor: Cursor<'a>,
    state: State,
    recipient: Option<Address>,
    amount: Option<Decimal>,
    fee: Option<Decimal>,
}

impl<'a> TransactionParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
            state: State::Type,
            recipient: None,
            amount: None,
            fee: None,
        }
    }

    /// Extracts recipient, amount and fee from `data`.
    ///
    /// Bytes after the fee are ignored.
    pub fn parse(data: &'a [u8]) -> Result<ParsedTransaction, TxParseError> {
        let mut parser = Self::new(data);
        parser.run()?;
        parser.finish()
    }

    fn run(&mut self) -> Result<(), TxParseError> {
        while self.state != State::Done {
            self.step()?;
        }
        Ok(())
    }

    /// Reads the field of the current state and moves to the next one.
    fn step(&mut self) -> Result<(), TxParseError> {
        self.state = match self.state {
            State::Type => {
                self.parse_type()?;
                State::Sender
            }
            State::Sender => {
                // signed as is, never displayed
                self.parse_account()?;
                State::Recipient
            }
            State::Recipient => {
                let key = self.parse_account()?;
                self.recipient = Some(Address::from_public_key(&key)?);
                State::Amount
            }
            State::Amount => {
                self.amount = Some(Decimal::new(self.parse_integer()?));
                State::Fee
            }
            State::Fee => {
                self.fee = Some(Decimal::new(self.parse_integer()?));
                State::Done
            }
            State::Done => State::Done,
        };
        Ok(())
    }

    fn finish(self) -> Result<ParsedTransaction, TxParseError> {
        match (self.recipient, self.amount, self.fee) {
            (Some(recipient), Some(amount), Some(fee)) => Ok(ParsedTransaction {
                recipient,
                amount,
                fee,
            }),
            _ => Err(TxParseError::InvalidRlpLength),
        }
    }

    /// Outer list, tag and version.
    fn parse_type(&mut self) -> Result<(), TxParseError> {
        let outer = self.cursor.read_header()?;
        if !outer.is_list {
            warn!("Transaction is not an RLP list");
            return Err(TxParseError::InvalidRlpLength);
        }

        // tag and version are bare bytes, never wrapped in a string header
        let tag = self.cursor.next_byte()?;
        if tag != SPEND_TRANSACTION_TAG {
            warn!("Unsupported transaction tag: {:02x}", tag);
            return Err(TxParseError::WrongTransactionType);
        }

        // version, not checked
        self.cursor.take(1)?;
        Ok(())
    }

    fn parse_account(&mut self) -> Result<[u8; PUBLIC_KEY_LEN], TxParseError> {
        let item = self.read_item()?;
        if item.field_length != ACCOUNT_FIELD_LEN {
            warn!("Account field of {} bytes", item.field_length);
            return Err(TxParseError::InvalidRlpLength);
        }

        if self.cursor.next_byte()? != ACCOUNT_ADDRESS_TAG {
            warn!("Account field without account tag");
            return Err(TxParseError::WrongAddressPrefix);
        }

        let mut key = [0u8; PUBLIC_KEY_LEN];
        key.copy_from_slice(self.cursor.take(PUBLIC_KEY_LEN)?);
        Ok(key)
    }

    fn parse_integer(&mut self) -> Result<u64, TxParseError> {
        let bytes = self.read_string()?;
        if bytes.len() > MAX_INTEGER_LEN {
            warn!("Integer field of {} bytes", bytes.len());
            return Err(TxParseError::InvalidRlpLength);
        }
        Ok(bytes
            .iter()
            .fold(0u64, |acc, &byte| (acc << 8) | byte as u64))
    }

    /// Reads the header of a non-list item.
    fn read_item(&mut self) -> Result<RlpItem, TxParseError> {
        let item = self.cursor.read_header()?;
        if item.is_list {
            warn!("Unexpected nested list");
            return Err(TxParseError::InvalidRlpLength);
        }
        Ok(item)
    }

    /// Reads a non-list item and returns its payload.
    fn read_string(&mut self) -> Result<&'a [u8], TxParseError> {
        let item = self.read_item()?;
        Ok(self.cursor.take(item.field_length as usize)?)
    }
}
