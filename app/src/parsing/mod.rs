//! Transaction parsing.
//!
//! - [`rlp`]: streaming RLP header decoding over a bounded cursor
//! - [`transaction`]: spend transaction field extraction

pub mod rlp;
pub mod transaction;

pub use rlp::{can_decode, decode_header, Cursor, RlpError, RlpItem};
pub use transaction::{ParsedTransaction, TransactionParser, TxParseError};
