//! Aeternity V-App.
//!
//! Verifies and signs Aeternity spend transactions on a Ledger secure element.
//! The host sends the raw RLP-encoded transaction; the V-App extracts the
//! recipient, amount and fee, has the user confirm them, and only then derives
//! the account key and signs.
//!
//! # Security Model
//!
//! - Host is fully compromised; treat all input as adversarial
//! - No heap: every buffer is a fixed-size array, every write is bounds-checked
//! - Fail closed on any malformed field, the whole command is aborted
//! - Private key material lives in a single scratch slot, wiped on every exit
//!   path of the call that filled it

#![cfg_attr(not(test), no_std)]

pub mod address;
pub mod app;
pub mod base58;
pub mod comm;
pub mod crypto;
pub mod handlers;
pub mod parsing;
pub mod utils;
pub mod ux;

pub use app::App;
pub use common::{Error, StatusWord};
