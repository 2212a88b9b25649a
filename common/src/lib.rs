//! Common types and definitions for the Aeternity V-App.
//!
//! This crate holds what the signing core and any host-side client need to
//! agree on: APDU instruction codes, status words, error codes, the fixed
//! derivation policy and the buffer capacities of the text outputs.
//!
//! # Security Note
//!
//! Types defined here describe untrusted input coming from the host. All
//! validation happens in the V-App after the bytes are received.

#![cfg_attr(not(test), no_std)]

pub mod commands;
pub mod constants;
pub mod error;
pub mod types;

pub use commands::{ApduHeader, Instruction};
pub use error::{Error, StatusWord};
pub use types::{AppConfiguration, Bip32Path, Signature};
