//! Command handlers for the Aeternity V-App.
//!
//! Each handler validates its data, asks for confirmation where needed, and
//! appends its payload to the response. The status word is added by the
//! dispatcher.

mod config;
mod get_address;
mod sign_tx;

pub use config::handle_get_app_configuration;
pub use get_address::handle_get_address;
pub use sign_tx::handle_sign_transaction;
