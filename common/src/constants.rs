//! Fixed policy of the V-App: wire tags, derivation path and buffer capacities.
//!
//! Everything the signing core sizes a stack buffer with is defined here, so
//! that the host-side code can check the same bounds before sending.

/// Tag of the spend transaction, the only transaction type the V-App signs.
pub const SPEND_TRANSACTION_TAG: u8 = 12;

/// Tag byte preceding the 32 raw key bytes of an account identifier.
pub const ACCOUNT_ADDRESS_TAG: u8 = 1;

/// Textual prefix of an account address.
pub const ADDRESS_PREFIX: &[u8; 3] = b"ak_";

/// Length of a raw Ed25519 public key.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Length of the checksum appended to the key before base58 encoding.
pub const CHECKSUM_LEN: usize = 4;

/// Length of the base58 payload of an address (key + checksum).
pub const ADDRESS_PAYLOAD_LEN: usize = PUBLIC_KEY_LEN + CHECKSUM_LEN;

/// Maximum length of the base58 body of an address.
pub const ADDRESS_BODY_MAX_LEN: usize = 51;

/// Capacity of an address buffer: prefix, body and NUL terminator.
pub const ADDRESS_BUFFER_LEN: usize = ADDRESS_PREFIX.len() + ADDRESS_BODY_MAX_LEN + 1;

/// Capacity of the base58 working buffer.
pub const BASE58_MAX_INPUT_LEN: usize = 164;

/// Maximum width of an amount or fee, in bytes.
pub const MAX_INTEGER_LEN: usize = 8;

/// Capacity of a decimal buffer: the 20 digits of `u64::MAX` and a NUL terminator.
pub const DECIMAL_BUFFER_LEN: usize = 21;

/// Longest RLP header accepted: lead byte plus a 4-byte length.
pub const RLP_MAX_HEADER_LEN: usize = 5;

/// Hardened index marker (bit 31).
pub const HARDENED: u32 = 0x8000_0000;

/// Number of segments of the derivation path.
pub const BIP32_PATH_LEN: usize = 5;

/// BIP44 coin type registered for Aeternity.
pub const COIN_TYPE: u32 = 457;

/// Position of the account segment in [`DERIVATION_PATH`].
pub const ACCOUNT_SEGMENT: usize = 2;

/// Template of the derivation path, m/44'/457'/account'/0'/0'.
///
/// Ed25519 only supports hardened derivation, so every segment is hardened.
pub const DERIVATION_PATH: [u32; BIP32_PATH_LEN] = [
    44 | HARDENED,
    COIN_TYPE | HARDENED,
    HARDENED,
    HARDENED,
    HARDENED,
];

/// Length of an Ed25519 signature.
pub const SIGNATURE_LEN: usize = 64;

/// APDU class byte accepted by the V-App.
pub const CLA: u8 = 0xE0;

/// Length of the APDU header (CLA, INS, P1, P2, Lc).
pub const APDU_HEADER_LEN: usize = 5;

/// Maximum length of the data part of an APDU.
pub const MAX_APDU_DATA_LEN: usize = 255;

/// Length of the big-endian account index prefixing every command.
pub const ACCOUNT_INDEX_LEN: usize = 4;

/// Maximum length of a transaction blob.
pub const MAX_TX_LEN: usize = MAX_APDU_DATA_LEN - ACCOUNT_INDEX_LEN;

/// Capacity a response buffer must have for the largest reply plus the status word.
pub const MAX_RESPONSE_LEN: usize = MAX_APDU_DATA_LEN + 2;

/// Version of the V-App, as reported by GET_APP_CONFIGURATION.
pub const APP_VERSION: [u8; 3] = [
    parse_version(env!("CARGO_PKG_VERSION_MAJOR")),
    parse_version(env!("CARGO_PKG_VERSION_MINOR")),
    parse_version(env!("CARGO_PKG_VERSION_PATCH")),
];

const fn parse_version(s: &str) -> u8 {
    let bytes = s.as_bytes();
    let mut value: u8 = 0;
    let mut i = 0;
    while i < bytes.len() {
        value = value * 10 + (bytes[i] - b'0');
        i += 1;
    }
    value
}
