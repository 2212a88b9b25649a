//! Core types shared by the V-App and its clients.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{
    ACCOUNT_SEGMENT, APP_VERSION, BIP32_PATH_LEN, DERIVATION_PATH, HARDENED, SIGNATURE_LEN,
};

// =============================================================================
// BIP32 Path
// =============================================================================

/// Derivation path of an account, m/44'/457'/account'/0'/0'.
///
/// Only the account segment varies. The path is wiped when dropped, so that
/// the account index does not linger on the stack after a signing call.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Bip32Path {
    components: [u32; BIP32_PATH_LEN],
}

impl Bip32Path {
    /// Builds the path for `account`. The account segment is always hardened.
    pub fn for_account(account: u32) -> Self {
        let mut components = DERIVATION_PATH;
        components[ACCOUNT_SEGMENT] = account | HARDENED;
        Self { components }
    }

    /// Returns the path as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.components
    }

    /// Returns the account index, without the hardened bit.
    #[inline]
    pub fn account(&self) -> u32 {
        self.components[ACCOUNT_SEGMENT] & !HARDENED
    }
}

// =============================================================================
// Signature
// =============================================================================

/// Ed25519 signature (R || S).
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(pub [u8; SIGNATURE_LEN]);

impl Signature {
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }
}

impl core::fmt::Debug for Signature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Signature(")?;
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// App configuration returned by GET_APP_CONFIGURATION.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfiguration {
    /// Feature flags, currently always zero.
    pub flags: u8,
    /// Major version.
    pub version_major: u8,
    /// Minor version.
    pub version_minor: u8,
    /// Patch version.
    pub version_patch: u8,
}

impl AppConfiguration {
    /// Configuration of this build.
    pub fn current() -> Self {
        Self {
            flags: 0,
            version_major: APP_VERSION[0],
            version_minor: APP_VERSION[1],
            version_patch: APP_VERSION[2],
        }
    }

    /// Wire encoding: `[flags, major, minor, patch]`.
    pub fn to_bytes(&self) -> [u8; 4] {
        [
            self.flags,
            self.version_major,
            self.version_minor,
            self.version_patch,
        ]
    }
}
