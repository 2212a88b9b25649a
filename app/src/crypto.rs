//! Key derivation and Ed25519 signing.
//!
//! The private key of an account lives in a single scratch slot owned by the
//! [`KeyService`]. It is only reachable through a [`PrivateKeyGuard`], which
//! wipes the slot when dropped, whatever the outcome of the operation.
//!
//! # Derivation
//!
//! Keys follow SLIP-10 for Ed25519: master node from HMAC-SHA512 keyed with
//! `"ed25519 seed"`, then one HMAC per segment. Only hardened segments exist
//! on this curve.

use core::ops::Deref;

use common::constants::{HARDENED, PUBLIC_KEY_LEN};
use common::{Bip32Path, Error, Signature};
use ed25519_dalek::{Signer, SigningKey};
use hmac::{Hmac, Mac};
use log::{debug, warn};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

type HmacSha512 = Hmac<Sha512>;

const SLIP10_ED25519_KEY: &[u8] = b"ed25519 seed";

const MIN_SEED_LEN: usize = 16;
const MAX_SEED_LEN: usize = 64;

/// A hierarchical deterministic node: private key and chain code.
pub struct HdPrivNode {
    pub chaincode: Zeroizing<[u8; 32]>,
    pub privkey: Zeroizing<[u8; 32]>,
}

impl Default for HdPrivNode {
    fn default() -> Self {
        Self {
            chaincode: Zeroizing::new([0u8; 32]),
            privkey: Zeroizing::new([0u8; 32]),
        }
    }
}

impl Zeroize for HdPrivNode {
    fn zeroize(&mut self) {
        self.chaincode.zeroize();
        self.privkey.zeroize();
    }
}

#[cfg(test)]
impl HdPrivNode {
    fn is_zero(&self) -> bool {
        self.privkey.iter().chain(self.chaincode.iter()).all(|&b| b == 0)
    }
}

/// The Ed25519 primitives provided by the platform.
pub trait Ed25519Backend {
    /// Derives the node at `path` into `node`.
    ///
    /// On error the content of `node` is unspecified; the caller wipes it.
    fn derive_hd_node(&self, path: &[u32], node: &mut HdPrivNode) -> Result<(), Error>;

    /// Signs `msg` with `privkey` (pure Ed25519, SHA-512).
    fn sign(&self, privkey: &[u8; 32], msg: &[u8]) -> Result<Signature, Error>;

    /// Computes the public key of `privkey`.
    fn public_key(&self, privkey: &[u8; 32]) -> Result<[u8; PUBLIC_KEY_LEN], Error>;
}

/// Software backend deriving keys from a seed held in memory.
pub struct Slip10Ed25519 {
    seed: Zeroizing<[u8; MAX_SEED_LEN]>,
    seed_len: usize,
}

impl Slip10Ed25519 {
    /// Creates a backend over `seed`, between 16 and 64 bytes.
    pub fn new(seed: &[u8]) -> Result<Self, Error> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
            return Err(Error::KeyDerivationFailed);
        }
        let mut buf = Zeroizing::new([0u8; MAX_SEED_LEN]);
        buf[..seed.len()].copy_from_slice(seed);
        Ok(Self {
            seed: buf,
            seed_len: seed.len(),
        })
    }

    fn seed(&self) -> &[u8] {
        &self.seed[..self.seed_len]
    }
}

/// Runs one HMAC-SHA512 and splits the output into `node`.
///
/// The HMAC state holds pads derived from `key` and `hmac` has no way to wipe
/// them. It only lives in this frame, which the next derivation step reuses.
fn hmac_into(key: &[u8], parts: &[&[u8]], node: &mut HdPrivNode) -> Result<(), Error> {
    let mut mac = HmacSha512::new_from_slice(key).map_err(|_| Error::KeyDerivationFailed)?;
    for part in parts {
        mac.update(part);
    }
    let mut output = mac.finalize().into_bytes();
    node.privkey.copy_from_slice(&output[..32]);
    node.chaincode.copy_from_slice(&output[32..]);
    output.as_mut_slice().zeroize();
    Ok(())
}

impl Ed25519Backend for Slip10Ed25519 {
    fn derive_hd_node(&self, path: &[u32], node: &mut HdPrivNode) -> Result<(), Error> {
        hmac_into(SLIP10_ED25519_KEY, &[self.seed()], node)?;

        let mut chaincode = Zeroizing::new([0u8; 32]);
        let mut privkey = Zeroizing::new([0u8; 32]);
        for &index in path {
            if index & HARDENED == 0 {
                warn!("Non-hardened segment in Ed25519 path");
                return Err(Error::KeyDerivationFailed);
            }
            chaincode.copy_from_slice(&node.chaincode[..]);
            privkey.copy_from_slice(&node.privkey[..]);
            hmac_into(
                &chaincode[..],
                &[&[0x00], &privkey[..], &index.to_be_bytes()],
                node,
            )?;
        }
        Ok(())
    }

    fn sign(&self, privkey: &[u8; 32], msg: &[u8]) -> Result<Signature, Error> {
        let signing_key = SigningKey::from_bytes(privkey);
        let signature = signing_key.sign(msg);

        // a faulted computation must not leave the device
        signing_key
            .verifying_key()
            .verify_strict(msg, &signature)
            .map_err(|_| Error::SigningFailed)?;

        Ok(Signature(signature.to_bytes()))
    }

    fn public_key(&self, privkey: &[u8; 32]) -> Result<[u8; PUBLIC_KEY_LEN], Error> {
        let signing_key = SigningKey::from_bytes(privkey);
        Ok(signing_key.verifying_key().to_bytes())
    }
}

/// Scoped access to the derived private key. The scratch slot is wiped on drop.
pub struct PrivateKeyGuard<'a> {
    node: &'a mut HdPrivNode,
}

impl Deref for PrivateKeyGuard<'_> {
    type Target = [u8; 32];

    fn deref(&self) -> &Self::Target {
        &self.node.privkey
    }
}

impl Drop for PrivateKeyGuard<'_> {
    fn drop(&mut self) {
        self.node.zeroize();
    }
}

fn derive_into<'a, B: Ed25519Backend>(
    backend: &B,
    scratch: &'a mut HdPrivNode,
    account: u32,
) -> Result<PrivateKeyGuard<'a>, Error> {
    let path = Bip32Path::for_account(account);
    debug!("Deriving key of account {}", path.account());

    // built first so that a failed derivation is wiped too
    let mut guard = PrivateKeyGuard { node: scratch };
    backend.derive_hd_node(path.as_slice(), guard.node)?;
    Ok(guard)
}

/// Derives account keys and signs with them.
pub struct KeyService<B: Ed25519Backend> {
    backend: B,
    scratch: HdPrivNode,
}

impl<B: Ed25519Backend> KeyService<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            scratch: HdPrivNode::default(),
        }
    }

    /// Derives the private key of `account` at m/44'/457'/account'/0'/0'.
    pub fn derive_private_key(&mut self, account: u32) -> Result<PrivateKeyGuard<'_>, Error> {
        derive_into(&self.backend, &mut self.scratch, account)
    }

    /// Signs `msg` with the key of `account`.
    pub fn sign(&mut self, account: u32, msg: &[u8]) -> Result<Signature, Error> {
        let key = derive_into(&self.backend, &mut self.scratch, account)?;
        self.backend.sign(&key, msg)
    }

    /// Public key of `account`.
    pub fn public_key(&mut self, account: u32) -> Result<[u8; PUBLIC_KEY_LEN], Error> {
        let key = derive_into(&self.backend, &mut self.scratch, account)?;
        self.backend.public_key(&key)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub(crate) fn scratch_is_zero(&self) -> bool {
        self.scratch.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use ed25519_dalek::{Verifier, VerifyingKey};
    use hex_literal::hex;

    const SLIP10_SEED: [u8; 16] = hex!("000102030405060708090a0b0c0d0e0f");

    fn backend() -> Slip10Ed25519 {
        Slip10Ed25519::new(&SLIP10_SEED).unwrap()
    }

    #[test]
    fn test_slip10_master() {
        let mut node = HdPrivNode::default();
        backend().derive_hd_node(&[], &mut node).unwrap();
        assert_eq!(
            *node.privkey,
            hex!("2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7")
        );
        assert_eq!(
            *node.chaincode,
            hex!("90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb")
        );
        assert_eq!(
            backend().public_key(&node.privkey).unwrap(),
            hex!("a4b2856bfec510abab89753fac1ac0e1112364e7d250545963f135f2a33188ed")
        );
    }

    #[test]
    fn test_slip10_first_child() {
        let mut node = HdPrivNode::default();
        backend().derive_hd_node(&[HARDENED], &mut node).unwrap();
        assert_eq!(
            *node.privkey,
            hex!("68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3")
        );
        assert_eq!(
            *node.chaincode,
            hex!("8b59aa11380b624e81507a27fedda59fea6d0b779a778918a2fd3590e16e9c69")
        );
    }

    #[test]
    fn test_slip10_second_level() {
        let mut node = HdPrivNode::default();
        backend()
            .derive_hd_node(&[HARDENED, 1 | HARDENED], &mut node)
            .unwrap();
        assert_eq!(
            *node.privkey,
            hex!("b1d0bad404bf35da785a64ca1ac54b2617211d2777696fbffaf208f746ae84f2")
        );
        assert_eq!(
            *node.chaincode,
            hex!("a320425f77d1b5c2505a6b1b27382b37368ee640e3557c315416801243552f14")
        );
    }

    #[test]
    fn test_non_hardened_rejected() {
        let mut node = HdPrivNode::default();
        assert_eq!(
            backend().derive_hd_node(&[HARDENED, 1], &mut node),
            Err(Error::KeyDerivationFailed)
        );
    }

    #[test]
    fn test_seed_length() {
        assert_eq!(
            Slip10Ed25519::new(&[0u8; 15]).err(),
            Some(Error::KeyDerivationFailed)
        );
        assert_eq!(
            Slip10Ed25519::new(&[0u8; 65]).err(),
            Some(Error::KeyDerivationFailed)
        );
        assert!(Slip10Ed25519::new(&[0u8; 64]).is_ok());
    }

    #[test]
    fn test_sign_verifies() {
        let mut keys = KeyService::new(backend());
        let msg = b"spend";
        let signature = keys.sign(0, msg).unwrap();
        let public_key = keys.public_key(0).unwrap();

        let verifying_key = VerifyingKey::from_bytes(&public_key).unwrap();
        let signature = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
        assert!(verifying_key.verify(msg, &signature).is_ok());
        assert!(verifying_key.verify(b"other", &signature).is_err());
    }

    #[test]
    fn test_accounts_differ() {
        let mut keys = KeyService::new(backend());
        assert_ne!(keys.public_key(0).unwrap(), keys.public_key(1).unwrap());
        assert_eq!(keys.public_key(5).unwrap(), keys.public_key(5).unwrap());
    }

    #[test]
    fn test_guard_wipes_scratch() {
        let mut keys = KeyService::new(backend());
        {
            let key = keys.derive_private_key(3).unwrap();
            assert!(key.iter().any(|&b| b != 0));
        }
        assert!(keys.scratch_is_zero());

        keys.sign(3, b"msg").unwrap();
        assert!(keys.scratch_is_zero());

        keys.public_key(3).unwrap();
        assert!(keys.scratch_is_zero());
    }

    /// Writes a recognizable key, then fails on demand.
    struct FaultyBackend {
        fail_derive: bool,
        signed_with: RefCell<Option<[u8; 32]>>,
    }

    impl Ed25519Backend for FaultyBackend {
        fn derive_hd_node(&self, path: &[u32], node: &mut HdPrivNode) -> Result<(), Error> {
            node.privkey.fill(0x5a);
            node.chaincode.fill(0xa5);
            assert_eq!(path.len(), 5);
            if self.fail_derive {
                return Err(Error::KeyDerivationFailed);
            }
            Ok(())
        }

        fn sign(&self, privkey: &[u8; 32], _msg: &[u8]) -> Result<Signature, Error> {
            *self.signed_with.borrow_mut() = Some(*privkey);
            Err(Error::SigningFailed)
        }

        fn public_key(&self, _privkey: &[u8; 32]) -> Result<[u8; 32], Error> {
            Err(Error::KeyDerivationFailed)
        }
    }

    #[test]
    fn test_scratch_wiped_on_errors() {
        let mut keys = KeyService::new(FaultyBackend {
            fail_derive: true,
            signed_with: RefCell::new(None),
        });
        assert_eq!(keys.sign(0, b"msg"), Err(Error::KeyDerivationFailed));
        assert!(keys.scratch_is_zero());
        assert!(keys.backend.signed_with.borrow().is_none());

        let mut keys = KeyService::new(FaultyBackend {
            fail_derive: false,
            signed_with: RefCell::new(None),
        });
        assert_eq!(keys.sign(0, b"msg"), Err(Error::SigningFailed));
        assert_eq!(*keys.backend.signed_with.borrow(), Some([0x5a; 32]));
        assert!(keys.scratch_is_zero());

        assert_eq!(keys.public_key(0), Err(Error::KeyDerivationFailed));
        assert!(keys.scratch_is_zero());
    }
}
