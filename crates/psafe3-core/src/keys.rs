//! Master key schedule.
//!
//! The stretched key is the result of iterating SHA-256 over
//! `password || salt`. It never touches the disk: the file stores only its
//! SHA-256 digest (the password check) and the two Twofish-ECB-wrapped
//! working keys.

use cipher::generic_array::GenericArray;
use cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use twofish::Twofish;
use zeroize::Zeroizing;

use crate::error::{PsafeError, Result};

/// Password-derived key, zeroized on drop.
pub struct StretchedKey(Zeroizing<[u8; 32]>);

impl StretchedKey {
    /// `t0 = SHA-256(password || salt)`, then `iterations` further SHA-256
    /// rounds. The stretch count is taken at face value; the preamble
    /// parser has already enforced the minimum.
    pub fn derive(password: &str, salt: &[u8; 32], iterations: u32) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hasher.update(salt);
        let mut digest = hasher.finalize();
        for _ in 0..iterations {
            digest = Sha256::digest(digest);
        }

        let mut key = Zeroizing::new([0u8; 32]);
        key.copy_from_slice(&digest);
        Self(key)
    }

    /// SHA-256 of the stretched key, as stored in the preamble.
    pub fn verification_hash(&self) -> [u8; 32] {
        Sha256::digest(*self.0).into()
    }

    /// Constant-time comparison against the stored digest.
    pub fn verify(&self, stored_hash: &[u8; 32]) -> Result<()> {
        let computed = self.verification_hash();
        if bool::from(computed.ct_eq(stored_hash)) {
            Ok(())
        } else {
            Err(PsafeError::BadPassword)
        }
    }

    /// Decrypt a wrapped working key: two independent Twofish-ECB blocks.
    pub fn unwrap_key(&self, wrapped: &[u8; 32]) -> Zeroizing<[u8; 32]> {
        let cipher = Twofish::new((&*self.0).into());
        let mut key = Zeroizing::new(*wrapped);
        for half in key.chunks_exact_mut(16) {
            cipher.decrypt_block(GenericArray::from_mut_slice(half));
        }
        key
    }

    /// Encrypt a working key for the preamble, inverse of [`unwrap_key`].
    ///
    /// [`unwrap_key`]: Self::unwrap_key
    pub fn wrap_key(&self, key: &[u8; 32]) -> [u8; 32] {
        let cipher = Twofish::new((&*self.0).into());
        let mut wrapped = *key;
        for half in wrapped.chunks_exact_mut(16) {
            cipher.encrypt_block(GenericArray::from_mut_slice(half));
        }
        wrapped
    }
}
