//! The fixed plaintext prefix of a V3 database.
//!
//! Layout (little-endian, 152 bytes):
//!
//! ```text
//! offset  size  field
//!      0     4  magic tag "PWS3"
//!      4    32  salt
//!     36     4  key stretch count (u32, >= 2048)
//!     40    32  SHA-256 of the stretched key (password check)
//!     72    32  cipher key, Twofish-ECB wrapped under the stretched key
//!    104    32  HMAC key, Twofish-ECB wrapped under the stretched key
//!    136    16  CBC initialisation vector for the body
//! ```

use std::io::{Read, Write};

use crate::error::{read_exact_or_truncated, PsafeError, Result};

pub const TAG: &[u8; 4] = b"PWS3";
pub const PREAMBLE_SIZE: usize = 152;
pub const MIN_ITERATIONS: u32 = 2048;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preamble {
    pub salt: [u8; 32],
    pub iterations: u32,
    pub stretched_key_hash: [u8; 32],
    pub wrapped_cipher_key: [u8; 32],
    pub wrapped_mac_key: [u8; 32],
    pub iv: [u8; 16],
}

impl Preamble {
    pub fn to_bytes(&self) -> [u8; PREAMBLE_SIZE] {
        let mut bytes = [0u8; PREAMBLE_SIZE];
        bytes[0..4].copy_from_slice(TAG);
        bytes[4..36].copy_from_slice(&self.salt);
        bytes[36..40].copy_from_slice(&self.iterations.to_le_bytes());
        bytes[40..72].copy_from_slice(&self.stretched_key_hash);
        bytes[72..104].copy_from_slice(&self.wrapped_cipher_key);
        bytes[104..136].copy_from_slice(&self.wrapped_mac_key);
        bytes[136..152].copy_from_slice(&self.iv);
        bytes
    }

    pub fn from_bytes(bytes: &[u8; PREAMBLE_SIZE]) -> Result<Self> {
        if &bytes[0..4] != TAG {
            return Err(PsafeError::BadTag);
        }

        let iterations = u32::from_le_bytes(bytes[36..40].try_into().unwrap());
        if iterations < MIN_ITERATIONS {
            return Err(PsafeError::WeakIter { iterations });
        }

        let mut salt = [0u8; 32];
        salt.copy_from_slice(&bytes[4..36]);
        let mut stretched_key_hash = [0u8; 32];
        stretched_key_hash.copy_from_slice(&bytes[40..72]);
        let mut wrapped_cipher_key = [0u8; 32];
        wrapped_cipher_key.copy_from_slice(&bytes[72..104]);
        let mut wrapped_mac_key = [0u8; 32];
        wrapped_mac_key.copy_from_slice(&bytes[104..136]);
        let mut iv = [0u8; 16];
        iv.copy_from_slice(&bytes[136..152]);

        Ok(Self {
            salt,
            iterations,
            stretched_key_hash,
            wrapped_cipher_key,
            wrapped_mac_key,
            iv,
        })
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = [0u8; PREAMBLE_SIZE];
        read_exact_or_truncated(reader, &mut bytes)?;
        Self::from_bytes(&bytes)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Preamble {
        Preamble {
            salt: [0x11; 32],
            iterations: 2048,
            stretched_key_hash: [0x22; 32],
            wrapped_cipher_key: [0x33; 32],
            wrapped_mac_key: [0x44; 32],
            iv: [0x55; 16],
        }
    }

    #[test]
    fn roundtrip() {
        let preamble = sample();
        let parsed = Preamble::from_bytes(&preamble.to_bytes()).unwrap();
        assert_eq!(parsed, preamble);
    }

    #[test]
    fn rejects_bad_tag() {
        let mut bytes = sample().to_bytes();
        bytes[0] = b'X';
        let err = Preamble::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, PsafeError::BadTag));
    }

    #[test]
    fn rejects_weak_stretch_count() {
        let mut preamble = sample();
        preamble.iterations = 100;
        let err = Preamble::from_bytes(&preamble.to_bytes()).unwrap_err();
        assert!(matches!(err, PsafeError::WeakIter { iterations: 100 }));
    }

    #[test]
    fn short_input_is_truncated() {
        let err = Preamble::read_from(&mut &[0u8; 10][..]).unwrap_err();
        assert!(matches!(err, PsafeError::Truncated));
    }
}
