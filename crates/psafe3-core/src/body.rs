//! Twofish-CBC block framing for the database body.
//!
//! The body sits between the preamble and a 16-byte plaintext sentinel.
//! The sentinel is matched against the raw ciphertext stream before any
//! decryption happens, and is written verbatim, never encrypted.

use std::io::{Read, Write};

use cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use twofish::Twofish;

use crate::error::{read_exact_or_truncated, Result};

pub const SENTINEL: &[u8; 16] = b"PWS3-EOFPWS3-EOF";
pub const BLOCK_SIZE: usize = 16;

type CbcDecryptor = cbc::Decryptor<Twofish>;
type CbcEncryptor = cbc::Encryptor<Twofish>;

/// Reads and decrypts 16-byte body blocks until the sentinel.
pub struct BodyReader<R> {
    inner: R,
    cipher: CbcDecryptor,
}

impl<R: Read> BodyReader<R> {
    pub fn new(inner: R, key: &[u8; 32], iv: &[u8; 16]) -> Self {
        Self {
            inner,
            cipher: CbcDecryptor::new(key.into(), iv.into()),
        }
    }

    /// The next decrypted block, or `None` once the sentinel is reached.
    /// A stream that ends mid-block or before the sentinel is `Truncated`.
    pub fn next_block(&mut self) -> Result<Option<[u8; BLOCK_SIZE]>> {
        let mut block = [0u8; BLOCK_SIZE];
        read_exact_or_truncated(&mut self.inner, &mut block)?;
        if &block == SENTINEL {
            return Ok(None);
        }
        self.cipher.decrypt_block_mut((&mut block).into());
        Ok(Some(block))
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Encrypts and writes 16-byte body blocks, then the sentinel.
pub struct BodyWriter<W> {
    inner: W,
    cipher: CbcEncryptor,
}

impl<W: Write> BodyWriter<W> {
    pub fn new(inner: W, key: &[u8; 32], iv: &[u8; 16]) -> Self {
        Self {
            inner,
            cipher: CbcEncryptor::new(key.into(), iv.into()),
        }
    }

    pub fn write_block(&mut self, mut block: [u8; BLOCK_SIZE]) -> Result<()> {
        self.cipher.encrypt_block_mut((&mut block).into());
        self.inner.write_all(&block)?;
        Ok(())
    }

    /// Emit the sentinel and hand the stream back for the trailing HMAC.
    pub fn finish(mut self) -> Result<W> {
        self.inner.write_all(SENTINEL)?;
        Ok(self.inner)
    }
}
