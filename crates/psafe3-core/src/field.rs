//! TLV field framing over the encrypted body.
//!
//! Each field occupies one or more whole blocks:
//!
//! ```text
//! offset  size      content
//!      0     4      payload length (u32, little-endian)
//!      4     1      type code
//!      5     n      payload, spilling into further blocks as needed
//!      -     -      random filler up to the block boundary
//! ```
//!
//! The running HMAC covers payload bytes only: no length, no type code, no
//! filler. Filler must be unpredictable, never zeroed; it is drawn from the
//! OS RNG on every write.

use std::io::{Read, Write};

use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use crate::body::{BodyReader, BodyWriter, BLOCK_SIZE};
use crate::error::{read_exact_or_truncated, PsafeError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Payload bytes available in a field's first block, after the 5-byte
/// length/type header.
const FIRST_BLOCK_PAYLOAD: usize = BLOCK_SIZE - 5;

/// Upper bound on a single field's payload. The format itself allows u32
/// lengths; this bound merely rejects absurd values early so a corrupted
/// length cannot drive a multi-gigabyte allocation. 64 KiB comfortably fits
/// real databases, including large notes fields.
pub const MAX_FIELD_LEN: usize = 65536;

/// One field off the wire: type code plus raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    pub type_code: u8,
    pub payload: Vec<u8>,
}

/// Decrypts fields off the body and accumulates the authentication state.
pub struct FieldReader<R> {
    blocks: BodyReader<R>,
    mac: HmacSha256,
}

impl<R: Read> FieldReader<R> {
    pub fn new(inner: R, cipher_key: &[u8; 32], iv: &[u8; 16], mac_key: &[u8; 32]) -> Self {
        Self {
            blocks: BodyReader::new(inner, cipher_key, iv),
            mac: HmacSha256::new_from_slice(mac_key).expect("hmac accepts any key length"),
        }
    }

    /// The next field, or `None` once the sentinel is reached.
    pub fn next_field(&mut self) -> Result<Option<RawField>> {
        let Some(block) = self.blocks.next_block()? else {
            return Ok(None);
        };

        let length = u32::from_le_bytes(block[0..4].try_into().unwrap()) as usize;
        if length > MAX_FIELD_LEN {
            return Err(PsafeError::Malformed(format!(
                "field length {length} exceeds the {MAX_FIELD_LEN} byte limit"
            )));
        }
        let type_code = block[4];

        let mut payload = Vec::with_capacity(length);
        payload.extend_from_slice(&block[5..5 + length.min(FIRST_BLOCK_PAYLOAD)]);
        while payload.len() < length {
            let block = self
                .blocks
                .next_block()?
                .ok_or(PsafeError::Truncated)?;
            let take = (length - payload.len()).min(BLOCK_SIZE);
            payload.extend_from_slice(&block[..take]);
        }

        self.mac.update(&payload);
        Ok(Some(RawField { type_code, payload }))
    }

    /// Consume the 32-byte stored HMAC after the sentinel and verify it
    /// (constant-time) against everything read so far.
    pub fn verify_mac(self) -> Result<()> {
        let mut inner = self.blocks.into_inner();
        let mut stored = [0u8; 32];
        read_exact_or_truncated(&mut inner, &mut stored)?;
        self.mac.verify_slice(&stored).map_err(|_| PsafeError::BadMac)
    }
}

/// Encrypts fields onto the body and accumulates the authentication state.
pub struct FieldWriter<W> {
    blocks: BodyWriter<W>,
    mac: HmacSha256,
}

impl<W: Write> FieldWriter<W> {
    pub fn new(inner: W, cipher_key: &[u8; 32], iv: &[u8; 16], mac_key: &[u8; 32]) -> Self {
        Self {
            blocks: BodyWriter::new(inner, cipher_key, iv),
            mac: HmacSha256::new_from_slice(mac_key).expect("hmac accepts any key length"),
        }
    }

    pub fn write_field(&mut self, type_code: u8, payload: &[u8]) -> Result<()> {
        if payload.len() > MAX_FIELD_LEN {
            return Err(PsafeError::Encode(format!(
                "payload of {} bytes exceeds the {MAX_FIELD_LEN} byte field limit",
                payload.len()
            )));
        }
        self.mac.update(payload);

        let block_count = (5 + payload.len()).div_ceil(BLOCK_SIZE);
        let mut buf = vec![0u8; block_count * BLOCK_SIZE];
        OsRng.fill_bytes(&mut buf);
        buf[0..4].copy_from_slice(&(payload.len() as u32).to_le_bytes());
        buf[4] = type_code;
        buf[5..5 + payload.len()].copy_from_slice(payload);

        for chunk in buf.chunks_exact(BLOCK_SIZE) {
            self.blocks.write_block(chunk.try_into().unwrap())?;
        }
        Ok(())
    }

    /// Emit the sentinel followed by the final HMAC.
    pub fn finish(self) -> Result<W> {
        let mut inner = self.blocks.finish()?;
        inner.write_all(&self.mac.finalize().into_bytes())?;
        Ok(inner)
    }
}
