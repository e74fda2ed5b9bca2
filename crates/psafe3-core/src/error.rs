use std::io::{ErrorKind, Read};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PsafeError {
    #[error("input ends before the end of the database")]
    Truncated,

    #[error("not a Password Safe V3 database (bad magic tag)")]
    BadTag,

    #[error("key stretch count {iterations} is below the required minimum of 2048")]
    WeakIter { iterations: u32 },

    #[error("incorrect password")]
    BadPassword,

    #[error("malformed field: {0}")]
    Malformed(String),

    #[error("HMAC mismatch (database corrupted or tampered with)")]
    BadMac,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot encode field: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, PsafeError>;

/// Fill `buf` from the reader, mapping a short read to `Truncated` rather
/// than surfacing it as a generic I/O failure.
pub(crate) fn read_exact_or_truncated<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => PsafeError::Truncated,
        _ => PsafeError::Io(e),
    })
}
