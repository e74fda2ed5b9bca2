//! Decoded field payloads.

use std::fmt;

use uuid::Uuid;

use crate::error::{PsafeError, Result};
use crate::types::FieldKind;

/// A field payload after decoding, tagged by interpretation.
///
/// Text payloads that are not valid UTF-8 are preserved as [`Bytes`] rather
/// than transcoded, so loose data survives a round-trip untouched.
///
/// [`Bytes`]: FieldValue::Bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Uuid(Uuid),
    /// Epoch seconds.
    Time(u32),
    Text(String),
    Bytes(Vec<u8>),
    /// Stored as the two raw format bytes; displayed as `"major.minor"`.
    Version { major: u8, minor: u8 },
}

impl FieldValue {
    pub fn decode(kind: FieldKind, payload: Vec<u8>) -> Result<Self> {
        match kind {
            FieldKind::Uuid => {
                let bytes: [u8; 16] = payload.as_slice().try_into().map_err(|_| {
                    PsafeError::Malformed(format!(
                        "uuid payload is {} bytes, expected 16",
                        payload.len()
                    ))
                })?;
                Ok(Self::Uuid(Uuid::from_bytes(bytes)))
            }
            FieldKind::Time => {
                if payload.len() < 4 {
                    return Err(PsafeError::Malformed(format!(
                        "timestamp payload is {} bytes, expected at least 4",
                        payload.len()
                    )));
                }
                Ok(Self::Time(u32::from_le_bytes(
                    payload[..4].try_into().unwrap(),
                )))
            }
            FieldKind::Version => {
                if payload.len() < 2 {
                    return Err(PsafeError::Malformed(format!(
                        "version payload is {} bytes, expected 2",
                        payload.len()
                    )));
                }
                Ok(Self::Version {
                    minor: payload[0],
                    major: payload[1],
                })
            }
            FieldKind::Text => match String::from_utf8(payload) {
                Ok(text) => Ok(Self::Text(text)),
                Err(not_utf8) => Ok(Self::Bytes(not_utf8.into_bytes())),
            },
            FieldKind::Opaque => Ok(Self::Bytes(payload)),
        }
    }

    /// Serialise for the wire, checking the value against the field's
    /// declared kind.
    pub fn encode(&self, kind: FieldKind) -> Result<Vec<u8>> {
        match (kind, self) {
            (FieldKind::Uuid, Self::Uuid(_))
            | (FieldKind::Time, Self::Time(_))
            | (FieldKind::Version, Self::Version { .. })
            | (FieldKind::Text, Self::Text(_))
            | (FieldKind::Text, Self::Bytes(_))
            | (FieldKind::Opaque, Self::Bytes(_)) => Ok(self.canonical_bytes()),
            (kind, value) => Err(PsafeError::Encode(format!(
                "{} value does not fit a {kind:?} field",
                value.variant_name()
            ))),
        }
    }

    /// The wire payload for this value, independent of any kind check.
    /// Also the byte form fed into record content hashes.
    pub(crate) fn canonical_bytes(&self) -> Vec<u8> {
        match self {
            Self::Uuid(uuid) => uuid.as_bytes().to_vec(),
            Self::Time(seconds) => seconds.to_le_bytes().to_vec(),
            Self::Text(text) => text.clone().into_bytes(),
            Self::Bytes(bytes) => bytes.clone(),
            Self::Version { major, minor } => vec![*minor, *major],
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Self::Uuid(uuid) => Some(*uuid),
            _ => None,
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Self::Uuid(_) => "uuid",
            Self::Time(_) => "timestamp",
            Self::Text(_) => "text",
            Self::Bytes(_) => "binary",
            Self::Version { .. } => "version",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uuid(uuid) => write!(f, "{uuid}"),
            Self::Time(seconds) => write!(f, "{seconds}"),
            Self::Text(text) => f.write_str(text),
            Self::Bytes(bytes) => write!(f, "[{} bytes]", bytes.len()),
            Self::Version { major, minor } => write!(f, "{major}.{minor}"),
        }
    }
}
