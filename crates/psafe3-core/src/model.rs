//! In-memory form of a decoded database.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::types::record;
use crate::value::FieldValue;

/// One typed field from the header block, order-preserving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
    pub type_code: u8,
    pub value: FieldValue,
}

/// One password entry: at most one value per field type. Later duplicates
/// on the wire overwrite earlier ones.
///
/// The map is ordered by type code, which fixes the field iteration order
/// for encoding and for [`content_hash`]: the same logical record always
/// hashes the same way.
///
/// [`content_hash`]: Self::content_hash
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordRecord {
    pub fields: BTreeMap<u8, FieldValue>,
}

impl PasswordRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uuid(&self) -> Option<Uuid> {
        self.fields.get(&record::UUID).and_then(FieldValue::as_uuid)
    }

    pub fn title(&self) -> Option<&str> {
        self.fields.get(&record::TITLE).and_then(FieldValue::as_text)
    }

    pub fn username(&self) -> Option<&str> {
        self.fields
            .get(&record::USERNAME)
            .and_then(FieldValue::as_text)
    }

    pub fn group(&self) -> Option<&str> {
        self.fields.get(&record::GROUP).and_then(FieldValue::as_text)
    }

    /// SHA-256 over the record's content: for each field in ascending
    /// type-code order, the type code byte followed by the field's wire
    /// payload. The UUID field is excluded, so records that differ only
    /// in identity hash the same.
    pub fn content_hash(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for (&type_code, value) in &self.fields {
            if type_code == record::UUID {
                continue;
            }
            hasher.update([type_code]);
            hasher.update(value.canonical_bytes());
        }
        hasher.finalize().into()
    }
}

/// A decoded database: the header block followed by password records, both
/// in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct V3File {
    pub headers: Vec<HeaderRecord>,
    pub records: Vec<PasswordRecord>,
}
