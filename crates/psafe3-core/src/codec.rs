//! Whole-database decode and encode.

use std::io::{Read, Write};

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::Result;
use crate::field::{FieldReader, FieldWriter};
use crate::keys::StretchedKey;
use crate::model::{HeaderRecord, PasswordRecord, V3File};
use crate::preamble::Preamble;
use crate::types::{header, record, END_OF_ENTRY};
use crate::value::FieldValue;

/// Stretch count used for freshly written databases.
pub const DEFAULT_ITERATIONS: u32 = 2048;

impl V3File {
    /// Decode a database from `reader`, verifying the password and, after
    /// the whole body has been read, the HMAC. Nothing is returned until
    /// both checks pass.
    pub fn read_from<R: Read>(mut reader: R, password: &str) -> Result<Self> {
        let preamble = Preamble::read_from(&mut reader)?;
        let stretched = StretchedKey::derive(password, &preamble.salt, preamble.iterations);
        stretched.verify(&preamble.stretched_key_hash)?;

        let cipher_key = stretched.unwrap_key(&preamble.wrapped_cipher_key);
        let mac_key = stretched.unwrap_key(&preamble.wrapped_mac_key);
        let mut fields = FieldReader::new(reader, &cipher_key, &preamble.iv, &mac_key);

        let mut headers = Vec::new();
        let mut records = Vec::new();
        // None while still in the header block; Some once the first
        // end-of-entry marker has closed it.
        let mut current: Option<PasswordRecord> = None;

        while let Some(field) = fields.next_field()? {
            if field.type_code == END_OF_ENTRY {
                if let Some(finished) = current.replace(PasswordRecord::new()) {
                    records.push(finished);
                }
                continue;
            }

            match current.as_mut() {
                None => headers.push(HeaderRecord {
                    type_code: field.type_code,
                    value: FieldValue::decode(header::kind(field.type_code), field.payload)?,
                }),
                Some(rec) => {
                    let value = FieldValue::decode(record::kind(field.type_code), field.payload)?;
                    rec.fields.insert(field.type_code, value);
                }
            }
        }

        // A record still open at the sentinel is only missing its trailing
        // end-of-entry marker; keep it rather than drop data.
        if let Some(open) = current {
            if !open.fields.is_empty() {
                records.push(open);
            }
        }

        fields.verify_mac()?;
        debug!(
            headers = headers.len(),
            records = records.len(),
            "database decoded and authenticated"
        );

        Ok(V3File { headers, records })
    }

    /// Encode the database to `writer` under `password`. Salt, IV and both
    /// working keys are drawn fresh; nothing key-related survives from any
    /// previous encoding of the same data.
    pub fn write_to<W: Write>(&self, mut writer: W, password: &str) -> Result<()> {
        let mut salt = [0u8; 32];
        OsRng.fill_bytes(&mut salt);
        let mut iv = [0u8; 16];
        OsRng.fill_bytes(&mut iv);
        let mut cipher_key = Zeroizing::new([0u8; 32]);
        OsRng.fill_bytes(cipher_key.as_mut());
        let mut mac_key = Zeroizing::new([0u8; 32]);
        OsRng.fill_bytes(mac_key.as_mut());

        let stretched = StretchedKey::derive(password, &salt, DEFAULT_ITERATIONS);
        let preamble = Preamble {
            salt,
            iterations: DEFAULT_ITERATIONS,
            stretched_key_hash: stretched.verification_hash(),
            wrapped_cipher_key: stretched.wrap_key(&cipher_key),
            wrapped_mac_key: stretched.wrap_key(&mac_key),
            iv,
        };
        preamble.write_to(&mut writer)?;

        let mut fields = FieldWriter::new(writer, &cipher_key, &iv, &mac_key);
        for h in &self.headers {
            fields.write_field(h.type_code, &h.value.encode(header::kind(h.type_code))?)?;
        }
        fields.write_field(END_OF_ENTRY, &[])?;

        for rec in &self.records {
            for (&type_code, value) in &rec.fields {
                fields.write_field(type_code, &value.encode(record::kind(type_code))?)?;
            }
            fields.write_field(END_OF_ENTRY, &[])?;
        }

        fields.finish()?;
        debug!(
            headers = self.headers.len(),
            records = self.records.len(),
            "database encoded"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record as rec_type;
    use uuid::Uuid;

    fn small_file() -> V3File {
        let mut entry = PasswordRecord::new();
        entry
            .fields
            .insert(rec_type::UUID, FieldValue::Uuid(Uuid::from_bytes([3; 16])));
        entry
            .fields
            .insert(rec_type::TITLE, FieldValue::Text("mail".into()));
        V3File {
            headers: vec![HeaderRecord {
                type_code: header::VERSION,
                value: FieldValue::Version { major: 3, minor: 0 },
            }],
            records: vec![entry],
        }
    }

    #[test]
    fn headers_only_database_roundtrips_without_phantom_records() {
        let file = V3File {
            headers: vec![HeaderRecord {
                type_code: header::DATABASE_NAME,
                value: FieldValue::Text("empty".into()),
            }],
            records: Vec::new(),
        };

        let mut buf = Vec::new();
        file.write_to(&mut buf, "pw").unwrap();
        let back = V3File::read_from(buf.as_slice(), "pw").unwrap();
        assert_eq!(back, file);
    }

    #[test]
    fn trailing_end_of_entry_does_not_create_an_empty_record() {
        let file = small_file();
        let mut buf = Vec::new();
        file.write_to(&mut buf, "pw").unwrap();
        let back = V3File::read_from(buf.as_slice(), "pw").unwrap();
        assert_eq!(back.records.len(), 1);
    }

    #[test]
    fn record_without_trailing_marker_is_still_committed() {
        // Hand-assemble a body where the final record is not closed by an
        // end-of-entry marker before the sentinel.
        let cipher_key = Zeroizing::new([0x51u8; 32]);
        let mac_key = Zeroizing::new([0x52u8; 32]);
        let iv = [0x53u8; 16];
        let mut salt = [0u8; 32];
        salt[0] = 1;

        let stretched = StretchedKey::derive("pw", &salt, DEFAULT_ITERATIONS);
        let preamble = Preamble {
            salt,
            iterations: DEFAULT_ITERATIONS,
            stretched_key_hash: stretched.verification_hash(),
            wrapped_cipher_key: stretched.wrap_key(&cipher_key),
            wrapped_mac_key: stretched.wrap_key(&mac_key),
            iv,
        };

        let mut buf = Vec::new();
        preamble.write_to(&mut buf).unwrap();
        let mut fields = FieldWriter::new(&mut buf, &cipher_key, &iv, &mac_key);
        fields.write_field(END_OF_ENTRY, &[]).unwrap(); // close headers
        fields.write_field(rec_type::TITLE, b"dangling").unwrap();
        fields.finish().unwrap(); // sentinel + MAC, no closing marker

        let back = V3File::read_from(buf.as_slice(), "pw").unwrap();
        assert_eq!(back.records.len(), 1);
        assert_eq!(back.records[0].title(), Some("dangling"));
    }
}
