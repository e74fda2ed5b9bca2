//! Deduplication behavior over whole databases.

use psafe3_core::dedup::{dedup, dedup_with_rng};
use psafe3_core::types::record;
use psafe3_core::{FieldValue, PasswordRecord, Uuid, V3File};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn entry(uuid: Uuid, username: &str, password: &str) -> PasswordRecord {
    let mut rec = PasswordRecord::new();
    rec.fields.insert(record::UUID, FieldValue::Uuid(uuid));
    rec.fields
        .insert(record::USERNAME, FieldValue::Text(username.into()));
    rec.fields
        .insert(record::PASSWORD, FieldValue::Text(password.into()));
    rec
}

fn uuid(byte: u8) -> Uuid {
    Uuid::from_bytes([byte; 16])
}

#[test]
fn same_content_different_uuids_collapse_without_repair() {
    let file = V3File {
        headers: Vec::new(),
        records: vec![entry(uuid(1), "user", "pw"), entry(uuid(2), "user", "pw")],
    };

    let (out, stats) = dedup(&file);
    assert_eq!(out.records.len(), 1);
    assert_eq!(stats.total_input, 2);
    assert_eq!(stats.unique_output, 1);
    assert_eq!(stats.uuids_fixed, 0);
    // First occurrence wins, identity included.
    assert_eq!(out.records[0].uuid(), Some(uuid(1)));
}

#[test]
fn identical_records_collapse_without_repair() {
    let file = V3File {
        headers: Vec::new(),
        records: vec![entry(uuid(1), "user", "pw"), entry(uuid(1), "user", "pw")],
    };

    let (out, stats) = dedup(&file);
    assert_eq!(out.records.len(), 1);
    assert_eq!(stats.uuids_fixed, 0);
}

#[test]
fn surviving_uuid_collision_is_repaired() {
    // Three records, two distinct contents, and the survivors share a UUID.
    let file = V3File {
        headers: Vec::new(),
        records: vec![
            entry(uuid(1), "user", "pw"),
            entry(uuid(2), "user", "pw"),
            entry(uuid(1), "other", "pw2"),
        ],
    };

    let (out, stats) = dedup_with_rng(&file, &mut StdRng::seed_from_u64(42));
    assert_eq!(stats.total_input, 3);
    assert_eq!(stats.unique_output, 2);
    assert_eq!(stats.uuids_fixed, 1);

    // The first holder keeps its UUID; the collision gets a fresh one.
    assert_eq!(out.records[0].uuid(), Some(uuid(1)));
    let repaired = out.records[1].uuid().unwrap();
    assert_ne!(repaired, uuid(1));

    // Only the UUID moved; content is untouched.
    assert_eq!(out.records[1].username(), Some("other"));
    assert_eq!(out.records[1].content_hash(), file.records[2].content_hash());
}

#[test]
fn dedup_is_idempotent() {
    let file = V3File {
        headers: Vec::new(),
        records: vec![
            entry(uuid(1), "a", "pw"),
            entry(uuid(2), "a", "pw"),
            entry(uuid(1), "b", "pw"),
            entry(uuid(3), "c", "pw"),
        ],
    };

    let (once, _) = dedup_with_rng(&file, &mut StdRng::seed_from_u64(1));
    let (twice, stats) = dedup_with_rng(&once, &mut StdRng::seed_from_u64(2));
    assert_eq!(twice.records, once.records);
    assert_eq!(stats.uuids_fixed, 0);
}

#[test]
fn survivors_come_from_the_input() {
    let file = V3File {
        headers: Vec::new(),
        records: vec![
            entry(uuid(1), "a", "pw"),
            entry(uuid(2), "b", "pw"),
            entry(uuid(3), "a", "pw"),
        ],
    };

    let (out, _) = dedup_with_rng(&file, &mut StdRng::seed_from_u64(5));
    for survivor in &out.records {
        assert!(
            file.records
                .iter()
                .any(|original| original.content_hash() == survivor.content_hash()),
            "dedup introduced content not present in the input"
        );
    }
}

#[test]
fn headers_pass_through_unchanged() {
    use psafe3_core::types::header;
    use psafe3_core::HeaderRecord;

    let file = V3File {
        headers: vec![HeaderRecord {
            type_code: header::DATABASE_NAME,
            value: FieldValue::Text("vault".into()),
        }],
        records: vec![entry(uuid(1), "a", "pw"), entry(uuid(2), "a", "pw")],
    };

    let (out, _) = dedup(&file);
    assert_eq!(out.headers, file.headers);
}

#[test]
fn dedup_roundtrips_through_the_codec() {
    let file = V3File {
        headers: Vec::new(),
        records: vec![
            entry(uuid(1), "user", "pw"),
            entry(uuid(2), "user", "pw"),
            entry(uuid(9), "unique", "pw"),
        ],
    };

    let (deduped, stats) = dedup(&file);
    assert_eq!(stats.unique_output, 2);

    let mut buf = Vec::new();
    deduped.write_to(&mut buf, "pw").unwrap();
    let restored = V3File::read_from(buf.as_slice(), "pw").unwrap();
    assert_eq!(restored, deduped);
}
