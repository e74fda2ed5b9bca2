//! Collapse duplicate password records.

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;
use tracing::debug;
use uuid::{Builder, Uuid};

use crate::model::V3File;
use crate::types::record;
use crate::value::FieldValue;

/// What a dedup pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DedupStats {
    pub total_input: usize,
    pub unique_output: usize,
    pub uuids_fixed: usize,
}

/// Collapse records with identical content hashes, then repair UUID
/// collisions among the survivors.
///
/// The first record with a given content hash wins and keeps its place in
/// the file order; later copies are dropped. The repair pass keeps the
/// first occurrence of each UUID and re-identifies later collisions with a
/// fresh random v4 UUID, so churn is limited to records that actually
/// collide. Records with no UUID field are left untouched.
pub fn dedup(file: &V3File) -> (V3File, DedupStats) {
    dedup_with_rng(file, &mut rand::thread_rng())
}

/// [`dedup`] with a caller-supplied RNG for the UUID repair, which makes
/// the whole operation deterministic under a seeded generator.
pub fn dedup_with_rng<R: Rng>(file: &V3File, rng: &mut R) -> (V3File, DedupStats) {
    let total_input = file.records.len();

    let mut seen_hashes = HashSet::new();
    let mut survivors = Vec::new();
    for rec in &file.records {
        if seen_hashes.insert(rec.content_hash()) {
            survivors.push(rec.clone());
        }
    }

    let mut seen_uuids: HashSet<Uuid> = HashSet::new();
    let mut uuids_fixed = 0;
    for rec in &mut survivors {
        let Some(id) = rec.uuid() else { continue };
        if seen_uuids.insert(id) {
            continue;
        }
        loop {
            let fresh = Builder::from_random_bytes(rng.gen()).into_uuid();
            if seen_uuids.insert(fresh) {
                rec.fields.insert(record::UUID, FieldValue::Uuid(fresh));
                uuids_fixed += 1;
                break;
            }
        }
    }

    let stats = DedupStats {
        total_input,
        unique_output: survivors.len(),
        uuids_fixed,
    };
    debug!(?stats, "deduplication pass complete");

    (
        V3File {
            headers: file.headers.clone(),
            records: survivors,
        },
        stats,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PasswordRecord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry(uuid_byte: u8, username: &str, password: &str) -> PasswordRecord {
        let mut rec = PasswordRecord::new();
        rec.fields.insert(
            record::UUID,
            FieldValue::Uuid(Uuid::from_bytes([uuid_byte; 16])),
        );
        rec.fields
            .insert(record::USERNAME, FieldValue::Text(username.into()));
        rec.fields
            .insert(record::PASSWORD, FieldValue::Text(password.into()));
        rec
    }

    #[test]
    fn repair_is_deterministic_under_a_seeded_rng() {
        let file = V3File {
            headers: Vec::new(),
            records: vec![entry(1, "a", "pw"), entry(1, "b", "pw")],
        };

        let (first, _) = dedup_with_rng(&file, &mut StdRng::seed_from_u64(7));
        let (second, _) = dedup_with_rng(&file, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn fresh_uuids_carry_version_4() {
        let file = V3File {
            headers: Vec::new(),
            records: vec![entry(1, "a", "pw"), entry(1, "b", "pw")],
        };
        let (out, stats) = dedup_with_rng(&file, &mut StdRng::seed_from_u64(0));
        assert_eq!(stats.uuids_fixed, 1);
        assert_eq!(out.records[1].uuid().unwrap().get_version_num(), 4);
    }

    #[test]
    fn records_without_uuid_are_left_alone() {
        let mut no_id = PasswordRecord::new();
        no_id
            .fields
            .insert(record::TITLE, FieldValue::Text("bare".into()));
        let file = V3File {
            headers: Vec::new(),
            records: vec![no_id.clone(), no_id.clone()],
        };

        let (out, stats) = dedup_with_rng(&file, &mut StdRng::seed_from_u64(0));
        assert_eq!(out.records, vec![no_id]);
        assert_eq!(stats.uuids_fixed, 0);
    }
}
