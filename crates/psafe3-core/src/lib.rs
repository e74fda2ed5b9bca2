//! # psafe3-core: Password Safe V3 database codec
//!
//! Reads, mutates and writes `.psafe3` files: an authenticated, encrypted,
//! tag-length-value container of password records.
//!
//! ## Layers
//!
//! | Layer     | Module       | Concern                                        |
//! |-----------|--------------|------------------------------------------------|
//! | Keying    | [`keys`]     | SHA-256 key stretch, password check, key wrap  |
//! | Framing   | [`body`]     | Twofish-CBC blocks between preamble and sentinel |
//! | Fields    | [`field`]    | TLV framing, random filler, streaming HMAC     |
//! | Model     | [`model`]    | Typed header fields and password records       |
//! | Dedup     | [`dedup`]    | Content-hash collapse and UUID repair          |
//!
//! ## Example
//!
//! ```rust
//! use psafe3_core::{types::record, FieldValue, PasswordRecord, Uuid, V3File};
//!
//! # fn main() -> psafe3_core::Result<()> {
//! let mut entry = PasswordRecord::new();
//! entry.fields.insert(record::UUID, FieldValue::Uuid(Uuid::from_bytes([7; 16])));
//! entry.fields.insert(record::TITLE, FieldValue::Text("mail".into()));
//! entry.fields.insert(record::PASSWORD, FieldValue::Text("s3cret".into()));
//!
//! let file = V3File { headers: Vec::new(), records: vec![entry] };
//!
//! let mut buf = Vec::new();
//! file.write_to(&mut buf, "master password")?;
//!
//! let restored = V3File::read_from(buf.as_slice(), "master password")?;
//! assert_eq!(restored, file);
//! # Ok(())
//! # }
//! ```
//!
//! ## Non-determinism
//!
//! Every encoding draws a fresh salt, IV, working keys and block filler, so
//! the bytes differ run to run while the decoded content is identical.
//! Compare databases semantically, never byte for byte.

pub mod body;
pub mod codec;
pub mod dedup;
pub mod error;
pub mod field;
pub mod keys;
pub mod model;
pub mod preamble;
pub mod types;
pub mod value;

pub use codec::DEFAULT_ITERATIONS;
pub use dedup::{dedup, DedupStats};
pub use error::{PsafeError, Result};
pub use model::{HeaderRecord, PasswordRecord, V3File};
pub use uuid::Uuid;
pub use value::FieldValue;
