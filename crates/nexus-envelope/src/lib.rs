//! # nexus-envelope — Extensible JSON Envelope Codec
//!
//! The wire envelope shared by every nexus DTO. Two generic mechanisms
//! compose here, and every entity and one-of response type in the
//! workspace is an instantiation of them:
//!
//! - **Extensible record codec** (`record.rs`, `unknown.rs`): wraps a
//!   structured entity with reserved metadata and an unknown-field bag.
//!   Encode merges known and unknown fields into one flat JSON object;
//!   decode splits an arbitrary object into known fields plus a residual
//!   bag of everything unrecognized.
//!
//! - **Discriminated union resolver** (`union.rs`): a closed set of
//!   payload shapes behind one logical slot. Decode resolves the matching
//!   variant by ordered structural probing with object-type identity
//!   checks; encode emits the bare variant payload.
//!
//! ## Key Design Points
//!
//! 1. **Entity independence.** Nothing here knows any field list. The
//!    declared schema arrives as static configuration through the
//!    [`Extensible`] trait's consts.
//!
//! 2. **Two serialization profiles per record.** The public struct is the
//!    lenient in-memory shape; a private derived wire struct is the
//!    strict output shape that always emits required-on-output keys.
//!
//! 3. **Sum types for one-of slots.** Exactly-one-populated and
//!    tag-agreement hold by construction; shape probing happens only on
//!    decode, where the source genuinely is untyped bytes.
//!
//! ## Crate Policy
//!
//! - No internal dependencies (leaf of the workspace DAG).
//! - No `unsafe` code, no `panic!()` or `.unwrap()` outside tests.
//! - Encode/decode are synchronous pure functions of their input; the
//!   crate owns no shared state and takes no locks.

pub mod error;
pub mod record;
pub mod union;
pub mod unknown;

pub use error::EnvelopeError;
pub use record::{
    decode, deserialize_record, encode, reserved_defaults, serialize_record, Extensible,
    FORMAT_VERSION_KEY, METADATA_KEYS, OBJECT_TYPE_KEY, RESERVED_KEY, UNKNOWN_FIELDS_KEY,
};
pub use union::{encode_slot, probe_list, probe_record, OneOf};
pub use unknown::UnknownFields;
