//! # nexus-models — Wire DTO Catalogue
//!
//! The concrete records of the nexus v4 item service, each an
//! instantiation of the `nexus-envelope` codec pattern:
//!
//! - **Config** (`config.rs`): `Item`, `Location`, `Country`, and the
//!   `ListItemsApiResponse` envelope whose `data` slot resolves between
//!   an item page and an error body.
//!
//! - **Error** (`error.rs`): `ErrorResponse` and its own one-of `error`
//!   slot over application messages or a schema-validation report.
//!
//! - **Response** (`response.rs`): the `common.v1.response` paging and
//!   bookkeeping metadata attached to list responses.
//!
//! ## Crate Policy
//!
//! - Every record carries `$objectType`, `$reserved`, and an in-memory
//!   unknown-field bag; constructors establish the defaults.
//! - Field lists here are mechanical restatements of the service schema.
//!   All encode/decode semantics live in `nexus-envelope` — nothing in
//!   this crate hand-rolls JSON handling.

pub mod config;
pub mod error;
pub mod response;

// ─── Config re-exports ──────────────────────────────────────────────

pub use config::{Country, Item, ListItemsApiResponse, ListItemsData, Location};

// ─── Error re-exports ───────────────────────────────────────────────

pub use error::{
    AppMessage, ErrorDetail, ErrorResponse, MessageSeverity, SchemaValidationError,
    SchemaValidationErrorDetail,
};

// ─── Response re-exports ────────────────────────────────────────────

pub use response::{ApiLink, ApiResponseMetadata, Flag};
