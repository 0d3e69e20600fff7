//! # Envelope Error Taxonomy
//!
//! The failure modes of the envelope codec. Every failure here is
//! deterministic given the same input — there is no transient class and
//! nothing warrants a retry. Errors are returned to the immediate caller;
//! translating them into user-visible messages or status codes is the
//! caller's concern.

use thiserror::Error;

/// Failures surfaced by envelope encode and decode.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// The payload is not parseable JSON, a declared field decoded to an
    /// incompatible shape, or a wire profile failed to serialize.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The top level of the payload is not a JSON object.
    #[error("expected a JSON object, found {found}")]
    NotAnObject {
        /// The JSON kind actually found.
        found: &'static str,
    },

    /// No variant of a one-of slot matched the payload.
    ///
    /// The only decode failure driven by semantic mismatch rather than
    /// syntax: the payload parsed, but its shape and object-type tag
    /// identified none of the slot's variants.
    #[error("unable to resolve one-of value for {slot}")]
    UnresolvableUnion {
        /// Name of the slot that failed to resolve.
        slot: &'static str,
    },

    /// A one-of slot held no value at encode time.
    #[error("no value to marshal for {slot}")]
    NothingToMarshal {
        /// Name of the empty slot.
        slot: &'static str,
    },
}
