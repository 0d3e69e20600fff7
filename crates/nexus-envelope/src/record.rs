//! # Extensible Record Codec
//!
//! Lossless round-trip of a record through JSON: declared fields travel
//! through a derived wire profile, everything else through the
//! unknown-field bag.
//!
//! ## Wire Contract
//!
//! Every record owns three reserved top-level keys: `$objectType` (schema
//! identity), `$reserved` (format-version bookkeeping), and
//! `$unknownFields`. The third is in-memory only — the bag's contents are
//! flattened into the top level on encode and the key itself never
//! appears on the wire. Entity-specific keys follow each record's declared
//! field names verbatim.
//!
//! ## Two Serialization Profiles
//!
//! Each record has two shapes. The public struct is the lenient in-memory
//! profile that application code reads and mutates. The private derived
//! wire struct is the strict output profile: absent optional fields are
//! omitted, while required-on-output fields are emitted unconditionally —
//! as `null` when unset — so missing required data surfaces as a visible
//! null rather than a silent omission.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::EnvelopeError;
use crate::unknown::UnknownFields;

/// Wire key carrying the schema identity of a record.
pub const OBJECT_TYPE_KEY: &str = "$objectType";

/// Wire key carrying reserved format-version bookkeeping.
pub const RESERVED_KEY: &str = "$reserved";

/// In-memory key of the unknown-field bag. Never emitted.
pub const UNKNOWN_FIELDS_KEY: &str = "$unknownFields";

/// Key of the format-version marker inside `$reserved`.
pub const FORMAT_VERSION_KEY: &str = "$fv";

/// The three reserved metadata keys every record owns.
pub const METADATA_KEYS: [&str; 3] = [OBJECT_TYPE_KEY, RESERVED_KEY, UNKNOWN_FIELDS_KEY];

/// Build the default `$reserved` map carrying a module's format-version
/// marker. Embedded in each record's constructor; never process state.
pub fn reserved_defaults(format_version: &str) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(
        FORMAT_VERSION_KEY.to_owned(),
        Value::String(format_version.to_owned()),
    );
    map
}

/// Static schema configuration and bag access for an extensible record.
///
/// The declared-field schema is supplied as configuration, not computed:
/// `DECLARED_KEYS` lists the wire keys of the declared fields (metadata
/// keys excluded), and `OBJECT_TYPE` names the concrete schema. The codec
/// functions in this module are generic over any implementor — they know
/// nothing about any particular field list.
pub trait Extensible {
    /// Canonical schema name carried in `$objectType`.
    const OBJECT_TYPE: &'static str;

    /// Wire keys of the declared fields, excluding the metadata keys.
    const DECLARED_KEYS: &'static [&'static str];

    /// The schema identity currently carried by this instance.
    fn object_type(&self) -> Option<&str>;

    /// The residual wire fields captured by the last decode.
    fn unknown_fields(&self) -> &UnknownFields;

    /// Mutable access to the residual bag.
    fn unknown_fields_mut(&mut self) -> &mut UnknownFields;
}

/// Encode a record into a single flat JSON object.
///
/// Serializes the wire profile, strips the bag's own key, then folds the
/// bag into the top level. Declared fields win on key collision — a bag
/// entry can never overwrite a key the profile emitted.
///
/// # Errors
///
/// Fails if the wire profile does not serialize, or serializes to
/// something other than an object. Both are programmer/data errors, not
/// expected at steady state.
pub fn encode<W: Serialize>(wire: &W, unknown: &UnknownFields) -> Result<Value, EnvelopeError> {
    let mut object = into_object(serde_json::to_value(wire)?)?;
    object.remove(UNKNOWN_FIELDS_KEY);
    for (key, value) in unknown.iter() {
        object.entry(key.clone()).or_insert_with(|| value.clone());
    }
    Ok(Value::Object(object))
}

/// Decode an arbitrary JSON object into a wire profile plus the residual
/// unknown-field bag.
///
/// The generic map parsed from the full payload is the authoritative
/// source for unknown-field detection; the profile parse independently
/// ignores extra keys. Every metadata key and declared wire key is
/// deleted from the map, and whatever remains becomes the bag verbatim.
/// A payload containing only unknown fields is valid: the profile decodes
/// to all-absent and the bag carries everything.
///
/// # Errors
///
/// Fails if the payload is not a JSON object or if a declared field
/// decodes to an incompatible shape. No partial result is produced.
pub fn decode<W>(value: Value, declared_keys: &[&str]) -> Result<(W, UnknownFields), EnvelopeError>
where
    W: DeserializeOwned,
{
    let mut object = into_object(value)?;
    let wire: W = serde_json::from_value(Value::Object(object.clone()))?;
    for key in METADATA_KEYS {
        object.remove(key);
    }
    for key in declared_keys {
        object.remove(*key);
    }
    if !object.is_empty() {
        tracing::trace!(residual = object.len(), "captured unknown wire fields");
    }
    Ok((wire, UnknownFields::from(object)))
}

/// Bridge for `Serialize` impls: encode through the envelope and hand the
/// flat object to the serializer.
pub fn serialize_record<W, S>(
    wire: &W,
    unknown: &UnknownFields,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    W: Serialize,
    S: Serializer,
{
    let value = encode(wire, unknown).map_err(serde::ser::Error::custom)?;
    value.serialize(serializer)
}

/// Bridge for `Deserialize` impls: buffer the payload as a value tree and
/// split it through the envelope.
pub fn deserialize_record<'de, W, D>(
    deserializer: D,
    declared_keys: &[&str],
) -> Result<(W, UnknownFields), D::Error>
where
    W: DeserializeOwned,
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    decode(value, declared_keys).map_err(serde::de::Error::custom)
}

fn into_object(value: Value) -> Result<Map<String, Value>, EnvelopeError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(EnvelopeError::NotAnObject {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
