//! # Response Metadata DTOs — `common.v1.response`
//!
//! The paging and bookkeeping metadata every list response carries next
//! to its data slot. These records predate the v4 modules and keep their
//! own `v1.r0` format marker.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use nexus_envelope::{
    deserialize_record, reserved_defaults, serialize_record, Extensible, UnknownFields,
};

/// Format-version marker carried in `$reserved` by every
/// `common.v1` record.
pub const FORMAT_VERSION: &str = "v1.r0";

// ─── Flag ────────────────────────────────────────────────────────────

/// A named boolean capability flag attached to a response.
#[derive(Debug, Clone, PartialEq)]
pub struct Flag {
    /// Schema identity, `common.v1.config.Flag`.
    pub object_type: Option<String>,
    /// Reserved format-version bookkeeping.
    pub reserved: Option<Map<String, Value>>,
    /// Residual wire fields unknown to this schema.
    pub unknown_fields: UnknownFields,
    /// Flag name.
    pub name: Option<String>,
    /// Flag value.
    pub value: Option<bool>,
}

impl Flag {
    /// Create a flag with metadata defaults and no declared data.
    pub fn new() -> Self {
        Self {
            object_type: Some(Self::OBJECT_TYPE.to_owned()),
            reserved: Some(reserved_defaults(FORMAT_VERSION)),
            unknown_fields: UnknownFields::new(),
            name: None,
            value: None,
        }
    }

    /// Create a named flag with an explicit value.
    pub fn named(name: impl Into<String>, value: bool) -> Self {
        let mut flag = Self::new();
        flag.name = Some(name.into());
        flag.value = Some(value);
        flag
    }

    fn from_parts(wire: FlagWire, unknown_fields: UnknownFields) -> Self {
        let defaults = Self::new();
        Self {
            object_type: wire.object_type.or(defaults.object_type),
            reserved: wire.reserved.or(defaults.reserved),
            unknown_fields,
            name: wire.name,
            value: wire.value,
        }
    }
}

impl Default for Flag {
    fn default() -> Self {
        Self::new()
    }
}

impl Extensible for Flag {
    const OBJECT_TYPE: &'static str = "common.v1.config.Flag";
    const DECLARED_KEYS: &'static [&'static str] = &["name", "value"];

    fn object_type(&self) -> Option<&str> {
        self.object_type.as_deref()
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown_fields
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown_fields
    }
}

/// Declared-field wire profile for [`Flag`].
#[derive(Serialize, Deserialize)]
struct FlagWire {
    #[serde(
        rename = "$objectType",
        skip_serializing_if = "Option::is_none",
        default
    )]
    object_type: Option<String>,
    #[serde(rename = "$reserved", skip_serializing_if = "Option::is_none", default)]
    reserved: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    value: Option<bool>,
}

impl From<&Flag> for FlagWire {
    fn from(entity: &Flag) -> Self {
        Self {
            object_type: entity.object_type.clone(),
            reserved: entity.reserved.clone(),
            name: entity.name.clone(),
            value: entity.value,
        }
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_record(&FlagWire::from(self), &self.unknown_fields, serializer)
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (wire, unknown_fields) =
            deserialize_record::<FlagWire, _>(deserializer, Self::DECLARED_KEYS)?;
        Ok(Self::from_parts(wire, unknown_fields))
    }
}

// ─── ApiLink ─────────────────────────────────────────────────────────

/// A hypermedia link attached to a response (self, next, prev).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiLink {
    /// Schema identity, `common.v1.response.ApiLink`.
    pub object_type: Option<String>,
    /// Reserved format-version bookkeeping.
    pub reserved: Option<Map<String, Value>>,
    /// Residual wire fields unknown to this schema.
    pub unknown_fields: UnknownFields,
    /// Link target.
    pub href: Option<String>,
    /// Link relation.
    pub rel: Option<String>,
}

impl ApiLink {
    /// Create a link with metadata defaults and no declared data.
    pub fn new() -> Self {
        Self {
            object_type: Some(Self::OBJECT_TYPE.to_owned()),
            reserved: Some(reserved_defaults(FORMAT_VERSION)),
            unknown_fields: UnknownFields::new(),
            href: None,
            rel: None,
        }
    }

    fn from_parts(wire: ApiLinkWire, unknown_fields: UnknownFields) -> Self {
        let defaults = Self::new();
        Self {
            object_type: wire.object_type.or(defaults.object_type),
            reserved: wire.reserved.or(defaults.reserved),
            unknown_fields,
            href: wire.href,
            rel: wire.rel,
        }
    }
}

impl Default for ApiLink {
    fn default() -> Self {
        Self::new()
    }
}

impl Extensible for ApiLink {
    const OBJECT_TYPE: &'static str = "common.v1.response.ApiLink";
    const DECLARED_KEYS: &'static [&'static str] = &["href", "rel"];

    fn object_type(&self) -> Option<&str> {
        self.object_type.as_deref()
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown_fields
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown_fields
    }
}

/// Declared-field wire profile for [`ApiLink`].
#[derive(Serialize, Deserialize)]
struct ApiLinkWire {
    #[serde(
        rename = "$objectType",
        skip_serializing_if = "Option::is_none",
        default
    )]
    object_type: Option<String>,
    #[serde(rename = "$reserved", skip_serializing_if = "Option::is_none", default)]
    reserved: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    rel: Option<String>,
}

impl From<&ApiLink> for ApiLinkWire {
    fn from(entity: &ApiLink) -> Self {
        Self {
            object_type: entity.object_type.clone(),
            reserved: entity.reserved.clone(),
            href: entity.href.clone(),
            rel: entity.rel.clone(),
        }
    }
}

impl Serialize for ApiLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_record(&ApiLinkWire::from(self), &self.unknown_fields, serializer)
    }
}

impl<'de> Deserialize<'de> for ApiLink {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (wire, unknown_fields) =
            deserialize_record::<ApiLinkWire, _>(deserializer, Self::DECLARED_KEYS)?;
        Ok(Self::from_parts(wire, unknown_fields))
    }
}

// ─── ApiResponseMetadata ─────────────────────────────────────────────

/// Paging and bookkeeping metadata for a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponseMetadata {
    /// Schema identity, `common.v1.response.ApiResponseMetadata`.
    pub object_type: Option<String>,
    /// Reserved format-version bookkeeping.
    pub reserved: Option<Map<String, Value>>,
    /// Residual wire fields unknown to this schema.
    pub unknown_fields: UnknownFields,
    /// Capability flags.
    pub flags: Option<Vec<Flag>>,
    /// Hypermedia links.
    pub links: Option<Vec<ApiLink>>,
    /// Total results available across all pages.
    pub total_available_results: Option<i64>,
}

impl ApiResponseMetadata {
    /// Create metadata with defaults and no declared data.
    pub fn new() -> Self {
        Self {
            object_type: Some(Self::OBJECT_TYPE.to_owned()),
            reserved: Some(reserved_defaults(FORMAT_VERSION)),
            unknown_fields: UnknownFields::new(),
            flags: None,
            links: None,
            total_available_results: None,
        }
    }

    fn from_parts(wire: ApiResponseMetadataWire, unknown_fields: UnknownFields) -> Self {
        let defaults = Self::new();
        Self {
            object_type: wire.object_type.or(defaults.object_type),
            reserved: wire.reserved.or(defaults.reserved),
            unknown_fields,
            flags: wire.flags,
            links: wire.links,
            total_available_results: wire.total_available_results,
        }
    }
}

impl Default for ApiResponseMetadata {
    fn default() -> Self {
        Self::new()
    }
}

impl Extensible for ApiResponseMetadata {
    const OBJECT_TYPE: &'static str = "common.v1.response.ApiResponseMetadata";
    const DECLARED_KEYS: &'static [&'static str] = &["flags", "links", "totalAvailableResults"];

    fn object_type(&self) -> Option<&str> {
        self.object_type.as_deref()
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown_fields
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown_fields
    }
}

/// Declared-field wire profile for [`ApiResponseMetadata`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponseMetadataWire {
    #[serde(
        rename = "$objectType",
        skip_serializing_if = "Option::is_none",
        default
    )]
    object_type: Option<String>,
    #[serde(rename = "$reserved", skip_serializing_if = "Option::is_none", default)]
    reserved: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    flags: Option<Vec<Flag>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    links: Option<Vec<ApiLink>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    total_available_results: Option<i64>,
}

impl From<&ApiResponseMetadata> for ApiResponseMetadataWire {
    fn from(entity: &ApiResponseMetadata) -> Self {
        Self {
            object_type: entity.object_type.clone(),
            reserved: entity.reserved.clone(),
            flags: entity.flags.clone(),
            links: entity.links.clone(),
            total_available_results: entity.total_available_results,
        }
    }
}

impl Serialize for ApiResponseMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_record(
            &ApiResponseMetadataWire::from(self),
            &self.unknown_fields,
            serializer,
        )
    }
}

impl<'de> Deserialize<'de> for ApiResponseMetadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (wire, unknown_fields) =
            deserialize_record::<ApiResponseMetadataWire, _>(deserializer, Self::DECLARED_KEYS)?;
        Ok(Self::from_parts(wire, unknown_fields))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
