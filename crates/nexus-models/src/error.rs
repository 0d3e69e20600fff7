//! # Error Body DTOs — `nexus.v4.error`
//!
//! The error payloads a nexus response can carry in place of its data:
//! the `ErrorResponse` envelope, whose own `error` slot is a one-of
//! between a list of application messages and a schema-validation
//! report. The nesting makes this module the second full instantiation
//! of the union resolver — an error body inside a response data slot can
//! itself hold a resolved union.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use nexus_envelope::{
    deserialize_record, encode_slot, probe_list, probe_record, reserved_defaults,
    serialize_record, EnvelopeError, Extensible, OneOf, UnknownFields,
};

/// Format-version marker carried in `$reserved` by every
/// `nexus.v4.error` record.
pub const FORMAT_VERSION: &str = "v4.r1";

// ─── Message Severity ────────────────────────────────────────────────

/// Severity of an application message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageSeverity {
    /// Informational message.
    #[serde(rename = "INFO")]
    Info,
    /// Recoverable warning.
    #[serde(rename = "WARNING")]
    Warning,
    /// Operation-failing error.
    #[serde(rename = "ERROR")]
    Error,
}

impl std::fmt::Display for MessageSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        };
        f.write_str(s)
    }
}

// ─── AppMessage ──────────────────────────────────────────────────────

/// A single application-level message inside an error body.
#[derive(Debug, Clone, PartialEq)]
pub struct AppMessage {
    /// Schema identity, `nexus.v4.error.AppMessage`.
    pub object_type: Option<String>,
    /// Reserved format-version bookkeeping.
    pub reserved: Option<Map<String, Value>>,
    /// Residual wire fields unknown to this schema.
    pub unknown_fields: UnknownFields,
    /// Service-scoped message code.
    pub code: Option<String>,
    /// Logical grouping of related message codes.
    pub error_group: Option<String>,
    /// Locale the message text is rendered in.
    pub locale: Option<String>,
    /// Human-readable message text.
    pub message: Option<String>,
    /// Message severity.
    pub severity: Option<MessageSeverity>,
}

impl AppMessage {
    /// Create a message with metadata defaults and no declared data.
    pub fn new() -> Self {
        Self {
            object_type: Some(Self::OBJECT_TYPE.to_owned()),
            reserved: Some(reserved_defaults(FORMAT_VERSION)),
            unknown_fields: UnknownFields::new(),
            code: None,
            error_group: None,
            locale: None,
            message: None,
            severity: None,
        }
    }

    fn from_parts(wire: AppMessageWire, unknown_fields: UnknownFields) -> Self {
        let defaults = Self::new();
        Self {
            object_type: wire.object_type.or(defaults.object_type),
            reserved: wire.reserved.or(defaults.reserved),
            unknown_fields,
            code: wire.code,
            error_group: wire.error_group,
            locale: wire.locale,
            message: wire.message,
            severity: wire.severity,
        }
    }
}

impl Default for AppMessage {
    fn default() -> Self {
        Self::new()
    }
}

impl Extensible for AppMessage {
    const OBJECT_TYPE: &'static str = "nexus.v4.error.AppMessage";
    const DECLARED_KEYS: &'static [&'static str] =
        &["code", "errorGroup", "locale", "message", "severity"];

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

/// Declared-field wire profile for [`AppMessage`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppMessageWire {
    #[serde(
        rename = "$objectType",
        skip_serializing_if = "Option::is_none",
        default
    )]
    object_type: Option<String>,
    #[serde(rename = "$reserved", skip_serializing_if = "Option::is_none", default)]
    reserved: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    error_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    severity: Option<MessageSeverity>,
}

impl From<&AppMessage> for AppMessageWire {
    fn from(entity: &AppMessage) -> Self {
        Self {
            object_type: entity.object_type.clone(),
            reserved: entity.reserved.clone(),
            code: entity.code.clone(),
            error_group: entity.error_group.clone(),
            locale: entity.locale.clone(),
            message: entity.message.clone(),
            severity: entity.severity,
        }
    }
}

impl Serialize for AppMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_record(&AppMessageWire::from(self), &self.unknown_fields, serializer)
    }
}

impl<'de> Deserialize<'de> for AppMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (wire, unknown_fields) =
            deserialize_record::<AppMessageWire, _>(deserializer, Self::DECLARED_KEYS)?;
        Ok(Self::from_parts(wire, unknown_fields))
    }
}

// ─── SchemaValidationErrorDetail ─────────────────────────────────────

/// A single attribute-level finding inside a schema-validation report.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaValidationErrorDetail {
    /// Schema identity, `nexus.v4.error.SchemaValidationErrorDetail`.
    pub object_type: Option<String>,
    /// Reserved format-version bookkeeping.
    pub reserved: Option<Map<String, Value>>,
    /// Residual wire fields unknown to this schema.
    pub unknown_fields: UnknownFields,
    /// Dotted path of the violating attribute.
    pub attribute_path: Option<String>,
    /// What the attribute violated.
    pub message: Option<String>,
}

impl SchemaValidationErrorDetail {
    /// Create a detail with metadata defaults and no declared data.
    pub fn new() -> Self {
        Self {
            object_type: Some(Self::OBJECT_TYPE.to_owned()),
            reserved: Some(reserved_defaults(FORMAT_VERSION)),
            unknown_fields: UnknownFields::new(),
            attribute_path: None,
            message: None,
        }
    }

    fn from_parts(wire: SchemaValidationErrorDetailWire, unknown_fields: UnknownFields) -> Self {
        let defaults = Self::new();
        Self {
            object_type: wire.object_type.or(defaults.object_type),
            reserved: wire.reserved.or(defaults.reserved),
            unknown_fields,
            attribute_path: wire.attribute_path,
            message: wire.message,
        }
    }
}

impl Default for SchemaValidationErrorDetail {
    fn default() -> Self {
        Self::new()
    }
}

impl Extensible for SchemaValidationErrorDetail {
    const OBJECT_TYPE: &'static str = "nexus.v4.error.SchemaValidationErrorDetail";
    const DECLARED_KEYS: &'static [&'static str] = &["attributePath", "message"];

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

/// Declared-field wire profile for [`SchemaValidationErrorDetail`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaValidationErrorDetailWire {
    #[serde(
        rename = "$objectType",
        skip_serializing_if = "Option::is_none",
        default
    )]
    object_type: Option<String>,
    #[serde(rename = "$reserved", skip_serializing_if = "Option::is_none", default)]
    reserved: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    attribute_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    message: Option<String>,
}

impl From<&SchemaValidationErrorDetail> for SchemaValidationErrorDetailWire {
    fn from(entity: &SchemaValidationErrorDetail) -> Self {
        Self {
            object_type: entity.object_type.clone(),
            reserved: entity.reserved.clone(),
            attribute_path: entity.attribute_path.clone(),
            message: entity.message.clone(),
        }
    }
}

impl Serialize for SchemaValidationErrorDetail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_record(
            &SchemaValidationErrorDetailWire::from(self),
            &self.unknown_fields,
            serializer,
        )
    }
}

impl<'de> Deserialize<'de> for SchemaValidationErrorDetail {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (wire, unknown_fields) = deserialize_record::<SchemaValidationErrorDetailWire, _>(
            deserializer,
            Self::DECLARED_KEYS,
        )?;
        Ok(Self::from_parts(wire, unknown_fields))
    }
}

// ─── SchemaValidationError ───────────────────────────────────────────

/// A schema-validation report: the request body failed structural
/// validation before the operation ran.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaValidationError {
    /// Schema identity, `nexus.v4.error.SchemaValidationError`.
    pub object_type: Option<String>,
    /// Reserved format-version bookkeeping.
    pub reserved: Option<Map<String, Value>>,
    /// Residual wire fields unknown to this schema.
    pub unknown_fields: UnknownFields,
    /// Summary of the validation failure.
    pub message: Option<String>,
    /// Attribute-level findings.
    pub details: Option<Vec<SchemaValidationErrorDetail>>,
}

impl SchemaValidationError {
    /// Create a report with metadata defaults and no declared data.
    pub fn new() -> Self {
        Self {
            object_type: Some(Self::OBJECT_TYPE.to_owned()),
            reserved: Some(reserved_defaults(FORMAT_VERSION)),
            unknown_fields: UnknownFields::new(),
            message: None,
            details: None,
        }
    }

    fn from_parts(wire: SchemaValidationErrorWire, unknown_fields: UnknownFields) -> Self {
        let defaults = Self::new();
        Self {
            object_type: wire.object_type.or(defaults.object_type),
            reserved: wire.reserved.or(defaults.reserved),
            unknown_fields,
            message: wire.message,
            details: wire.details,
        }
    }
}

impl Default for SchemaValidationError {
    fn default() -> Self {
        Self::new()
    }
}

impl Extensible for SchemaValidationError {
    const OBJECT_TYPE: &'static str = "nexus.v4.error.SchemaValidationError";
    const DECLARED_KEYS: &'static [&'static str] = &["details", "message"];

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

/// Declared-field wire profile for [`SchemaValidationError`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaValidationErrorWire {
    #[serde(
        rename = "$objectType",
        skip_serializing_if = "Option::is_none",
        default
    )]
    object_type: Option<String>,
    #[serde(rename = "$reserved", skip_serializing_if = "Option::is_none", default)]
    reserved: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    details: Option<Vec<SchemaValidationErrorDetail>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    message: Option<String>,
}

impl From<&SchemaValidationError> for SchemaValidationErrorWire {
    fn from(entity: &SchemaValidationError) -> Self {
        Self {
            object_type: entity.object_type.clone(),
            reserved: entity.reserved.clone(),
            details: entity.details.clone(),
            message: entity.message.clone(),
        }
    }
}

impl Serialize for SchemaValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_record(
            &SchemaValidationErrorWire::from(self),
            &self.unknown_fields,
            serializer,
        )
    }
}

impl<'de> Deserialize<'de> for SchemaValidationError {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (wire, unknown_fields) =
            deserialize_record::<SchemaValidationErrorWire, _>(deserializer, Self::DECLARED_KEYS)?;
        Ok(Self::from_parts(wire, unknown_fields))
    }
}

// ─── ErrorDetail one-of ──────────────────────────────────────────────

/// The `error` slot of an [`ErrorResponse`]: application messages, or a
/// schema-validation report.
///
/// Variant order is load-bearing on decode: the message-list variant is
/// probed first so an empty JSON array lands there, and the validation
/// report is never validly array-shaped.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    /// One or more application messages.
    AppMessages(Vec<AppMessage>),
    /// A schema-validation report.
    SchemaValidation(SchemaValidationError),
}

impl ErrorDetail {
    /// Discriminator tag of the message-list variant.
    pub const APP_MESSAGES_TAG: &'static str = "List<nexus.v4.error.AppMessage>";

    /// The held messages, if the list variant is populated.
    pub fn as_app_messages(&self) -> Option<&[AppMessage]> {
        match self {
            Self::AppMessages(messages) => Some(messages),
            _ => None,
        }
    }

    /// The held validation report, if that variant is populated.
    pub fn as_schema_validation(&self) -> Option<&SchemaValidationError> {
        match self {
            Self::SchemaValidation(report) => Some(report),
            _ => None,
        }
    }
}

impl From<Vec<AppMessage>> for ErrorDetail {
    fn from(messages: Vec<AppMessage>) -> Self {
        Self::AppMessages(messages)
    }
}

impl From<SchemaValidationError> for ErrorDetail {
    fn from(report: SchemaValidationError) -> Self {
        Self::SchemaValidation(report)
    }
}

impl OneOf for ErrorDetail {
    const SLOT: &'static str = "ErrorResponse.error";

    fn discriminator(&self) -> &'static str {
        match self {
            Self::AppMessages(_) => Self::APP_MESSAGES_TAG,
            Self::SchemaValidation(_) => SchemaValidationError::OBJECT_TYPE,
        }
    }

    fn resolve(value: &Value) -> Result<Self, EnvelopeError> {
        if let Some(messages) = probe_list::<AppMessage>(value) {
            return Ok(Self::AppMessages(messages));
        }
        if let Some(report) = probe_record::<SchemaValidationError>(value) {
            return Ok(Self::SchemaValidation(report));
        }
        Err(EnvelopeError::UnresolvableUnion { slot: Self::SLOT })
    }

    fn to_wire(&self) -> Result<Value, EnvelopeError> {
        let value = match self {
            Self::AppMessages(messages) => serde_json::to_value(messages)?,
            Self::SchemaValidation(report) => serde_json::to_value(report)?,
        };
        Ok(value)
    }
}

impl Serialize for ErrorDetail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ErrorDetail {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::resolve(&value).map_err(serde::de::Error::custom)
    }
}

// ─── ErrorResponse ───────────────────────────────────────────────────

/// The error body a nexus operation returns in place of its data.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    /// Schema identity, `nexus.v4.error.ErrorResponse`.
    pub object_type: Option<String>,
    /// Reserved format-version bookkeeping.
    pub reserved: Option<Map<String, Value>>,
    /// Residual wire fields unknown to this schema.
    pub unknown_fields: UnknownFields,
    /// Discriminator mirroring the populated `error` variant.
    pub error_item_discriminator: Option<String>,
    error: Option<ErrorDetail>,
}

impl ErrorResponse {
    /// Create an error body with metadata defaults and an empty slot.
    pub fn new() -> Self {
        Self {
            object_type: Some(Self::OBJECT_TYPE.to_owned()),
            reserved: Some(reserved_defaults(FORMAT_VERSION)),
            unknown_fields: UnknownFields::new(),
            error_item_discriminator: None,
            error: None,
        }
    }

    /// The currently held error detail, if any.
    pub fn error(&self) -> Option<&ErrorDetail> {
        self.error.as_ref()
    }

    /// Store an error detail and sync the sibling discriminator field.
    pub fn set_error(&mut self, detail: impl Into<ErrorDetail>) {
        let detail = detail.into();
        self.error_item_discriminator = Some(detail.discriminator().to_owned());
        self.error = Some(detail);
    }

    /// Clear the slot and its discriminator.
    pub fn clear_error(&mut self) {
        self.error_item_discriminator = None;
        self.error = None;
    }

    /// Encode the error slot alone, as its bare wire payload.
    ///
    /// # Errors
    ///
    /// [`EnvelopeError::NothingToMarshal`] when the slot is empty.
    pub fn wire_error(&self) -> Result<Value, EnvelopeError> {
        encode_slot(self.error.as_ref())
    }

    fn from_parts(wire: ErrorResponseWire, unknown_fields: UnknownFields) -> Self {
        let defaults = Self::new();
        Self {
            object_type: wire.object_type.or(defaults.object_type),
            reserved: wire.reserved.or(defaults.reserved),
            unknown_fields,
            error_item_discriminator: wire.error_item_discriminator,
            error: wire.error,
        }
    }
}

impl Default for ErrorResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl Extensible for ErrorResponse {
    const OBJECT_TYPE: &'static str = "nexus.v4.error.ErrorResponse";
    const DECLARED_KEYS: &'static [&'static str] = &["$errorItemDiscriminator", "error"];

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

/// Declared-field wire profile for [`ErrorResponse`].
#[derive(Serialize, Deserialize)]
struct ErrorResponseWire {
    #[serde(
        rename = "$objectType",
        skip_serializing_if = "Option::is_none",
        default
    )]
    object_type: Option<String>,
    #[serde(rename = "$reserved", skip_serializing_if = "Option::is_none", default)]
    reserved: Option<Map<String, Value>>,
    #[serde(
        rename = "$errorItemDiscriminator",
        skip_serializing_if = "Option::is_none",
        default
    )]
    error_item_discriminator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    error: Option<ErrorDetail>,
}

impl From<&ErrorResponse> for ErrorResponseWire {
    fn from(entity: &ErrorResponse) -> Self {
        Self {
            object_type: entity.object_type.clone(),
            reserved: entity.reserved.clone(),
            error_item_discriminator: entity.error_item_discriminator.clone(),
            error: entity.error.clone(),
        }
    }
}

impl Serialize for ErrorResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_record(
            &ErrorResponseWire::from(self),
            &self.unknown_fields,
            serializer,
        )
    }
}

impl<'de> Deserialize<'de> for ErrorResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (wire, unknown_fields) =
            deserialize_record::<ErrorResponseWire, _>(deserializer, Self::DECLARED_KEYS)?;
        Ok(Self::from_parts(wire, unknown_fields))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
