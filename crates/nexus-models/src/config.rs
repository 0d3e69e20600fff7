//! # Item Service DTOs — `nexus.v4.config`
//!
//! The entities of the nexus v4 item service and its list-operation
//! response envelope. `Item` is the one record in the workspace with
//! required-on-output fields (`itemName`, `itemType`): they are emitted
//! unconditionally, as `null` when unset, so a producer that never
//! populated them ships a visible null instead of silently dropping the
//! keys.
//!
//! `ListItemsApiResponse` owns the workspace's primary one-of slot: its
//! `data` field holds either the item page or an error body, with the
//! `$dataItemDiscriminator` sibling field mirroring the populated
//! variant.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use nexus_envelope::{
    deserialize_record, encode_slot, probe_list, probe_record, reserved_defaults,
    serialize_record, EnvelopeError, Extensible, OneOf, UnknownFields,
};

use crate::error::ErrorResponse;
use crate::response::ApiResponseMetadata;

/// Format-version marker carried in `$reserved` by every
/// `nexus.v4.config` record.
pub const FORMAT_VERSION: &str = "v4.r1";

// ─── Country ─────────────────────────────────────────────────────────

/// Country information.
#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    /// Schema identity, `nexus.v4.config.Country`.
    pub object_type: Option<String>,
    /// Reserved format-version bookkeeping.
    pub reserved: Option<Map<String, Value>>,
    /// Residual wire fields unknown to this schema.
    pub unknown_fields: UnknownFields,
    /// State or province name.
    pub state: Option<String>,
}

impl Country {
    /// Create a country with metadata defaults and no declared data.
    pub fn new() -> Self {
        Self {
            object_type: Some(Self::OBJECT_TYPE.to_owned()),
            reserved: Some(reserved_defaults(FORMAT_VERSION)),
            unknown_fields: UnknownFields::new(),
            state: None,
        }
    }

    fn from_parts(wire: CountryWire, unknown_fields: UnknownFields) -> Self {
        let defaults = Self::new();
        Self {
            object_type: wire.object_type.or(defaults.object_type),
            reserved: wire.reserved.or(defaults.reserved),
            unknown_fields,
            state: wire.state,
        }
    }
}

impl Default for Country {
    fn default() -> Self {
        Self::new()
    }
}

impl Extensible for Country {
    const OBJECT_TYPE: &'static str = "nexus.v4.config.Country";
    const DECLARED_KEYS: &'static [&'static str] = &["state"];

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

/// Declared-field wire profile for [`Country`].
#[derive(Serialize, Deserialize)]
struct CountryWire {
    #[serde(
        rename = "$objectType",
        skip_serializing_if = "Option::is_none",
        default
    )]
    object_type: Option<String>,
    #[serde(rename = "$reserved", skip_serializing_if = "Option::is_none", default)]
    reserved: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    state: Option<String>,
}

impl From<&Country> for CountryWire {
    fn from(entity: &Country) -> Self {
        Self {
            object_type: entity.object_type.clone(),
            reserved: entity.reserved.clone(),
            state: entity.state.clone(),
        }
    }
}

impl Serialize for Country {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_record(&CountryWire::from(self), &self.unknown_fields, serializer)
    }
}

impl<'de> Deserialize<'de> for Country {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (wire, unknown_fields) =
            deserialize_record::<CountryWire, _>(deserializer, Self::DECLARED_KEYS)?;
        Ok(Self::from_parts(wire, unknown_fields))
    }
}

// ─── Location ────────────────────────────────────────────────────────

/// Geographical location information.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Schema identity, `nexus.v4.config.Location`.
    pub object_type: Option<String>,
    /// Reserved format-version bookkeeping.
    pub reserved: Option<Map<String, Value>>,
    /// Residual wire fields unknown to this schema.
    pub unknown_fields: UnknownFields,
    /// City name.
    pub city: Option<String>,
    /// Country details.
    pub country: Option<Country>,
    /// ZIP or postal code.
    pub zip: Option<String>,
}

impl Location {
    /// Create a location with metadata defaults and no declared data.
    pub fn new() -> Self {
        Self {
            object_type: Some(Self::OBJECT_TYPE.to_owned()),
            reserved: Some(reserved_defaults(FORMAT_VERSION)),
            unknown_fields: UnknownFields::new(),
            city: None,
            country: None,
            zip: None,
        }
    }

    fn from_parts(wire: LocationWire, unknown_fields: UnknownFields) -> Self {
        let defaults = Self::new();
        Self {
            object_type: wire.object_type.or(defaults.object_type),
            reserved: wire.reserved.or(defaults.reserved),
            unknown_fields,
            city: wire.city,
            country: wire.country,
            zip: wire.zip,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new()
    }
}

impl Extensible for Location {
    const OBJECT_TYPE: &'static str = "nexus.v4.config.Location";
    const DECLARED_KEYS: &'static [&'static str] = &["city", "country", "zip"];

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

/// Declared-field wire profile for [`Location`].
///
/// The nested `country` travels through [`Country`]'s own envelope
/// impls, so unknown fields survive at every depth.
#[derive(Serialize, Deserialize)]
struct LocationWire {
    #[serde(
        rename = "$objectType",
        skip_serializing_if = "Option::is_none",
        default
    )]
    object_type: Option<String>,
    #[serde(rename = "$reserved", skip_serializing_if = "Option::is_none", default)]
    reserved: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    country: Option<Country>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    zip: Option<String>,
}

impl From<&Location> for LocationWire {
    fn from(entity: &Location) -> Self {
        Self {
            object_type: entity.object_type.clone(),
            reserved: entity.reserved.clone(),
            city: entity.city.clone(),
            country: entity.country.clone(),
            zip: entity.zip.clone(),
        }
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_record(&LocationWire::from(self), &self.unknown_fields, serializer)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (wire, unknown_fields) =
            deserialize_record::<LocationWire, _>(deserializer, Self::DECLARED_KEYS)?;
        Ok(Self::from_parts(wire, unknown_fields))
    }
}

// ─── Item ────────────────────────────────────────────────────────────

/// An item held by the mock item service.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Schema identity, `nexus.v4.config.Item`.
    pub object_type: Option<String>,
    /// Reserved format-version bookkeeping.
    pub reserved: Option<Map<String, Value>>,
    /// Residual wire fields unknown to this schema.
    pub unknown_fields: UnknownFields,
    /// Description of the item.
    pub description: Option<String>,
    /// Unique identifier for the item.
    pub item_id: Option<i64>,
    /// Path to the item image file.
    pub item_image_file: Option<String>,
    /// Name of the item. Required on output.
    pub item_name: Option<String>,
    /// Type of item. Required on output.
    pub item_type: Option<String>,
    /// Where the item lives.
    pub location: Option<Location>,
}

impl Item {
    /// Create an item with metadata defaults and no declared data.
    pub fn new() -> Self {
        Self {
            object_type: Some(Self::OBJECT_TYPE.to_owned()),
            reserved: Some(reserved_defaults(FORMAT_VERSION)),
            unknown_fields: UnknownFields::new(),
            description: None,
            item_id: None,
            item_image_file: None,
            item_name: None,
            item_type: None,
            location: None,
        }
    }

    fn from_parts(wire: ItemWire, unknown_fields: UnknownFields) -> Self {
        let defaults = Self::new();
        Self {
            object_type: wire.object_type.or(defaults.object_type),
            reserved: wire.reserved.or(defaults.reserved),
            unknown_fields,
            description: wire.description,
            item_id: wire.item_id,
            item_image_file: wire.item_image_file,
            item_name: wire.item_name,
            item_type: wire.item_type,
            location: wire.location,
        }
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}

impl Extensible for Item {
    const OBJECT_TYPE: &'static str = "nexus.v4.config.Item";
    const DECLARED_KEYS: &'static [&'static str] = &[
        "description",
        "itemId",
        "itemImageFile",
        "itemName",
        "itemType",
        "location",
    ];

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

/// Declared-field wire profile for [`Item`].
///
/// `item_name` and `item_type` carry no skip attribute: the strict
/// profile writes them whenever the record itself is written, regardless
/// of whether application code ever set them.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemWire {
    #[serde(
        rename = "$objectType",
        skip_serializing_if = "Option::is_none",
        default
    )]
    object_type: Option<String>,
    #[serde(rename = "$reserved", skip_serializing_if = "Option::is_none", default)]
    reserved: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    item_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    item_image_file: Option<String>,
    #[serde(default)]
    item_name: Option<String>,
    #[serde(default)]
    item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    location: Option<Location>,
}

impl From<&Item> for ItemWire {
    fn from(entity: &Item) -> Self {
        Self {
            object_type: entity.object_type.clone(),
            reserved: entity.reserved.clone(),
            description: entity.description.clone(),
            item_id: entity.item_id,
            item_image_file: entity.item_image_file.clone(),
            item_name: entity.item_name.clone(),
            item_type: entity.item_type.clone(),
            location: entity.location.clone(),
        }
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_record(&ItemWire::from(self), &self.unknown_fields, serializer)
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (wire, unknown_fields) =
            deserialize_record::<ItemWire, _>(deserializer, Self::DECLARED_KEYS)?;
        Ok(Self::from_parts(wire, unknown_fields))
    }
}

// ─── ListItemsData one-of ────────────────────────────────────────────

/// The `data` slot of a [`ListItemsApiResponse`]: the item page, or the
/// error body a failed operation returns instead.
///
/// Variant order is load-bearing on decode: the item-list variant is
/// probed first so an empty JSON array lands there, and error bodies are
/// never validly array-shaped. An empty array is structurally compatible
/// with any list-typed variant — the first list variant in declared
/// order claims it.
#[derive(Debug, Clone, PartialEq)]
pub enum ListItemsData {
    /// A page of items.
    Items(Vec<Item>),
    /// The error body of a failed list operation.
    Error(ErrorResponse),
}

impl ListItemsData {
    /// Discriminator tag of the item-list variant.
    pub const ITEMS_TAG: &'static str = "List<nexus.v4.config.Item>";

    /// The held items, if the list variant is populated.
    pub fn as_items(&self) -> Option<&[Item]> {
        match self {
            Self::Items(items) => Some(items),
            _ => None,
        }
    }

    /// The held error body, if the error variant is populated.
    pub fn as_error(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }
}

impl From<Vec<Item>> for ListItemsData {
    fn from(items: Vec<Item>) -> Self {
        Self::Items(items)
    }
}

impl From<ErrorResponse> for ListItemsData {
    fn from(error: ErrorResponse) -> Self {
        Self::Error(error)
    }
}

impl OneOf for ListItemsData {
    const SLOT: &'static str = "ListItemsApiResponse.data";

    fn discriminator(&self) -> &'static str {
        match self {
            Self::Items(_) => Self::ITEMS_TAG,
            Self::Error(_) => ErrorResponse::OBJECT_TYPE,
        }
    }

    fn resolve(value: &Value) -> Result<Self, EnvelopeError> {
        if let Some(items) = probe_list::<Item>(value) {
            return Ok(Self::Items(items));
        }
        if let Some(error) = probe_record::<ErrorResponse>(value) {
            return Ok(Self::Error(error));
        }
        Err(EnvelopeError::UnresolvableUnion { slot: Self::SLOT })
    }

    fn to_wire(&self) -> Result<Value, EnvelopeError> {
        let value = match self {
            Self::Items(items) => serde_json::to_value(items)?,
            Self::Error(error) => serde_json::to_value(error)?,
        };
        Ok(value)
    }
}

impl Serialize for ListItemsData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ListItemsData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::resolve(&value).map_err(serde::de::Error::custom)
    }
}

// ─── ListItemsApiResponse ────────────────────────────────────────────

/// Response envelope for the list-items operation, covering every
/// response code.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItemsApiResponse {
    /// Schema identity, `nexus.v4.config.ListItemsApiResponse`.
    pub object_type: Option<String>,
    /// Reserved format-version bookkeeping.
    pub reserved: Option<Map<String, Value>>,
    /// Residual wire fields unknown to this schema.
    pub unknown_fields: UnknownFields,
    /// Discriminator mirroring the populated `data` variant.
    pub data_item_discriminator: Option<String>,
    data: Option<ListItemsData>,
    /// Paging and bookkeeping metadata.
    pub metadata: Option<ApiResponseMetadata>,
}

impl ListItemsApiResponse {
    /// Create a response with metadata defaults and an empty data slot.
    pub fn new() -> Self {
        Self {
            object_type: Some(Self::OBJECT_TYPE.to_owned()),
            reserved: Some(reserved_defaults(FORMAT_VERSION)),
            unknown_fields: UnknownFields::new(),
            data_item_discriminator: None,
            data: None,
            metadata: None,
        }
    }

    /// The currently held response payload, if any.
    pub fn data(&self) -> Option<&ListItemsData> {
        self.data.as_ref()
    }

    /// Store a response payload and sync the sibling discriminator
    /// field.
    pub fn set_data(&mut self, data: impl Into<ListItemsData>) {
        let data = data.into();
        self.data_item_discriminator = Some(data.discriminator().to_owned());
        self.data = Some(data);
    }

    /// Clear the data slot and its discriminator.
    pub fn clear_data(&mut self) {
        self.data_item_discriminator = None;
        self.data = None;
    }

    /// Encode the data slot alone, as its bare wire payload.
    ///
    /// # Errors
    ///
    /// [`EnvelopeError::NothingToMarshal`] when the slot is empty.
    pub fn wire_data(&self) -> Result<Value, EnvelopeError> {
        encode_slot(self.data.as_ref())
    }

    fn from_parts(wire: ListItemsApiResponseWire, unknown_fields: UnknownFields) -> Self {
        let defaults = Self::new();
        Self {
            object_type: wire.object_type.or(defaults.object_type),
            reserved: wire.reserved.or(defaults.reserved),
            unknown_fields,
            data_item_discriminator: wire.data_item_discriminator,
            data: wire.data,
            metadata: wire.metadata,
        }
    }
}

impl Default for ListItemsApiResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl Extensible for ListItemsApiResponse {
    const OBJECT_TYPE: &'static str = "nexus.v4.config.ListItemsApiResponse";
    const DECLARED_KEYS: &'static [&'static str] =
        &["$dataItemDiscriminator", "data", "metadata"];

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

/// Declared-field wire profile for [`ListItemsApiResponse`].
#[derive(Serialize, Deserialize)]
struct ListItemsApiResponseWire {
    #[serde(
        rename = "$objectType",
        skip_serializing_if = "Option::is_none",
        default
    )]
    object_type: Option<String>,
    #[serde(rename = "$reserved", skip_serializing_if = "Option::is_none", default)]
    reserved: Option<Map<String, Value>>,
    #[serde(
        rename = "$dataItemDiscriminator",
        skip_serializing_if = "Option::is_none",
        default
    )]
    data_item_discriminator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    data: Option<ListItemsData>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    metadata: Option<ApiResponseMetadata>,
}

impl From<&ListItemsApiResponse> for ListItemsApiResponseWire {
    fn from(entity: &ListItemsApiResponse) -> Self {
        Self {
            object_type: entity.object_type.clone(),
            reserved: entity.reserved.clone(),
            data_item_discriminator: entity.data_item_discriminator.clone(),
            data: entity.data.clone(),
            metadata: entity.metadata.clone(),
        }
    }
}

impl Serialize for ListItemsApiResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_record(
            &ListItemsApiResponseWire::from(self),
            &self.unknown_fields,
            serializer,
        )
    }
}

impl<'de> Deserialize<'de> for ListItemsApiResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (wire, unknown_fields) =
            deserialize_record::<ListItemsApiResponseWire, _>(deserializer, Self::DECLARED_KEYS)?;
        Ok(Self::from_parts(wire, unknown_fields))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn named_item(name: &str) -> Item {
        let mut item = Item::new();
        item.item_name = Some(name.to_owned());
        item.item_type = Some("tool".to_owned());
        item
    }

    // ── Record codec properties ──────────────────────────────────────

    #[test]
    fn test_required_fields_emitted_as_null_when_absent() {
        let encoded = serde_json::to_value(Item::new()).unwrap();
        let object = encoded.as_object().unwrap();
        assert_eq!(object["itemName"], Value::Null);
        assert_eq!(object["itemType"], Value::Null);
        // Plain optionals are omitted entirely.
        assert!(!object.contains_key("description"));
        assert!(!object.contains_key("location"));
    }

    #[test]
    fn test_empty_item_encodes_metadata_and_required_only() {
        let encoded = serde_json::to_value(Item::new()).unwrap();
        let mut keys: Vec<&str> = encoded
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["$objectType", "$reserved", "itemName", "itemType"]
        );
    }

    #[test]
    fn test_empty_country_encodes_metadata_only() {
        let encoded = serde_json::to_value(Country::new()).unwrap();
        let object = encoded.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["$objectType"], json!(Country::OBJECT_TYPE));
        assert_eq!(object["$reserved"], json!({"$fv": "v4.r1"}));
    }

    #[test]
    fn test_unknown_field_isolation_on_decode() {
        let payload = json!({"state": "Karnataka", "mysteryField": "x"});
        let decoded: Country = serde_json::from_value(payload).unwrap();
        assert_eq!(decoded.state.as_deref(), Some("Karnataka"));
        assert_eq!(decoded.unknown_fields.len(), 1);
        assert_eq!(decoded.unknown_fields.get("mysteryField"), Some(&json!("x")));
    }

    #[test]
    fn test_declared_field_wins_over_bag_on_encode() {
        let mut item = named_item("wrench");
        item.unknown_fields.insert("itemName", json!("shadow"));
        let encoded = serde_json::to_value(&item).unwrap();
        assert_eq!(encoded["itemName"], json!("wrench"));
    }

    #[test]
    fn test_decode_replaces_prior_bag() {
        let mut item: Item =
            serde_json::from_value(json!({"firstExtra": 1})).unwrap();
        assert!(item.unknown_fields.contains_key("firstExtra"));

        item = serde_json::from_value(json!({"secondExtra": 2})).unwrap();
        assert!(!item.unknown_fields.contains_key("firstExtra"));
        assert!(item.unknown_fields.contains_key("secondExtra"));
    }

    #[test]
    fn test_decode_empty_object_yields_constructed_defaults() {
        let decoded: Item = serde_json::from_value(json!({})).unwrap();
        assert_eq!(decoded, Item::new());
    }

    #[test]
    fn test_decode_malformed_json_fails() {
        assert!(serde_json::from_str::<Item>("{not json").is_err());
        assert!(serde_json::from_str::<Item>("[1, 2]").is_err());
        assert!(serde_json::from_str::<Item>("\"a string\"").is_err());
    }

    #[test]
    fn test_nested_unknown_fields_survive_round_trip() {
        let mut country = Country::new();
        country.state = Some("WA".to_owned());
        country.unknown_fields.insert("isoCode", json!("US-WA"));

        let mut location = Location::new();
        location.city = Some("Seattle".to_owned());
        location.country = Some(country);
        location.unknown_fields.insert("geohash", json!("c23nb"));

        let mut item = named_item("umbrella");
        item.location = Some(location);

        let encoded = serde_json::to_value(&item).unwrap();
        assert_eq!(encoded["location"]["geohash"], json!("c23nb"));
        assert_eq!(encoded["location"]["country"]["isoCode"], json!("US-WA"));

        let decoded: Item = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, item);
    }

    // ── Union resolution properties ──────────────────────────────────

    #[test]
    fn test_empty_array_resolves_to_items_variant() {
        let resolved = ListItemsData::resolve(&json!([])).unwrap();
        assert_eq!(resolved, ListItemsData::Items(Vec::new()));
        assert_eq!(resolved.discriminator(), ListItemsData::ITEMS_TAG);
    }

    #[test]
    fn test_tagged_error_object_resolves_to_error_variant() {
        let payload = json!({
            "$objectType": "nexus.v4.error.ErrorResponse",
            "$errorItemDiscriminator": "List<nexus.v4.error.AppMessage>",
            "error": [],
        });
        let resolved = ListItemsData::resolve(&payload).unwrap();
        assert!(resolved.as_error().is_some());
        assert_eq!(resolved.discriminator(), ErrorResponse::OBJECT_TYPE);
    }

    #[test]
    fn test_foreign_tagged_list_is_unresolvable() {
        let payload = json!([{"$objectType": "mock.v4.config.Cat"}]);
        let err = ListItemsData::resolve(&payload).unwrap_err();
        assert!(matches!(err, EnvelopeError::UnresolvableUnion { .. }));
    }

    #[test]
    fn test_items_variant_marshals_to_bare_array() {
        let data = ListItemsData::Items(vec![named_item("a"), named_item("b")]);
        let encoded = serde_json::to_value(&data).unwrap();
        let array = encoded.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["itemName"], json!("a"));
        // No wrapper object, no inline discriminator key.
        assert!(array.iter().all(|e| e.get("$dataItemDiscriminator").is_none()));
    }

    // ── Response envelope ────────────────────────────────────────────

    #[test]
    fn test_set_data_syncs_discriminator() {
        let mut response = ListItemsApiResponse::new();
        assert_eq!(response.data_item_discriminator, None);

        response.set_data(vec![named_item("a")]);
        assert_eq!(
            response.data_item_discriminator.as_deref(),
            Some(ListItemsData::ITEMS_TAG)
        );

        response.set_data(ErrorResponse::new());
        assert_eq!(
            response.data_item_discriminator.as_deref(),
            Some(ErrorResponse::OBJECT_TYPE)
        );

        response.clear_data();
        assert_eq!(response.data_item_discriminator, None);
        assert!(response.data().is_none());
    }

    #[test]
    fn test_response_round_trip_with_items_and_metadata() {
        let mut metadata = ApiResponseMetadata::new();
        metadata.total_available_results = Some(2);

        let mut response = ListItemsApiResponse::new();
        response.set_data(vec![named_item("a"), named_item("b")]);
        response.metadata = Some(metadata);

        let encoded = serde_json::to_value(&response).unwrap();
        assert_eq!(
            encoded["$dataItemDiscriminator"],
            json!(ListItemsData::ITEMS_TAG)
        );
        assert!(encoded["data"].is_array());
        assert_eq!(encoded["metadata"]["totalAvailableResults"], json!(2));

        let decoded: ListItemsApiResponse = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, response);
    }

    #[test]
    fn test_wire_data_emits_bare_payload() {
        let mut response = ListItemsApiResponse::new();
        response.set_data(vec![named_item("a")]);
        let payload = response.wire_data().unwrap();
        assert!(payload.is_array());
        assert_eq!(payload[0]["itemName"], json!("a"));
    }

    #[test]
    fn test_wire_data_fails_on_empty_slot() {
        let err = ListItemsApiResponse::new().wire_data().unwrap_err();
        match err {
            EnvelopeError::NothingToMarshal { slot } => {
                assert_eq!(slot, "ListItemsApiResponse.data");
            }
            other => panic!("expected NothingToMarshal, got: {other}"),
        }
    }

    #[test]
    fn test_response_with_null_data_decodes_to_empty_slot() {
        let payload = json!({
            "$objectType": "nexus.v4.config.ListItemsApiResponse",
            "data": null,
        });
        let decoded: ListItemsApiResponse = serde_json::from_value(payload).unwrap();
        assert!(decoded.data().is_none());
    }

    #[test]
    fn test_response_with_unresolvable_data_fails_decode() {
        let payload = json!({
            "$objectType": "nexus.v4.config.ListItemsApiResponse",
            "data": 42,
        });
        assert!(serde_json::from_value::<ListItemsApiResponse>(payload).is_err());
    }

    // ── Property tests ───────────────────────────────────────────────

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn bag_value() -> impl Strategy<Value = Value> {
            prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                any::<i64>().prop_map(|n| json!(n)),
                "[a-zA-Z0-9 ]{0,16}".prop_map(Value::String),
            ]
        }

        fn unknown_bag() -> impl Strategy<Value = UnknownFields> {
            prop::collection::btree_map("x_[a-z]{1,8}", bag_value(), 0..5)
                .prop_map(|m| m.into_iter().collect())
        }

        proptest! {
            /// Encoding then decoding an item restores every declared
            /// field and the full bag.
            #[test]
            fn item_round_trip_is_lossless(
                description in prop::option::of("[a-z ]{0,24}"),
                item_id in prop::option::of(any::<i64>()),
                item_name in prop::option::of("[a-z]{1,12}"),
                item_type in prop::option::of("[a-z]{1,12}"),
                bag in unknown_bag(),
            ) {
                let mut item = Item::new();
                item.description = description;
                item.item_id = item_id;
                item.item_name = item_name;
                item.item_type = item_type;
                for (key, value) in bag.clone() {
                    item.unknown_fields.insert(key, value);
                }

                let encoded = serde_json::to_value(&item).unwrap();
                let decoded: Item = serde_json::from_value(encoded).unwrap();
                prop_assert_eq!(decoded, item);
            }
        }
    }
}
