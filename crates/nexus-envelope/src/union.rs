//! # Discriminated Union Resolution
//!
//! One logical slot, a closed set of payload shapes. JSON alone is not
//! self-describing enough to tell shape-compatible variants apart, so the
//! embedded object-type tag is the actual discriminant; structural probing
//! only orders the attempts.
//!
//! Union payloads are transparent on the wire: encode emits the bare
//! variant value with no wrapper object and no inline discriminator. A
//! sibling discriminator field may sit next to the slot in its containing
//! envelope, but that is the envelope's concern, not the slot's.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::EnvelopeError;
use crate::record::Extensible;

/// A closed one-of slot over a finite set of variant shapes.
///
/// Implementors are sum types: exactly one variant is populated and the
/// discriminator always agrees with it, by construction. The empty slot
/// is `Option::<Self>::None` at the owning envelope — it carries no
/// discriminator and yields no data.
pub trait OneOf: Sized {
    /// Slot name used in resolution and marshal errors.
    const SLOT: &'static str;

    /// Canonical tag of the currently held variant: a record variant's
    /// own object-type name, or the synthetic `List<element-type>` tag
    /// for a collection variant.
    fn discriminator(&self) -> &'static str;

    /// Resolve a wire payload to the first matching variant.
    ///
    /// Variants are attempted in declared priority order; the first
    /// parse whose identity check passes commits, and later variants are
    /// never tried. Collection variants resolve before record variants
    /// so that the empty list — structurally compatible with any
    /// list-typed variant — lands in a list slot rather than failing.
    ///
    /// # Errors
    ///
    /// [`EnvelopeError::UnresolvableUnion`] when no variant matches.
    fn resolve(value: &Value) -> Result<Self, EnvelopeError>;

    /// Encode the held variant as its bare wire payload.
    fn to_wire(&self) -> Result<Value, EnvelopeError>;
}

/// Probe a payload as a homogeneous list of `T`.
///
/// The identity check for collection variants: an empty list is accepted
/// as-is (ambiguous but claimed by the first list variant in declared
/// order), and a non-empty list must carry `T`'s object-type tag on its
/// first element.
pub fn probe_list<T>(value: &Value) -> Option<Vec<T>>
where
    T: Extensible + DeserializeOwned,
{
    let items: Vec<T> = serde_json::from_value(value.clone()).ok()?;
    match items.first() {
        None => Some(items),
        Some(first) if first.object_type() == Some(T::OBJECT_TYPE) => Some(items),
        Some(first) => {
            tracing::trace!(
                expected = T::OBJECT_TYPE,
                found = first.object_type().unwrap_or("<untagged>"),
                "list element tag mismatch"
            );
            None
        }
    }
}

/// Probe a payload as a single record carrying `T`'s own object-type tag.
///
/// The identity check for record variants: the parsed object's tag must
/// equal `T`'s schema name exactly.
pub fn probe_record<T>(value: &Value) -> Option<T>
where
    T: Extensible + DeserializeOwned,
{
    let record: T = serde_json::from_value(value.clone()).ok()?;
    if record.object_type() == Some(T::OBJECT_TYPE) {
        Some(record)
    } else {
        tracing::trace!(
            expected = T::OBJECT_TYPE,
            found = record.object_type().unwrap_or("<untagged>"),
            "record tag mismatch"
        );
        None
    }
}

/// Encode a one-of slot, failing when nothing is held.
///
/// The marshal-consistency guard: an empty slot produces an explicit
/// error rather than a corrupt or null payload.
pub fn encode_slot<U: OneOf>(slot: Option<&U>) -> Result<Value, EnvelopeError> {
    match slot {
        Some(held) => held.to_wire(),
        None => Err(EnvelopeError::NothingToMarshal { slot: U::SLOT }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unknown::UnknownFields;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    /// Minimal tagged record standing in for a real entity. Plain derive
    /// is enough here — probing needs the tag, not the full envelope.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Widget {
        #[serde(
            rename = "$objectType",
            skip_serializing_if = "Option::is_none",
            default
        )]
        object_type: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        size: Option<i64>,
        #[serde(skip)]
        unknown_fields: UnknownFields,
    }

    impl Widget {
        fn tagged(size: i64) -> Self {
            Self {
                object_type: Some(<Self as Extensible>::OBJECT_TYPE.to_owned()),
                size: Some(size),
                unknown_fields: UnknownFields::new(),
            }
        }
    }

    impl Extensible for Widget {
        const OBJECT_TYPE: &'static str = "test.Widget";
        const DECLARED_KEYS: &'static [&'static str] = &["size"];

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

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct FailureBody {
        #[serde(
            rename = "$objectType",
            skip_serializing_if = "Option::is_none",
            default
        )]
        object_type: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        reason: Option<String>,
        #[serde(skip)]
        unknown_fields: UnknownFields,
    }

    impl Extensible for FailureBody {
        const OBJECT_TYPE: &'static str = "test.FailureBody";
        const DECLARED_KEYS: &'static [&'static str] = &["reason"];

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

    /// Two-variant slot exercising the resolver generically: a widget
    /// page or a failure body.
    #[derive(Debug, Clone, PartialEq)]
    enum WidgetPage {
        Widgets(Vec<Widget>),
        Failure(FailureBody),
    }

    impl OneOf for WidgetPage {
        const SLOT: &'static str = "WidgetPage.data";

        fn discriminator(&self) -> &'static str {
            match self {
                Self::Widgets(_) => "List<test.Widget>",
                Self::Failure(_) => FailureBody::OBJECT_TYPE,
            }
        }

        fn resolve(value: &Value) -> Result<Self, EnvelopeError> {
            if let Some(widgets) = probe_list::<Widget>(value) {
                return Ok(Self::Widgets(widgets));
            }
            if let Some(failure) = probe_record::<FailureBody>(value) {
                return Ok(Self::Failure(failure));
            }
            Err(EnvelopeError::UnresolvableUnion { slot: Self::SLOT })
        }

        fn to_wire(&self) -> Result<Value, EnvelopeError> {
            let value = match self {
                Self::Widgets(widgets) => serde_json::to_value(widgets)?,
                Self::Failure(failure) => serde_json::to_value(failure)?,
            };
            Ok(value)
        }
    }

    #[test]
    fn test_probe_list_accepts_empty_array() {
        let items = probe_list::<Widget>(&json!([])).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_probe_list_accepts_tagged_elements() {
        let payload = serde_json::to_value(vec![Widget::tagged(1), Widget::tagged(2)]).unwrap();
        let items = probe_list::<Widget>(&payload).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].size, Some(1));
    }

    #[test]
    fn test_probe_list_rejects_foreign_tag() {
        let payload = json!([{"$objectType": "test.Other"}]);
        assert!(probe_list::<Widget>(&payload).is_none());
    }

    #[test]
    fn test_probe_list_rejects_non_array() {
        assert!(probe_list::<Widget>(&json!({"size": 1})).is_none());
    }

    #[test]
    fn test_probe_record_requires_exact_tag() {
        let payload = json!({"$objectType": "test.FailureBody", "reason": "boom"});
        let body = probe_record::<FailureBody>(&payload).unwrap();
        assert_eq!(body.reason.as_deref(), Some("boom"));

        let wrong = json!({"$objectType": "test.FailureBodyV2", "reason": "boom"});
        assert!(probe_record::<FailureBody>(&wrong).is_none());
    }

    #[test]
    fn test_resolve_prefers_list_for_empty_array() {
        let resolved = WidgetPage::resolve(&json!([])).unwrap();
        assert_eq!(resolved, WidgetPage::Widgets(Vec::new()));
        assert_eq!(resolved.discriminator(), "List<test.Widget>");
    }

    #[test]
    fn test_resolve_discriminates_record_by_tag() {
        let payload = json!({"$objectType": "test.FailureBody", "reason": "bad"});
        let resolved = WidgetPage::resolve(&payload).unwrap();
        assert!(matches!(resolved, WidgetPage::Failure(_)));
        assert_eq!(resolved.discriminator(), FailureBody::OBJECT_TYPE);
    }

    #[test]
    fn test_resolve_fails_when_no_variant_matches() {
        let err = WidgetPage::resolve(&json!("just a string")).unwrap_err();
        match err {
            EnvelopeError::UnresolvableUnion { slot } => assert_eq!(slot, "WidgetPage.data"),
            other => panic!("expected UnresolvableUnion, got: {other}"),
        }
    }

    #[test]
    fn test_encode_slot_emits_bare_variant_payload() {
        let slot = WidgetPage::Widgets(vec![Widget::tagged(9)]);
        let value = encode_slot(Some(&slot)).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["size"], json!(9));
    }

    #[test]
    fn test_encode_slot_fails_on_empty_slot() {
        let err = encode_slot::<WidgetPage>(None).unwrap_err();
        match err {
            EnvelopeError::NothingToMarshal { slot } => assert_eq!(slot, "WidgetPage.data"),
            other => panic!("expected NothingToMarshal, got: {other}"),
        }
    }
}
