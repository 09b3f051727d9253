//! The record schema: how a state record maps onto a wide-column row.
//!
//! One row per actor, six attributes, the same names on the write and
//! read paths:
//!
//! | Attribute | Type | Role |
//! |-----------|------|------|
//! | `actor_id` | string | partition key |
//! | `version_number` | number | data |
//! | `payload_bytes` | binary | data |
//! | `type_name` | string | data |
//! | `timestamp` | number | data |
//! | `shard_number` | number | data |
//!
//! Numeric fields are number attributes in both directions, and a stored
//! number that fails to parse fails the read; it is never substituted
//! with a default.

use crate::attribute::{AttributeValue, Item};
use holdfast_protocol::error::{PayloadError, StateError};
use holdfast_protocol::id::ActorId;
use holdfast_protocol::payload::{Envelope, PayloadRegistry, TypeNamed};
use holdfast_protocol::record::DurableStateRecord;

/// Partition-key attribute.
pub const ACTOR_ID: &str = "actor_id";
/// Version counter attribute.
pub const VERSION_NUMBER: &str = "version_number";
/// Serialized payload attribute.
pub const PAYLOAD_BYTES: &str = "payload_bytes";
/// Payload type-name attribute.
pub const TYPE_NAME: &str = "type_name";
/// Snapshot time attribute.
pub const TIMESTAMP: &str = "timestamp";
/// Shard number attribute.
pub const SHARD_NUMBER: &str = "shard_number";

/// The lookup key for an actor's row.
pub(crate) fn key_for(actor_id: &ActorId) -> Item {
    Item::from([(
        ACTOR_ID.to_string(),
        AttributeValue::string(actor_id.as_str()),
    )])
}

/// Flatten a record into its row, serializing the payload.
pub(crate) fn record_to_item(record: &DurableStateRecord) -> Result<Item, StateError> {
    let payload_bytes = serde_json::to_vec(&record.payload)
        .map_err(|e| PayloadError::Encode(e.to_string()))?;

    Ok(Item::from([
        (
            ACTOR_ID.to_string(),
            AttributeValue::string(record.actor_id.as_str()),
        ),
        (
            VERSION_NUMBER.to_string(),
            AttributeValue::number(record.version_number),
        ),
        (
            PAYLOAD_BYTES.to_string(),
            AttributeValue::binary(payload_bytes),
        ),
        (
            TYPE_NAME.to_string(),
            AttributeValue::string(Envelope::TYPE_NAME),
        ),
        (
            TIMESTAMP.to_string(),
            AttributeValue::number(record.timestamp),
        ),
        (
            SHARD_NUMBER.to_string(),
            AttributeValue::number(record.shard_number),
        ),
    ]))
}

/// Rebuild a record from its row, resolving the payload through the
/// registry. Any missing, mistyped, or unparsable attribute fails the
/// whole read; no partial record is returned.
pub(crate) fn item_to_record(
    actor_id: &ActorId,
    item: &Item,
    registry: &PayloadRegistry,
) -> Result<DurableStateRecord, StateError> {
    let version_number: u64 = number_attr(item, VERSION_NUMBER)?;
    let timestamp: i64 = number_attr(item, TIMESTAMP)?;
    let shard_number: u64 = number_attr(item, SHARD_NUMBER)?;
    let payload_bytes = binary_attr(item, PAYLOAD_BYTES)?;
    let type_name = string_attr(item, TYPE_NAME)?;

    let payload = registry.resolve(type_name, payload_bytes)?;

    Ok(DurableStateRecord {
        actor_id: actor_id.clone(),
        version_number,
        payload,
        timestamp,
        shard_number,
    })
}

fn attr<'a>(item: &'a Item, name: &str) -> Result<&'a AttributeValue, StateError> {
    item.get(name)
        .ok_or_else(|| StateError::Decode(format!("missing attribute {name}")))
}

fn string_attr<'a>(item: &'a Item, name: &str) -> Result<&'a str, StateError> {
    let value = attr(item, name)?;
    value.as_string().ok_or_else(|| {
        StateError::Decode(format!(
            "attribute {name} is {}, expected string",
            value.kind()
        ))
    })
}

fn binary_attr<'a>(item: &'a Item, name: &str) -> Result<&'a [u8], StateError> {
    let value = attr(item, name)?;
    value.as_binary().ok_or_else(|| {
        StateError::Decode(format!(
            "attribute {name} is {}, expected binary",
            value.kind()
        ))
    })
}

fn number_attr<T>(item: &Item, name: &str) -> Result<T, StateError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = attr(item, name)?;
    let digits = value.as_number().ok_or_else(|| {
        StateError::Decode(format!(
            "attribute {name} is {}, expected number",
            value.kind()
        ))
    })?;
    digits
        .parse()
        .map_err(|e| StateError::Decode(format!("attribute {name}: invalid number: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Account {
        balance: i64,
    }

    impl TypeNamed for Account {
        const TYPE_NAME: &'static str = "holdfast.test.Account";
    }

    fn record() -> DurableStateRecord {
        DurableStateRecord {
            actor_id: ActorId::new("acct-42"),
            version_number: 7,
            payload: Envelope::pack(&Account { balance: 100 }).unwrap(),
            timestamp: -1000,
            shard_number: 3,
        }
    }

    #[test]
    fn row_has_exactly_the_schema_attributes() {
        let item = record_to_item(&record()).unwrap();
        let mut names: Vec<&str> = item.keys().map(String::as_str).collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                ACTOR_ID,
                PAYLOAD_BYTES,
                SHARD_NUMBER,
                TIMESTAMP,
                TYPE_NAME,
                VERSION_NUMBER,
            ]
        );
    }

    #[test]
    fn numeric_fields_are_number_attributes() {
        let item = record_to_item(&record()).unwrap();
        assert_eq!(item[VERSION_NUMBER], AttributeValue::number(7u64));
        assert_eq!(item[TIMESTAMP], AttributeValue::number(-1000i64));
        assert_eq!(item[SHARD_NUMBER], AttributeValue::number(3u64));
        assert_eq!(item[ACTOR_ID], AttributeValue::string("acct-42"));
        assert_eq!(item[TYPE_NAME], AttributeValue::string(Envelope::TYPE_NAME));
    }

    #[test]
    fn item_roundtrip() {
        let registry = PayloadRegistry::with_envelope();
        let original = record();
        let item = record_to_item(&original).unwrap();
        let rebuilt = item_to_record(&original.actor_id, &item, &registry).unwrap();
        assert_eq!(rebuilt, original);
        assert_eq!(rebuilt.payload.unpack::<Account>().unwrap().balance, 100);
    }

    #[test]
    fn missing_attribute_fails_decode() {
        let registry = PayloadRegistry::with_envelope();
        let mut item = record_to_item(&record()).unwrap();
        item.remove(VERSION_NUMBER);

        let err = item_to_record(&ActorId::new("acct-42"), &item, &registry).unwrap_err();
        assert!(matches!(err, StateError::Decode(_)));
        assert!(err.to_string().contains(VERSION_NUMBER));
    }

    #[test]
    fn wrong_attribute_kind_fails_decode() {
        let registry = PayloadRegistry::with_envelope();
        let mut item = record_to_item(&record()).unwrap();
        item.insert(TIMESTAMP.to_string(), AttributeValue::string("1000"));

        let err = item_to_record(&ActorId::new("acct-42"), &item, &registry).unwrap_err();
        assert!(matches!(err, StateError::Decode(_)));
    }

    #[test]
    fn unparsable_number_fails_decode_not_zero() {
        let registry = PayloadRegistry::with_envelope();
        let mut item = record_to_item(&record()).unwrap();
        item.insert(
            SHARD_NUMBER.to_string(),
            AttributeValue::Number("not-a-number".into()),
        );

        let err = item_to_record(&ActorId::new("acct-42"), &item, &registry).unwrap_err();
        assert!(matches!(err, StateError::Decode(_)));
        assert!(err.to_string().contains(SHARD_NUMBER));
    }

    #[test]
    fn negative_shard_number_fails_decode() {
        let registry = PayloadRegistry::with_envelope();
        let mut item = record_to_item(&record()).unwrap();
        item.insert(SHARD_NUMBER.to_string(), AttributeValue::number(-1i64));

        let err = item_to_record(&ActorId::new("acct-42"), &item, &registry).unwrap_err();
        assert!(matches!(err, StateError::Decode(_)));
    }

    #[test]
    fn unregistered_type_name_fails_resolution() {
        let registry = PayloadRegistry::new();
        let item = record_to_item(&record()).unwrap();

        let err = item_to_record(&ActorId::new("acct-42"), &item, &registry).unwrap_err();
        assert!(matches!(
            err,
            StateError::Payload(PayloadError::UnknownType(_))
        ));
    }

    #[test]
    fn malformed_payload_bytes_fail_decode() {
        let registry = PayloadRegistry::with_envelope();
        let mut item = record_to_item(&record()).unwrap();
        item.insert(
            PAYLOAD_BYTES.to_string(),
            AttributeValue::binary(b"garbage".to_vec()),
        );

        let err = item_to_record(&ActorId::new("acct-42"), &item, &registry).unwrap_err();
        assert!(matches!(err, StateError::Payload(PayloadError::Decode(_))));
    }
}
