//! Field-list driven transformations of attribute objects.
//!
//! These work on the serialized JSON object so a kind only has to list field
//! names in its [`EntityKind`] descriptor.

use serde_json::{Map, Value};

use crate::kind::EntityKind;

type Result<T> = std::result::Result<T, serde_json::Error>;

fn to_object<T: serde::Serialize>(value: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::de::Error::custom(format!(
            "expected attribute object, got {other}"
        ))),
    }
}

fn remove(map: &mut Map<String, Value>, fields: &[&str]) {
    for field in fields {
        map.remove(*field);
    }
}

/// The request body for create/update: every attribute except computed ones.
///
/// Empty values are sent as-is so the server resets them.
pub fn draft<K: EntityKind>(attributes: &K::Attributes) -> Result<Value> {
    let mut map = to_object(attributes)?;
    remove(&mut map, K::COMPUTED_FIELDS);
    Ok(Value::Object(map))
}

/// Drops sensitive fields, leaving their empty value.
pub fn redact<K: EntityKind>(attributes: K::Attributes) -> Result<K::Attributes> {
    if K::SENSITIVE_FIELDS.is_empty() {
        return Ok(attributes);
    }
    let mut map = to_object(&attributes)?;
    remove(&mut map, K::SENSITIVE_FIELDS);
    serde_json::from_value(Value::Object(map))
}

/// Replaces write-only fields of `remote` with the ones from `prior`.
///
/// Without a prior value the field is left empty.
pub fn keep_write_only<K: EntityKind>(
    remote: K::Attributes,
    prior: Option<&K::Attributes>,
) -> Result<K::Attributes> {
    if K::WRITE_ONLY_FIELDS.is_empty() {
        return Ok(remote);
    }
    let mut map = to_object(&remote)?;
    let prior = prior.map(to_object::<K::Attributes>).transpose()?;
    for field in K::WRITE_ONLY_FIELDS {
        match prior.as_ref().and_then(|p| p.get(*field)) {
            Some(value) => {
                map.insert((*field).to_string(), value.clone());
            }
            None => {
                map.remove(*field);
            }
        }
    }
    serde_json::from_value(Value::Object(map))
}

/// Copies computed fields from a server response onto declared attributes.
pub fn merge_computed<K: EntityKind>(
    declared: K::Attributes,
    response: &K::Attributes,
) -> Result<K::Attributes> {
    if K::COMPUTED_FIELDS.is_empty() {
        return Ok(declared);
    }
    let mut map = to_object(&declared)?;
    let response = to_object(response)?;
    for field in K::COMPUTED_FIELDS {
        if let Some(value) = response.get(*field) {
            map.insert((*field).to_string(), value.clone());
        }
    }
    serde_json::from_value(Value::Object(map))
}

/// Two attribute sets describe the same desired state when their drafts match.
pub fn same_intent<K: EntityKind>(a: &K::Attributes, b: &K::Attributes) -> Result<bool> {
    Ok(draft::<K>(a)? == draft::<K>(b)?)
}
