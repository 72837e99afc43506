//! Type-erased handles for hosts that work with JSON records instead of
//! concrete attribute types.
//!
//! Records cross this boundary in their serialized [`Record`] shape:
//! `{ "id": .., "created_at": .., "updated_at": .., "attributes": {..} }`.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tideline_core::{EntityKind, Record, ResourceKind, fields};

use crate::error::{Operation, ProviderError, ProviderResult};
use crate::lookup::Lookup;
use crate::resource::{ReadOutcome, Resource};

/// Reconciler contract over JSON values.
#[async_trait]
pub trait DynResource: Send + Sync {
    fn kind(&self) -> ResourceKind;

    /// Checks that `attributes` decode into the kind's attribute type.
    fn validate(&self, attributes: &Value) -> ProviderResult<()>;

    /// Whether `attributes` differ from what `record` holds. Computed fields
    /// are ignored; an imported record without attributes always differs.
    fn differs(&self, record: &Value, attributes: &Value) -> ProviderResult<bool>;

    async fn create(&self, attributes: Value) -> ProviderResult<Value>;

    /// `Ok(None)` means the entity is gone and the record must be dropped.
    async fn read(&self, record: Value) -> ProviderResult<Option<Value>>;

    async fn update(&self, record: Value, attributes: Value) -> ProviderResult<Value>;

    async fn delete(&self, record: Value) -> ProviderResult<()>;

    fn import(&self, id: &str) -> ProviderResult<Value>;
}

/// Lookup contract over JSON values.
#[async_trait]
pub trait DynLookup: Send + Sync {
    fn kind(&self) -> ResourceKind;

    async fn fetch_one(&self, id: &str) -> ProviderResult<Value>;

    async fn fetch_all(&self) -> ProviderResult<Vec<Value>>;
}

fn from_value<K: EntityKind, T: DeserializeOwned>(
    operation: Operation,
    value: Value,
) -> ProviderResult<T> {
    serde_json::from_value(value)
        .map_err(|e| ProviderError::invalid_record(operation, K::KIND, e.to_string()))
}

fn to_value<K: EntityKind, T: Serialize>(
    operation: Operation,
    value: &T,
) -> ProviderResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| ProviderError::invalid_record(operation, K::KIND, e.to_string()))
}

/// Serializes a lookup result without any sensitive key, not even as `null`.
fn lookup_value<K: EntityKind, T: Serialize>(
    operation: Operation,
    entity: &T,
) -> ProviderResult<Value> {
    let mut value = to_value::<K, _>(operation, entity)?;
    if let Value::Object(map) = &mut value {
        for field in K::SENSITIVE_FIELDS {
            map.remove(*field);
        }
    }
    Ok(value)
}

#[async_trait]
impl<K: EntityKind> DynResource for Resource<K> {
    fn kind(&self) -> ResourceKind {
        K::KIND
    }

    fn validate(&self, attributes: &Value) -> ProviderResult<()> {
        from_value::<K, K::Attributes>(Operation::Create, attributes.clone()).map(|_| ())
    }

    fn differs(&self, record: &Value, attributes: &Value) -> ProviderResult<bool> {
        let record: Record<K::Attributes> = from_value::<K, _>(Operation::Update, record.clone())?;
        let declared: K::Attributes = from_value::<K, _>(Operation::Update, attributes.clone())?;
        match record.attributes {
            Some(recorded) => fields::same_intent::<K>(&recorded, &declared)
                .map(|same| !same)
                .map_err(|e| {
                    ProviderError::invalid_record(Operation::Update, K::KIND, e.to_string())
                }),
            None => Ok(true),
        }
    }

    async fn create(&self, attributes: Value) -> ProviderResult<Value> {
        let declared: K::Attributes = from_value::<K, _>(Operation::Create, attributes)?;
        let record = Resource::create(self, &Record::declared(declared)).await?;
        to_value::<K, _>(Operation::Create, &record)
    }

    async fn read(&self, record: Value) -> ProviderResult<Option<Value>> {
        let current: Record<K::Attributes> = from_value::<K, _>(Operation::Read, record)?;
        match Resource::read(self, &current).await? {
            ReadOutcome::Present(record) => to_value::<K, _>(Operation::Read, &record).map(Some),
            ReadOutcome::Gone => Ok(None),
        }
    }

    async fn update(&self, record: Value, attributes: Value) -> ProviderResult<Value> {
        let current: Record<K::Attributes> = from_value::<K, _>(Operation::Update, record)?;
        let declared: K::Attributes = from_value::<K, _>(Operation::Update, attributes)?;
        let record = Resource::update(self, &current, &declared).await?;
        to_value::<K, _>(Operation::Update, &record)
    }

    async fn delete(&self, record: Value) -> ProviderResult<()> {
        let current: Record<K::Attributes> = from_value::<K, _>(Operation::Delete, record)?;
        Resource::delete(self, &current).await
    }

    fn import(&self, id: &str) -> ProviderResult<Value> {
        let record = Resource::import(self, id)?;
        to_value::<K, _>(Operation::Import, &record)
    }
}

#[async_trait]
impl<K: EntityKind> DynLookup for Lookup<K> {
    fn kind(&self) -> ResourceKind {
        K::KIND
    }

    async fn fetch_one(&self, id: &str) -> ProviderResult<Value> {
        let entity = Lookup::fetch_one(self, id).await?;
        lookup_value::<K, _>(Operation::FetchOne, &entity)
    }

    async fn fetch_all(&self) -> ProviderResult<Vec<Value>> {
        Lookup::fetch_all(self)
            .await?
            .iter()
            .map(|entity| lookup_value::<K, _>(Operation::FetchAll, entity))
            .collect()
    }
}
