//! Reconciler contract: Create/Read/Update/Delete/Import for one kind.
//!
//! A declared instance is either Unmanaged (no identifier) or Present
//! (identifier recorded). Every operation is all-or-nothing from the host's
//! point of view: on error the host keeps the record it passed in.

use tideline_client::{ClientError, EntityClient};
use tideline_core::{EntityKind, Record, fields};

use crate::error::{Operation, ProviderError, ProviderResult};

/// Result of a Read.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<A> {
    /// The entity exists; the record reflects server truth.
    Present(Record<A>),
    /// The entity was deleted out of band. The host drops the record.
    Gone,
}

impl<A> ReadOutcome<A> {
    #[must_use]
    pub fn into_record(self) -> Option<Record<A>> {
        match self {
            Self::Present(record) => Some(record),
            Self::Gone => None,
        }
    }
}

pub struct Resource<K: EntityKind> {
    client: EntityClient<K>,
}

impl<K: EntityKind> Clone for Resource<K> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<K: EntityKind> Resource<K> {
    #[must_use]
    pub fn new(client: EntityClient<K>) -> Self {
        Self { client }
    }

    fn fail(operation: Operation, id: Option<&str>, source: ClientError) -> ProviderError {
        tracing::warn!(
            kind = %K::KIND,
            operation = %operation,
            id = id.unwrap_or_default(),
            category = %source.category(),
            "Resource operation failed"
        );
        ProviderError::operation(operation, K::KIND, id, source)
    }

    fn field_error(
        operation: Operation,
        id: Option<&str>,
        err: &serde_json::Error,
    ) -> ProviderError {
        Self::fail(operation, id, ClientError::decode(K::KIND.as_str(), err))
    }

    fn present_id(operation: Operation, record: &Record<K::Attributes>) -> ProviderResult<&str> {
        record
            .id()
            .ok_or_else(|| {
                ProviderError::invalid_record(operation, K::KIND, "no identifier recorded")
            })
    }

    /// Creates the entity described by an Unmanaged record.
    ///
    /// The returned record carries the declared attributes (plus any
    /// server-computed fields), the new identifier and both timestamps.
    ///
    /// # Errors
    ///
    /// Fails without side effects on the host record if the record already
    /// has an identifier, has no attributes, or the call fails.
    pub async fn create(
        &self,
        declared: &Record<K::Attributes>,
    ) -> ProviderResult<Record<K::Attributes>> {
        if declared.is_present() {
            return Err(ProviderError::invalid_record(
                Operation::Create,
                K::KIND,
                "record already has an identifier",
            ));
        }
        let attributes = declared.attributes.as_ref().ok_or_else(|| {
            ProviderError::invalid_record(Operation::Create, K::KIND, "no attributes declared")
        })?;

        let entity = self
            .client
            .create(attributes)
            .await
            .map_err(|e| Self::fail(Operation::Create, None, e))?;

        let attributes = fields::merge_computed::<K>(attributes.clone(), &entity.attributes)
            .map_err(|e| Self::field_error(Operation::Create, Some(&entity.id), &e))?;

        tracing::info!(kind = %K::KIND, id = %entity.id, "Created resource");
        Ok(Record {
            id: Some(entity.id),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            attributes: Some(attributes),
        })
    }

    /// Re-fetches a Present record and overwrites its tracked fields with
    /// server values. Identifier and creation timestamp are kept; write-only
    /// fields keep their previously recorded value.
    ///
    /// # Errors
    ///
    /// Any failure except not-found. Not-found yields [`ReadOutcome::Gone`].
    pub async fn read(
        &self,
        current: &Record<K::Attributes>,
    ) -> ProviderResult<ReadOutcome<K::Attributes>> {
        let id = Self::present_id(Operation::Read, current)?;

        let entity = match self.client.get(id).await {
            Ok(entity) => entity,
            Err(e) if e.is_not_found() => {
                tracing::info!(
                    kind = %K::KIND,
                    id,
                    "Resource no longer exists remotely, dropping it"
                );
                return Ok(ReadOutcome::Gone);
            }
            Err(e) => return Err(Self::fail(Operation::Read, Some(id), e)),
        };

        let attributes =
            fields::keep_write_only::<K>(entity.attributes, current.attributes.as_ref())
                .map_err(|e| Self::field_error(Operation::Read, Some(id), &e))?;

        tracing::debug!(kind = %K::KIND, id, "Refreshed resource");
        Ok(ReadOutcome::Present(Record {
            id: Some(id.to_string()),
            created_at: current.created_at.or(entity.created_at),
            updated_at: entity.updated_at,
            attributes: Some(attributes),
        }))
    }

    /// Sends the full declared shape to the server.
    ///
    /// Nothing is diffed: an empty field in `declared` resets that field
    /// remotely. Only the update timestamp and computed fields are taken from
    /// the response.
    ///
    /// # Errors
    ///
    /// Fails if `current` has no identifier or the call fails.
    pub async fn update(
        &self,
        current: &Record<K::Attributes>,
        declared: &K::Attributes,
    ) -> ProviderResult<Record<K::Attributes>> {
        let id = Self::present_id(Operation::Update, current)?;

        let entity = self
            .client
            .update(id, declared)
            .await
            .map_err(|e| Self::fail(Operation::Update, Some(id), e))?;

        let attributes = fields::merge_computed::<K>(declared.clone(), &entity.attributes)
            .map_err(|e| Self::field_error(Operation::Update, Some(id), &e))?;

        tracing::info!(kind = %K::KIND, id, "Updated resource");
        Ok(Record {
            id: Some(id.to_string()),
            created_at: current.created_at,
            updated_at: entity.updated_at.or(current.updated_at),
            attributes: Some(attributes),
        })
    }

    /// Deletes a Present record's entity. On success the host drops the
    /// record; on failure it must keep it.
    ///
    /// # Errors
    ///
    /// Every failure is surfaced, including not-found.
    pub async fn delete(&self, current: &Record<K::Attributes>) -> ProviderResult<()> {
        let id = Self::present_id(Operation::Delete, current)?;

        self.client
            .delete(id)
            .await
            .map_err(|e| Self::fail(Operation::Delete, Some(id), e))?;

        tracing::info!(kind = %K::KIND, id, "Deleted resource");
        Ok(())
    }

    /// Seeds a Present record for an entity that already exists remotely.
    /// No call is made; the next Read fills in the attributes.
    ///
    /// # Errors
    ///
    /// Fails if `id` is blank.
    pub fn import(&self, id: &str) -> ProviderResult<Record<K::Attributes>> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ProviderError::invalid_record(
                Operation::Import,
                K::KIND,
                "identifier must not be empty",
            ));
        }
        tracing::info!(kind = %K::KIND, id, "Imported resource");
        Ok(Record::imported(id))
    }
}
