//! Read-only lookups. Sensitive fields are always redacted.

use std::collections::HashSet;

use tideline_client::{ClientError, EntityClient};
use tideline_core::{Entity, EntityKind, fields};

use crate::error::{Operation, ProviderError, ProviderResult};

pub struct Lookup<K: EntityKind> {
    client: EntityClient<K>,
}

impl<K: EntityKind> Clone for Lookup<K> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<K: EntityKind> Lookup<K> {
    #[must_use]
    pub fn new(client: EntityClient<K>) -> Self {
        Self { client }
    }

    fn fail(operation: Operation, id: Option<&str>, source: ClientError) -> ProviderError {
        if !source.is_not_found() {
            tracing::warn!(
                kind = %K::KIND,
                operation = %operation,
                category = %source.category(),
                "Lookup failed"
            );
        }
        ProviderError::operation(operation, K::KIND, id, source)
    }

    fn redact(
        operation: Operation,
        mut entity: Entity<K::Attributes>,
    ) -> ProviderResult<Entity<K::Attributes>> {
        entity.attributes = fields::redact::<K>(entity.attributes).map_err(|e| {
            Self::fail(
                operation,
                Some(&entity.id),
                ClientError::decode(K::KIND.as_str(), &e),
            )
        })?;
        Ok(entity)
    }

    /// Current state of one entity.
    ///
    /// # Errors
    ///
    /// Not-found is returned as an error (see [`ProviderError::is_not_found`]).
    pub async fn fetch_one(&self, id: &str) -> ProviderResult<Entity<K::Attributes>> {
        let entity = self
            .client
            .get(id)
            .await
            .map_err(|e| Self::fail(Operation::FetchOne, Some(id), e))?;
        Self::redact(Operation::FetchOne, entity)
    }

    /// Every entity of the kind, draining all pages in order.
    ///
    /// Pages are requested one after another; the whole listing is collected
    /// before returning.
    ///
    /// # Errors
    ///
    /// The first failing page call aborts the listing. A cursor served twice
    /// is reported as [`ProviderError::PaginationLoop`].
    pub async fn fetch_all(&self) -> ProviderResult<Vec<Entity<K::Attributes>>> {
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = None;
        let mut pages = 0usize;

        loop {
            let page = self
                .client
                .list(cursor.as_ref())
                .await
                .map_err(|e| Self::fail(Operation::FetchAll, None, e))?;
            pages += 1;

            let next = page.next_cursor().cloned();
            for entity in page.items {
                items.push(Self::redact(Operation::FetchAll, entity)?);
            }

            match next {
                Some(next) => {
                    if !seen.insert(next.clone()) {
                        return Err(ProviderError::PaginationLoop {
                            kind: K::KIND,
                            cursor: next.as_str().to_string(),
                        });
                    }
                    cursor = Some(next);
                }
                None => break,
            }
        }

        tracing::debug!(kind = %K::KIND, pages, count = items.len(), "Listed resources");
        Ok(items)
    }
}
