//! Typed per-kind façade over [`Transport`].
//!
//! Routes, with `{kind}` the lower-cased kind name:
//!
//! | operation | route                        |
//! |-----------|------------------------------|
//! | create    | `POST /{kind}/create`        |
//! | get       | `GET  /{kind}/{id}/fetch`    |
//! | update    | `POST /{kind}/{id}/update`   |
//! | delete    | `POST /{kind}/{id}/delete`   |
//! | list      | `GET  /{kind}/list[?cursor=]`|

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tideline_core::{Cursor, Entity, EntityKind, ListPage, fields};

use crate::ClientResult;
use crate::error::{ClientError, TransportError};
use crate::transport::{Method, Transport};

pub struct EntityClient<K> {
    transport: Arc<Transport>,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Clone for EntityClient<K> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            _kind: PhantomData,
        }
    }
}

impl<K: EntityKind> EntityClient<K> {
    #[must_use]
    pub fn new(transport: Arc<Transport>) -> Self {
        Self {
            transport,
            _kind: PhantomData,
        }
    }

    fn kind_name() -> &'static str {
        K::KIND.as_str()
    }

    /// The identifier is percent-encoded as one path segment, so reserved
    /// characters (`/`, `?`, `#`, ...) can never change the route.
    fn item_path(id: &str, action: &str) -> ClientResult<String> {
        if matches!(id, "" | "." | "..") {
            return Err(TransportError::Request(format!(
                "invalid {} identifier {id:?}",
                Self::kind_name()
            ))
            .into());
        }
        Ok(format!(
            "/{}/{}/{action}",
            K::route_prefix(),
            urlencoding::encode(id)
        ))
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
        serde_json::from_slice(bytes).map_err(|e| ClientError::decode(Self::kind_name(), &e))
    }

    fn body(draft: &K::Attributes) -> ClientResult<serde_json::Value> {
        fields::draft::<K>(draft).map_err(|e| TransportError::Request(e.to_string()).into())
    }

    /// Creates an entity and returns it with its server-assigned identifier
    /// and timestamps.
    ///
    /// # Errors
    ///
    /// Returns the transport/remote error of the call, a decode error, or
    /// [`ClientError::MissingIdentifier`] if the response carries no id.
    pub async fn create(
        &self,
        draft: &K::Attributes,
    ) -> ClientResult<Entity<K::Attributes>> {
        let body = Self::body(draft)?;
        let path = format!("/{}/create", K::route_prefix());
        let bytes = self.transport.execute(Method::Create, &path, Some(&body)).await?;
        let entity: Entity<K::Attributes> = Self::decode(&bytes)?;
        if !entity.has_id() {
            return Err(ClientError::MissingIdentifier {
                kind: Self::kind_name(),
            });
        }
        Ok(entity)
    }

    /// Fetches one entity. A missing identifier surfaces as a remote 404,
    /// see [`ClientError::is_not_found`].
    pub async fn get(&self, id: &str) -> ClientResult<Entity<K::Attributes>> {
        let path = Self::item_path(id, "fetch")?;
        let bytes = self.transport.execute::<()>(Method::Fetch, &path, None).await?;
        Self::decode(&bytes)
    }

    /// Overwrites every mutable field with `draft` and returns the refreshed
    /// entity.
    pub async fn update(
        &self,
        id: &str,
        draft: &K::Attributes,
    ) -> ClientResult<Entity<K::Attributes>> {
        let body = Self::body(draft)?;
        let path = Self::item_path(id, "update")?;
        let bytes = self.transport.execute(Method::Update, &path, Some(&body)).await?;
        Self::decode(&bytes)
    }

    /// Deletes an entity. Not-found is reported like any other failure.
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let path = Self::item_path(id, "delete")?;
        self.transport.execute::<()>(Method::Delete, &path, None).await?;
        Ok(())
    }

    /// Fetches exactly one page. `None` (or an empty cursor) starts at the
    /// beginning of the list.
    pub async fn list(
        &self,
        cursor: Option<&Cursor>,
    ) -> ClientResult<ListPage<K::Attributes>> {
        let mut path = format!("/{}/list", K::route_prefix());
        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            let encoded: String =
                url::form_urlencoded::byte_serialize(cursor.as_str().as_bytes()).collect();
            path.push_str("?cursor=");
            path.push_str(&encoded);
        }
        let bytes = self.transport.execute::<()>(Method::List, &path, None).await?;
        Self::decode(&bytes)
    }
}
