//! In-memory stand-in for the remote API, served through wiremock.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value, json};
use tideline_client::{ApiClient, ClientConfig};
use tideline_provider::Provider;
use time::format_description::well_known::Rfc3339;
use time::macros::datetime;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TOKEN: &str = "test-token";

#[derive(Default)]
struct Store {
    entities: BTreeMap<String, BTreeMap<String, Map<String, Value>>>,
    next_id: u64,
    clock: i64,
    page_size: usize,
}

impl Store {
    fn tick(&mut self) -> Value {
        self.clock += 1;
        let at = datetime!(2024-01-01 0:00 UTC) + time::Duration::seconds(self.clock);
        Value::String(at.format(&Rfc3339).unwrap())
    }

    fn compute(kind: &str, entity: &mut Map<String, Value>) {
        match kind {
            "file" => {
                let size = entity
                    .get("content")
                    .and_then(Value::as_str)
                    .map_or(0, str::len);
                entity.insert("size_bytes".into(), json!(size));
            }
            "integration" => {
                entity.insert("status".into(), json!("syncing"));
            }
            _ => {}
        }
    }
}

/// Stateful fake: create/fetch/update/delete/list over a per-kind map.
///
/// Stored entities keep every field sent to them, secret values included, so
/// redaction has to happen on the client side.
#[derive(Clone, Default)]
pub struct FakeApi {
    store: Arc<Mutex<Store>>,
}

fn error(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({"error": {"message": message}}))
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(self, page_size: usize) -> Self {
        self.store.lock().unwrap().page_size = page_size;
        self
    }

    /// Inserts an entity directly, bypassing the API.
    pub fn seed(&self, kind: &str, attributes: Value) -> String {
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        let id = format!("{kind}_{:04}", store.next_id);
        let now = store.tick();
        let mut entity = match attributes {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        entity.insert("id".into(), json!(id));
        entity.insert("created_at".into(), now.clone());
        entity.insert("updated_at".into(), now);
        Store::compute(kind, &mut entity);
        store
            .entities
            .entry(kind.to_string())
            .or_default()
            .insert(id.clone(), entity);
        id
    }

    /// Current server-side copy of an entity.
    pub fn stored(&self, kind: &str, id: &str) -> Option<Value> {
        let store = self.store.lock().unwrap();
        store
            .entities
            .get(kind)
            .and_then(|m| m.get(id))
            .map(|e| Value::Object(e.clone()))
    }

    /// Changes a field behind the reconciler's back.
    pub fn tamper(&self, kind: &str, id: &str, field: &str, value: Value) {
        let mut store = self.store.lock().unwrap();
        if let Some(entity) = store.entities.get_mut(kind).and_then(|m| m.get_mut(id)) {
            entity.insert(field.to_string(), value);
        }
    }

    /// Deletes an entity out of band.
    pub fn remove(&self, kind: &str, id: &str) -> bool {
        let mut store = self.store.lock().unwrap();
        store
            .entities
            .get_mut(kind)
            .and_then(|m| m.remove(id))
            .is_some()
    }

    pub fn count(&self, kind: &str) -> usize {
        let store = self.store.lock().unwrap();
        store.entities.get(kind).map_or(0, BTreeMap::len)
    }
}

impl Respond for FakeApi {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let expected = format!("Bearer {TOKEN}");
        if request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            != Some(expected.as_str())
        {
            return error(401, "missing credential");
        }

        let path = request.url.path().trim_start_matches('/').to_string();
        let segments: Vec<&str> = path.split('/').collect();
        let mut store = self.store.lock().unwrap();

        match (request.method.as_str(), segments.as_slice()) {
            ("POST", [kind, "create"]) => {
                let Ok(Value::Object(mut entity)) = serde_json::from_slice::<Value>(&request.body) else {
                    return error(400, "body must be a JSON object");
                };
                if entity.get("name").and_then(Value::as_str).unwrap_or("").is_empty() {
                    return error(422, "name is required");
                }
                store.next_id += 1;
                let id = format!("{kind}_{:04}", store.next_id);
                let now = store.tick();
                entity.insert("id".into(), json!(id));
                entity.insert("created_at".into(), now.clone());
                entity.insert("updated_at".into(), now);
                Store::compute(kind, &mut entity);
                store
                    .entities
                    .entry((*kind).to_string())
                    .or_default()
                    .insert(id, entity.clone());
                ResponseTemplate::new(200).set_body_json(Value::Object(entity))
            }
            ("GET", [kind, "list"]) => {
                let offset = request
                    .url
                    .query_pairs()
                    .find(|(k, _)| k == "cursor")
                    .and_then(|(_, v)| v.strip_prefix("page:").and_then(|n| n.parse().ok()))
                    .unwrap_or(0usize);
                let page_size = if store.page_size == 0 { 100 } else { store.page_size };
                let all: Vec<Value> = store
                    .entities
                    .get(*kind)
                    .map(|m| m.values().cloned().map(Value::Object).collect())
                    .unwrap_or_default();
                let items: Vec<Value> = all.iter().skip(offset).take(page_size).cloned().collect();
                let mut body = json!({ "items": items });
                if offset + page_size < all.len() {
                    body["cursor"] = json!(format!("page:{}", offset + page_size));
                }
                ResponseTemplate::new(200).set_body_json(body)
            }
            ("GET", [kind, id, "fetch"]) => {
                match store.entities.get(*kind).and_then(|m| m.get(*id)) {
                    Some(entity) => ResponseTemplate::new(200).set_body_json(Value::Object(entity.clone())),
                    None => error(404, &format!("{kind} {id} not found")),
                }
            }
            ("POST", [kind, id, "update"]) => {
                let Ok(Value::Object(mut entity)) = serde_json::from_slice::<Value>(&request.body) else {
                    return error(400, "body must be a JSON object");
                };
                let now = store.tick();
                let Some(existing) = store.entities.get_mut(*kind).and_then(|m| m.get_mut(*id)) else {
                    return error(404, &format!("{kind} {id} not found"));
                };
                entity.insert("id".into(), existing["id"].clone());
                entity.insert("created_at".into(), existing["created_at"].clone());
                entity.insert("updated_at".into(), now);
                Store::compute(kind, &mut entity);
                *existing = entity.clone();
                ResponseTemplate::new(200).set_body_json(Value::Object(entity))
            }
            ("POST", [kind, id, "delete"]) => {
                match store.entities.get_mut(*kind).and_then(|m| m.remove(*id)) {
                    Some(_) => ResponseTemplate::new(200).set_body_json(json!({})),
                    None => error(404, &format!("{kind} {id} not found")),
                }
            }
            _ => error(404, "no such route"),
        }
    }
}

/// Starts a mock server backed by `fake` and a provider pointed at it.
pub async fn start(fake: &FakeApi) -> (MockServer, Provider) {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(fake.clone())
        .mount(&server)
        .await;

    let mut provider = Provider::new();
    provider.configure(&config(&server)).unwrap();
    (server, provider)
}

pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(&server.uri(), TOKEN).unwrap()
}

pub fn api(server: &MockServer) -> ApiClient {
    ApiClient::new(&config(server)).unwrap()
}
