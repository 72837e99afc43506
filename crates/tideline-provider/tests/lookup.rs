mod common;

use common::{FakeApi, api, start};
use serde_json::json;
use tideline_core::{Bot, ResourceKind, Secret};
use tideline_provider::{Provider, ProviderError};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bot(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "name": id.to_uppercase()
    })
}

#[tokio::test]
async fn test_fetch_all_drains_every_page_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bot/list"))
        .and(query_param_is_missing("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [bot("b1"), bot("b2")],
            "cursor": "c1"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bot/list"))
        .and(query_param("cursor", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [bot("b3"), bot("b4")],
            "cursor": "c2"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bot/list"))
        .and(query_param("cursor", "c2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [bot("b5")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = Provider::with_api(api(&server));
    let all = provider.lookup::<Bot>().unwrap().fetch_all().await.unwrap();

    let ids: Vec<&str> = all.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["b1", "b2", "b3", "b4", "b5"]);
    assert_eq!(all[4].attributes.name, "B5");
}

#[tokio::test]
async fn test_fetch_all_on_empty_account() {
    let fake = FakeApi::new();
    let (_server, provider) = start(&fake).await;

    let all = provider.lookup::<Bot>().unwrap().fetch_all().await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_fetch_all_against_paginating_server() {
    let fake = FakeApi::new().with_page_size(2);
    for n in 0..5 {
        fake.seed("skillset", json!({"name": format!("skills-{n}")}));
    }
    let (_server, provider) = start(&fake).await;

    let all = provider
        .lookup_for(ResourceKind::Skillset)
        .unwrap()
        .fetch_all()
        .await
        .unwrap();
    let names: Vec<&str> = all.iter().filter_map(|s| s["name"].as_str()).collect();
    assert_eq!(
        names,
        ["skills-0", "skills-1", "skills-2", "skills-3", "skills-4"]
    );
}

#[tokio::test]
async fn test_fetch_all_stops_on_first_failing_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bot/list"))
        .and(query_param_is_missing("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [bot("b1")],
            "cursor": "c1"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bot/list"))
        .and(query_param("cursor", "c1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "shard offline"})))
        .mount(&server)
        .await;

    let provider = Provider::with_api(api(&server));
    let err = provider.lookup::<Bot>().unwrap().fetch_all().await.unwrap_err();
    assert!(err.to_string().contains("shard offline"));
}

#[tokio::test]
async fn test_fetch_all_detects_repeating_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bot/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [bot("b1")],
            "cursor": "again"
        })))
        .mount(&server)
        .await;

    let provider = Provider::with_api(api(&server));
    let err = provider.lookup::<Bot>().unwrap().fetch_all().await.unwrap_err();
    assert!(matches!(
        err,
        ProviderError::PaginationLoop {
            kind: ResourceKind::Bot,
            ..
        }
    ));
}

#[tokio::test]
async fn test_fetch_one_and_not_found() {
    let fake = FakeApi::new();
    let id = fake.seed("bot", json!({"name": "Ada", "model": "gpt-x"}));
    let (_server, provider) = start(&fake).await;
    let bots = provider.lookup::<Bot>().unwrap();

    let found = bots.fetch_one(&id).await.unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.attributes.model, "gpt-x");

    let err = bots.fetch_one("bot_9999").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_secret_lookups_never_return_the_value() {
    let server = MockServer::start().await;
    let upstream = json!({
        "id": "secret_1",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "name": "openai",
        "value": "sk-leaked-upstream"
    });

    Mock::given(method("GET"))
        .and(path("/secret/secret_1/fetch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream.clone()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/secret/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [upstream]})))
        .mount(&server)
        .await;

    let provider = Provider::with_api(api(&server));

    let typed = provider.lookup::<Secret>().unwrap();
    let one = typed.fetch_one("secret_1").await.unwrap();
    assert_eq!(one.attributes.name, "openai");
    assert_eq!(one.attributes.value, None);
    let all = typed.fetch_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].attributes.value, None);

    let erased = provider.lookup_for(ResourceKind::Secret).unwrap();
    let one = erased.fetch_one("secret_1").await.unwrap();
    assert_eq!(one["name"], json!("openai"));
    assert!(one.get("value").is_none());
    let all = erased.fetch_all().await.unwrap();
    assert!(all.iter().all(|s| s.get("value").is_none()));
    assert!(!serde_json::to_string(&all).unwrap().contains("sk-leaked-upstream"));
}
