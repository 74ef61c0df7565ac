//! RestStore against a local stand-in for the Redis REST endpoint.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use store::{KeyValueStore, RestStore, StoreConfig, StoreError, UserRepository};

const TOKEN: &str = "test-token";

#[derive(Clone, Default)]
struct Stub {
    data: Arc<Mutex<HashMap<String, String>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {TOKEN}"))
        .unwrap_or(false)
}

async fn get_command(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Path(key): Path<String>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "unauthorized").into_response();
    }
    let value = stub.data.lock().unwrap().get(&key).cloned();
    Json(json!({ "result": value })).into_response()
}

async fn set_command(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "unauthorized").into_response();
    }
    let args: Vec<String> = body["args"]
        .as_array()
        .map(|a| {
            a.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    if args.len() != 2 {
        return Json(json!({ "error": "ERR wrong number of arguments for 'set' command" }))
            .into_response();
    }
    stub.data
        .lock()
        .unwrap()
        .insert(args[0].clone(), args[1].clone());
    Json(json!({ "result": "OK" })).into_response()
}

async fn spawn_stub() -> (String, Stub) {
    let stub = Stub::default();
    let app = Router::new()
        .route("/GET/{key}", get(get_command))
        .route("/SET", post(set_command))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), stub)
}

fn rest_store(endpoint: &str, token: Option<&str>) -> RestStore {
    RestStore::new(&StoreConfig::rest(endpoint, token.map(str::to_string))).unwrap()
}

#[tokio::test]
async fn get_missing_key_is_none() {
    let (endpoint, _stub) = spawn_stub().await;
    let store = rest_store(&endpoint, Some(TOKEN));
    assert_eq!(store.get("user:nobody").await.unwrap(), None);
}

#[tokio::test]
async fn set_then_get_round_trips_through_http() {
    let (endpoint, stub) = spawn_stub().await;
    let store = rest_store(&endpoint, Some(TOKEN));

    store.set("user:emily kwan", "Emily Kwan").await.unwrap();
    assert_eq!(
        stub.data.lock().unwrap().get("user:emily kwan").map(String::as_str),
        Some("Emily Kwan")
    );
    assert_eq!(
        store.get("user:emily kwan").await.unwrap().as_deref(),
        Some("Emily Kwan")
    );
}

#[tokio::test]
async fn missing_token_surfaces_status() {
    let (endpoint, _stub) = spawn_stub().await;
    let store = rest_store(&endpoint, None);

    match store.get("user:emily kwan").await {
        Err(StoreError::Status { status, .. }) => assert_eq!(status, 401),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn ping_uses_get() {
    let (endpoint, _stub) = spawn_stub().await;
    let store = rest_store(&endpoint, Some(TOKEN));
    assert!(store.ping().await.is_ok());
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = rest_store(&format!("http://{addr}"), Some(TOKEN));
    assert!(matches!(
        store.get("user:emily kwan").await,
        Err(StoreError::Transport(_))
    ));
}

#[tokio::test]
async fn repository_over_rest_validates_password() {
    let (endpoint, stub) = spawn_stub().await;
    stub.data
        .lock()
        .unwrap()
        .insert("user:arden_chew:password".into(), "rich-table".into());

    let repo = UserRepository::new(Arc::new(rest_store(&endpoint, Some(TOKEN))));
    assert!(repo.validate_password("arden_chew", "rich-table").await.unwrap());
    assert!(!repo.validate_password("arden_chew", "wrong").await.unwrap());
}
