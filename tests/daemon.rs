mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use grid_relay::config::{Config, TextureConfig};
use grid_relay::daemon::{build_router, AppState};
use grid_relay::{Notification, Relay};

fn state(cache: &TempDir) -> AppState {
    let relay = Relay::from_config(Config {
        textures: Some(TextureConfig {
            cache_dir: Some(cache.path().to_string_lossy().to_string()),
            ..TextureConfig::default()
        }),
        ..Config::default()
    })
    .unwrap();
    AppState::new(relay, "token")
}

fn app(cache: &TempDir) -> Router {
    build_router(state(cache))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", "Bearer token");
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn open(app: &Router, events: Option<Value>) -> String {
    let body = events.map(|events| json!({ "events": events }));
    let (status, value) = send(app, "POST", "/sessions", body).await;
    assert_eq!(status, StatusCode::CREATED);
    value["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_open_and_sessions_require_auth() {
    let cache = TempDir::new().unwrap();
    let app = app(&cache);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/sessions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/sessions")
                .header("x-api-key", "token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn notifications_drain_through_routes() {
    let cache = TempDir::new().unwrap();
    let app = app(&cache);
    let id = open(&app, Some(json!(["SpatialChat", "PresenceSnapshot"]))).await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/sessions/{id}/presence"),
        Some(json!({
            "region": "Ahern",
            "position": {"X": 10.0, "Y": 20.0, "Z": 30.0}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let chat = json!({
        "kind": "chat",
        "message": "hi",
        "audible": 1,
        "chat_type": 1,
        "source_type": 1,
        "from_name": "Resident",
        "id": Uuid::from_u128(1),
        "owner_id": Uuid::from_u128(1),
        "position": {"X": 0.0, "Y": 0.0, "Z": 0.0}
    });
    let uri = format!("/sessions/{id}/notifications");
    let (status, _) = send(&app, "POST", &uri, Some(chat)).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    send(&app, "POST", &uri, Some(json!({"kind": "balance_updated", "balance": 50}))).await;

    let (_, count) = send(&app, "GET", &format!("/sessions/{id}/events/count"), None).await;
    assert_eq!(count, json!({"count": 1}));

    let (status, events) = send(&app, "POST", &format!("/sessions/{id}/events"), None).await;
    assert_eq!(status, StatusCode::OK);
    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["MessageType"], json!("SpatialChat"));
    assert_eq!(events[0]["Message"], json!("hi"));
    assert_eq!(events[1]["MessageType"], json!("PresenceSnapshot"));
    assert_eq!(events[1]["YourRegion"], json!("Ahern"));
    assert_eq!(events[1]["YourPosition"]["Y"], json!(20.0));
}

#[tokio::test]
async fn avatar_notifications_feed_presence() {
    let cache = TempDir::new().unwrap();
    let app = app(&cache);
    let id = open(&app, Some(json!(["PresenceSnapshot"]))).await;
    let avatar = Uuid::from_u128(9);

    send(
        &app,
        "POST",
        &format!("/sessions/{id}/notifications"),
        Some(json!({
            "kind": "avatar_added",
            "id": avatar,
            "local_id": 12,
            "name": "Neighbour",
            "position": {"X": 1.0, "Y": 2.0, "Z": 3.0}
        })),
    )
    .await;

    let (_, events) = send(&app, "POST", &format!("/sessions/{id}/events"), None).await;
    assert_eq!(events.as_array().unwrap().len(), 1);
    assert_eq!(
        events[0]["Positions"][avatar.to_string()],
        json!({"X": 1.0, "Y": 2.0, "Z": 3.0})
    );
}

#[tokio::test]
async fn offers_report_acceptance() {
    let cache = TempDir::new().unwrap();
    let app = app(&cache);
    let id = open(&app, None).await;
    let offer = json!({
        "kind": "object_offered",
        "from_agent_id": Uuid::from_u128(1),
        "from_agent_name": "Giver",
        "region_id": Uuid::from_u128(2),
        "position": {"X": 0.0, "Y": 0.0, "Z": 0.0},
        "timestamp": 0,
        "asset_type": 6,
        "object_id": Uuid::from_u128(3),
        "from_task": false
    });

    let (status, reply) = send(
        &app,
        "POST",
        &format!("/sessions/{id}/notifications"),
        Some(offer),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply, json!({"accepted": true}));

    let (_, events) = send(&app, "POST", &format!("/sessions/{id}/events"), None).await;
    assert_eq!(events[0]["MessageType"], json!("ObjectOffered"));
    assert_eq!(events[0]["FromAgentName"], json!("Giver"));
}

#[tokio::test]
async fn inventory_routes_drive_the_memo() {
    let cache = TempDir::new().unwrap();
    let app = app(&cache);
    let id = open(&app, Some(json!(["FolderUpdated"]))).await;
    let folder = Uuid::from_u128(40);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/sessions/{id}/inventory/{folder}"),
        Some(json!([{
            "kind": "folder",
            "uuid": Uuid::from_u128(41),
            "parent_uuid": folder,
            "name": "Objects",
            "preferred_type": 6,
            "owner_id": Uuid::from_u128(1)
        }])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let notify = format!("/sessions/{id}/notifications");
    let drain = format!("/sessions/{id}/events");
    let updated = json!({"kind": "folder_updated", "folder_id": folder});

    send(&app, "POST", &notify, Some(updated.clone())).await;
    let (_, events) = send(&app, "POST", &drain, None).await;
    assert_eq!(events[0]["Contents"].as_array().unwrap().len(), 1);

    send(&app, "POST", &notify, Some(updated.clone())).await;
    let (_, events) = send(&app, "POST", &drain, None).await;
    assert!(events[0]["Contents"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, "POST", &format!("/sessions/{id}/inventory/reset"), None).await;
    assert_eq!(status, StatusCode::OK);
    send(&app, "POST", &notify, Some(updated)).await;
    let (_, events) = send(&app, "POST", &drain, None).await;
    assert_eq!(events[0]["Contents"][0]["Name"], json!("Objects"));
}

#[tokio::test]
async fn closed_and_unknown_sessions_are_not_found() {
    let cache = TempDir::new().unwrap();
    let app = app(&cache);
    let id = open(&app, None).await;

    let (status, _) = send(&app, "DELETE", &format!("/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, error) = send(&app, "GET", &format!("/sessions/{id}/events/count"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(error["error"].as_str().unwrap().contains(&id));

    let (status, _) = send(&app, "DELETE", "/sessions/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_session_request_is_rejected() {
    let cache = TempDir::new().unwrap();
    let app = app(&cache);
    let (status, error) = send(&app, "POST", "/sessions", Some(json!({"events": "SpatialChat"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error.get("error").is_some());
}

#[tokio::test]
async fn full_size_texture_notifications_are_accepted() {
    let cache = TempDir::new().unwrap();
    let app = app(&cache);
    let id = open(&app, Some(json!(["ImageDownloaded"]))).await;
    let asset_id = Uuid::from_u128(50);
    let job = Notification::TextureDownloaded(common::finished_job(asset_id, 1024, 1024));

    let (status, _) = send(
        &app,
        "POST",
        &format!("/sessions/{id}/notifications"),
        Some(serde_json::to_value(job).unwrap()),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let count = format!("/sessions/{id}/events/count");
    for _ in 0..2000 {
        let (_, value) = send(&app, "GET", &count, None).await;
        if value == json!({"count": 1}) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let (_, events) = send(&app, "POST", &format!("/sessions/{id}/events"), None).await;
    assert_eq!(events[0]["MessageType"], json!("ImageDownloaded"));
    assert_eq!(events[0]["UUID"], json!(asset_id));
    assert_eq!(events[0]["Success"], json!(true));
}

#[tokio::test]
async fn bodies_over_the_configured_limit_are_rejected() {
    let cache = TempDir::new().unwrap();
    let app = build_router(state(&cache).with_max_body_bytes(64));
    let (status, _) = send(&app, "POST", "/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = send(
        &app,
        "POST",
        "/sessions",
        Some(json!({"events": ["SpatialChat", "PresenceSnapshot", "ImageDownloaded", "FolderUpdated"]})),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(error.get("error").is_some());
}

#[tokio::test]
async fn credentials_are_checked_before_the_body() {
    let cache = TempDir::new().unwrap();
    let app = build_router(state(&cache).with_max_body_bytes(64));
    let id = open(&app, None).await;

    for (uri, method, body) in [
        (format!("/sessions/{id}/notifications"), "POST", "not json".to_string()),
        (format!("/sessions/{id}/notifications"), "POST", "x".repeat(1024)),
        (format!("/sessions/{id}/presence"), "PUT", "{".to_string()),
        (format!("/sessions/{id}/inventory/{}", Uuid::from_u128(1)), "PUT", "[1]".to_string()),
    ] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(&uri)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/sessions/{id}/notifications"))
                .header("authorization", "Bearer token")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
