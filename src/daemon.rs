use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::{Json, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::client::{Relay, RelaySession};
use crate::config::{Config, DEFAULT_MAX_BODY_BYTES};
use crate::domains::inventory::InventoryNode;
use crate::domains::notification::Notification;
use crate::domains::world::PresenceState;
use crate::error::{RelayError, Result};
use crate::providers::memory::InMemorySession;

/// A registered subscriber and the session state mirrored for it.
pub struct SessionEntry {
    pub session: RelaySession,
    pub mirror: Arc<InMemorySession>,
}

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
    pub sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    pub token: String,
    /// Largest request body read, in bytes. Texture notifications carry raw
    /// pixels, so this is well above axum's default.
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(relay: Relay, token: &str) -> Self {
        Self {
            relay: Arc::new(relay),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            token: token.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    sessions: usize,
}

#[derive(Deserialize, Default)]
struct CreateSessionRequest {
    events: Option<Vec<String>>,
}

#[derive(Serialize)]
struct CreateSessionResponse {
    session_id: String,
}

#[derive(Serialize)]
struct CountResponse {
    count: usize,
}

#[derive(Serialize)]
struct OfferResponse {
    accepted: bool,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

type Rejection = (StatusCode, Json<ErrorResponse>);

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", delete(close_session))
        .route("/sessions/:id/notifications", post(ingest_notification))
        .route("/sessions/:id/presence", put(replace_presence))
        .route("/sessions/:id/inventory/reset", post(reset_inventory))
        .route("/sessions/:id/inventory/:folder_id", put(replace_folder))
        .route("/sessions/:id/events", post(drain_events))
        .route("/sessions/:id/events/count", get(count_events))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        sessions: state.sessions.read().len(),
    })
}

async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> impl IntoResponse {
    if let Err(err) = authorize(&headers, &state.token) {
        return err.into_response();
    }

    let body = match read_body(body, state.max_body_bytes).await {
        Ok(body) => body,
        Err(err) => return err.into_response(),
    };
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        CreateSessionRequest::default()
    } else {
        match serde_json::from_slice::<CreateSessionRequest>(&body) {
            Ok(request) => request,
            Err(err) => return bad_request(err.to_string()).into_response(),
        }
    };

    let mirror = Arc::new(InMemorySession::new());
    let session = state.relay.open_session(mirror.clone(), request.events);
    let session_id = Uuid::new_v4().to_string();
    state
        .sessions
        .write()
        .insert(session_id.clone(), SessionEntry { session, mirror });
    tracing::info!(session_id = %session_id, "session opened");

    (
        StatusCode::CREATED,
        Json(CreateSessionResponse { session_id }),
    )
        .into_response()
}

async fn close_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> impl IntoResponse {
    if let Err(err) = authorize(&headers, &state.token) {
        return err.into_response();
    }

    let removed = state.sessions.write().remove(&id);
    match removed {
        Some(entry) => {
            // The worker finishes its queued jobs on its own; nothing waits on it.
            drop(entry.session.close());
            tracing::info!(session_id = %id, "session closed");
            (StatusCode::OK, Json(json!({"status": "ok"}))).into_response()
        }
        None => unknown_session(&id).into_response(),
    }
}

async fn ingest_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Body,
) -> Response {
    if let Err(err) = authorize(&headers, &state.token) {
        return err.into_response();
    }
    let notification: Notification = match read_json(body, state.max_body_bytes).await {
        Ok(notification) => notification,
        Err(err) => return err.into_response(),
    };

    let sessions = state.sessions.read();
    let Some(entry) = sessions.get(&id) else {
        return unknown_session(&id).into_response();
    };

    entry.mirror.observe(&notification);
    match notification {
        Notification::ObjectOffered(offer) => {
            let reply = entry.session.object_offered(&offer);
            (
                StatusCode::OK,
                Json(OfferResponse {
                    accepted: reply.accepted(),
                }),
            )
                .into_response()
        }
        other => {
            entry.session.notify(other);
            (StatusCode::ACCEPTED, Json(json!({"status": "ok"}))).into_response()
        }
    }
}

async fn replace_presence(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Body,
) -> Response {
    if let Err(err) = authorize(&headers, &state.token) {
        return err.into_response();
    }
    let presence: PresenceState = match read_json(body, state.max_body_bytes).await {
        Ok(presence) => presence,
        Err(err) => return err.into_response(),
    };

    with_session(&state, &id, |entry| {
        entry.mirror.set_presence(presence);
        (StatusCode::OK, Json(json!({"status": "ok"}))).into_response()
    })
}

async fn replace_folder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, folder_id)): Path<(String, Uuid)>,
    body: Body,
) -> Response {
    if let Err(err) = authorize(&headers, &state.token) {
        return err.into_response();
    }
    let contents: Vec<InventoryNode> = match read_json(body, state.max_body_bytes).await {
        Ok(contents) => contents,
        Err(err) => return err.into_response(),
    };

    with_session(&state, &id, |entry| {
        entry.mirror.cache_folder(folder_id, contents);
        (StatusCode::OK, Json(json!({"status": "ok"}))).into_response()
    })
}

async fn reset_inventory(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(err) = authorize(&headers, &state.token) {
        return err.into_response();
    }

    with_session(&state, &id, |entry| {
        entry.session.reset_inventory_cache();
        (StatusCode::OK, Json(json!({"status": "ok"}))).into_response()
    })
}

async fn drain_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(err) = authorize(&headers, &state.token) {
        return err.into_response();
    }

    with_session(&state, &id, |entry| {
        (StatusCode::OK, Json(entry.session.drain())).into_response()
    })
}

async fn count_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(err) = authorize(&headers, &state.token) {
        return err.into_response();
    }

    with_session(&state, &id, |entry| {
        (
            StatusCode::OK,
            Json(CountResponse {
                count: entry.session.count(),
            }),
        )
            .into_response()
    })
}

fn with_session<F>(state: &AppState, id: &str, action: F) -> Response
where
    F: FnOnce(&SessionEntry) -> Response,
{
    let sessions = state.sessions.read();
    match sessions.get(id) {
        Some(entry) => action(entry),
        None => unknown_session(id).into_response(),
    }
}

fn unknown_session(id: &str) -> Rejection {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Unknown session: {id}"),
        }),
    )
}

fn bad_request(error: String) -> Rejection {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

/// Bodies are only read once the caller is authorized.
async fn read_body(body: Body, limit: usize) -> std::result::Result<axum::body::Bytes, Rejection> {
    to_bytes(body, limit).await.map_err(|err| {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(ErrorResponse {
                error: format!("Request body rejected: {err}"),
            }),
        )
    })
}

async fn read_json<T: DeserializeOwned>(body: Body, limit: usize) -> std::result::Result<T, Rejection> {
    let bytes = read_body(body, limit).await?;
    serde_json::from_slice(&bytes).map_err(|err| bad_request(err.to_string()))
}

fn authorize(headers: &HeaderMap, token: &str) -> std::result::Result<(), Rejection> {
    let header = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let api_key = headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let bearer = header.strip_prefix("Bearer ").unwrap_or("");

    if bearer == token || api_key == token {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Unauthorized".to_string(),
            }),
        ))
    }
}

pub async fn run(host: &str, port: u16, config: Config, token: &str) -> Result<()> {
    run_with_shutdown(host, port, config, token, futures::future::pending::<()>()).await
}

pub async fn run_with_shutdown<F>(
    host: &str,
    port: u16,
    config: Config,
    token: &str,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let max_body_bytes = config.max_body_bytes();
    let relay = Relay::from_config(config)?;
    let state = AppState::new(relay, token).with_max_body_bytes(max_body_bytes);
    let sessions = state.sessions.clone();
    let app = build_router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RelayError::Runtime(e.to_string()))?;
    tracing::info!(%addr, "relay listening");

    let shutdown = async move {
        shutdown.await;
        let entries: Vec<SessionEntry> = sessions.write().drain().map(|(_, entry)| entry).collect();
        for entry in entries {
            drop(entry.session.close());
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| RelayError::Runtime(e.to_string()))?;

    Ok(())
}
