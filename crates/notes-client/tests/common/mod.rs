//! In-process stand-in for the Hidden Notes backend contract.
#![allow(dead_code, non_snake_case)]

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, EnvFilter};

pub const VALID_TOKEN: &str = "tok-ada-123";
pub const PASSWORD: &str = "correct-horse";
pub const LINK_ID: &str = "ada-link";

#[derive(Clone, Default)]
pub struct StubState {
    pub hits: Arc<AtomicUsize>,
    pub last_body: Arc<Mutex<Option<Value>>>,
    pub last_content_type: Arc<Mutex<Option<String>>>,
}

pub struct StubBackend {
    pub base_url: String,
    pub state: StubState,
}

impl StubBackend {
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<Value> {
        self.state.last_body.lock().clone()
    }

    pub fn last_content_type(&self) -> Option<String> {
        self.state.last_content_type.lock().clone()
    }
}

pub fn init_tracing() {
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

pub async fn spawn() -> StubBackend {
    init_tracing();
    let state = StubState::default();

    let protected = Router::new()
        .route("/api/user", get(current_user))
        .route("/api/get-link", get(get_link))
        .route("/api/messages", get(list_messages))
        .route("/api/user/password", put(change_password))
        .route_layer(middleware::from_fn(require_bearer));

    let public = Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/messages/:link_id", post(submit_message))
        .route("/api/user/:link_id", get(recipient_name))
        .route("/test/echo-auth", get(echo_auth))
        .route("/test/ok", get(|| async { Json(json!({"a": 1})) }))
        .route("/test/teapot", get(|| async { (StatusCode::IM_A_TEAPOT, "X") }))
        .route(
            "/test/unauthorized",
            get(|| async { (StatusCode::UNAUTHORIZED, "token expired") }),
        )
        .route("/test/empty", get(|| async { StatusCode::NO_CONTENT }))
        .route("/test/slow", get(slow));

    let app = Router::new()
        .merge(protected)
        .merge(public)
        .layer(middleware::from_fn_with_state(state.clone(), record_request))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("stub backend exited");
    });

    StubBackend {
        base_url: format!("http://{addr}"),
        state,
    }
}

async fn record_request(
    State(state): State<StubState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let contentType = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.last_content_type.lock() = contentType;

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    *state.last_body.lock() = serde_json::from_slice(&bytes).ok();

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

async fn require_bearer(request: Request<Body>, next: Next) -> Response {
    let authHeader = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let isAuthorized = match authHeader {
        Some(h) if h.starts_with("Bearer ") => &h[7..] == VALID_TOKEN,
        _ => false,
    };

    if !isAuthorized {
        return (StatusCode::UNAUTHORIZED, "unauthorized").into_response();
    }

    next.run(request).await
}

async fn echo_auth(request: Request<Body>) -> Json<Value> {
    let authHeader = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({ "authorization": authHeader }))
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == "taken@example.com" {
        return (StatusCode::CONFLICT, "Email already registered").into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({"message": "Registered. Please verify your email."})),
    )
        .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == "ada@example.com" && body["password"] == PASSWORD {
        return Json(json!({ "token": VALID_TOKEN })).into_response();
    }
    (StatusCode::BAD_REQUEST, "Invalid credentials").into_response()
}

async fn current_user() -> Json<Value> {
    Json(json!({"name": "Ada", "email": "ada@example.com", "is_verified": true}))
}

async fn get_link() -> Json<Value> {
    Json(json!({ "link_id": LINK_ID }))
}

async fn list_messages() -> Json<Value> {
    Json(json!([
        {
            "message_id": "m-1",
            "content": "Keep going",
            "category": "Inner Feelings",
            "created_at": "2024-05-01T10:00:00Z",
            "is_read": false
        },
        {
            "message_id": "m-2",
            "content": "Nice talk",
            "category": "Compliment",
            "created_at": "2024-05-02T09:30:00Z",
            "is_read": true
        }
    ]))
}

async fn submit_message(Path(linkId): Path<String>, Json(body): Json<Value>) -> Response {
    if linkId != LINK_ID {
        return (StatusCode::NOT_FOUND, "Link not found").into_response();
    }
    if body["content"].as_str().unwrap_or("").is_empty() {
        return (StatusCode::BAD_REQUEST, "Content is required").into_response();
    }
    (StatusCode::CREATED, Json(json!({"message": "sent"}))).into_response()
}

async fn recipient_name(Path(linkId): Path<String>) -> Response {
    if linkId == LINK_ID {
        return Json(json!({"name": "Ada"})).into_response();
    }
    (StatusCode::NOT_FOUND, format!("No user for link {linkId}")).into_response()
}

async fn change_password(Json(body): Json<Value>) -> Response {
    if body["currentPassword"] != PASSWORD {
        return (StatusCode::BAD_REQUEST, "Current password is incorrect").into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(json!({"late": true}))
}
