//! Shared harness for API integration tests.
//!
//! Builds the real router and middleware stack over the in-memory store, an
//! in-memory activity log, and tokens signed with a test secret.

#![allow(dead_code)]

use std::sync::Arc;

use atelier_api::auth::jwt::JwtConfig;
use atelier_api::auth::session::Session;
use atelier_api::config::ServerConfig;
use atelier_api::router::build_app_router;
use atelier_api::service::activity::ActivityRecorder;
use atelier_api::state::AppState;
use atelier_core::entity::EntityKind;
use atelier_core::types::Row;
use atelier_db::memory::{MemoryActivityLog, MemoryRecordStore};
use atelier_db::models::AdminUsers;
use atelier_db::store::RecordWriter;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "atelier-test-secret";

/// Identity-provider id of the seeded active admin.
pub const ADMIN_USER: &str = "admin-user";

/// Identity-provider id of the seeded, deactivated admin.
pub const INACTIVE_USER: &str = "inactive-user";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            audience: None,
        },
    }
}

/// Collaborators behind one test app, kept for inspection.
pub struct TestContext {
    pub state: AppState,
    pub store: Arc<MemoryRecordStore>,
    pub activity: Arc<MemoryActivityLog>,
}

impl TestContext {
    /// Fresh store seeded with one active and one inactive admin profile.
    pub async fn new() -> Self {
        let store = Arc::new(MemoryRecordStore::new());
        let activity = Arc::new(MemoryActivityLog::new());

        for (user_id, active) in [(ADMIN_USER, true), (INACTIVE_USER, false)] {
            store
                .insert(
                    AdminUsers::TABLE,
                    AdminUsers::COLUMNS,
                    &row(json!({
                        "user_id": user_id,
                        "email": format!("{user_id}@atelier.test"),
                        "role": "admin",
                        "is_active": active,
                    })),
                )
                .await
                .unwrap();
        }

        let state = AppState {
            records: store.clone(),
            public_records: store.clone(),
            admins: store.clone(),
            activity: ActivityRecorder::new(activity.clone()),
            config: Arc::new(test_config()),
        };

        Self {
            state,
            store,
            activity,
        }
    }

    /// The full application router over this context's state.
    pub fn app(&self) -> Router {
        build_app_router(self.state.clone(), &test_config())
    }
}

pub fn admin_session() -> Session {
    Session {
        user_id: ADMIN_USER.to_string(),
        email: None,
    }
}

pub fn row(value: Value) -> Row {
    value.as_object().cloned().expect("test rows are JSON objects")
}

/// Sign a token for `user_id` the way the identity provider would.
pub fn token_for(user_id: &str) -> String {
    let exp = chrono::Utc::now().timestamp() + 3600;
    encode(
        &Header::default(),
        &json!({ "sub": user_id, "exp": exp, "aud": "authenticated" }),
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn admin_token() -> String {
    token_for(ADMIN_USER)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(app: Router, uri: &str, token: Option<&str>, body: Value) -> Response {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, token: Option<&str>, body: Value) -> Response {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response {
    send(app, Method::DELETE, uri, token, None).await
}

/// POST a raw body, with an optional content type.
pub async fn post_raw(
    app: Router,
    uri: &str,
    token: Option<&str>,
    content_type: Option<&str>,
    body: &str,
) -> Response {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
