//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use notez_api::{AppState, build_app};
use notez_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, PasswordHashConfig, ServerConfig,
    SessionConfig,
};
use notez_database::{MemoryStore, Repositories};

/// Password used for every account the helpers create.
pub const PASSWORD: &str = "password123";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct inspection
    pub store: MemoryStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Like [`TestApp::new`], with the config adjusted before the state is built
    pub fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://unused@localhost/notez".to_string(),
                max_connections: 1,
                min_connections: 0,
                connect_timeout_seconds: 1,
                idle_timeout_seconds: 1,
            },
            auth: AuthConfig {
                hash: PasswordHashConfig {
                    memory_kib: 64,
                    iterations: 1,
                    parallelism: 1,
                    output_len: 32,
                },
                ..AuthConfig::default()
            },
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        };
        adjust(&mut config);

        let store = MemoryStore::new();
        let state = AppState::new(
            config.clone(),
            Repositories::from_memory(store.clone()),
            None,
        )
        .expect("Failed to build state");

        Self {
            router: build_app(state),
            store,
            config,
        }
    }

    /// Register an account and return its user payload
    pub async fn register(&self, email: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/auth/register",
                Some(json!({
                    "email": email,
                    "password": PASSWORD,
                    "confirm_password": PASSWORD,
                })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );
        response.body["data"].clone()
    }

    /// Log in and return the session token from the cookie
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/auth/login",
                Some(json!({ "email": email, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.session_token().expect("No session cookie in login response")
    }

    /// Register and log in, returning `(user_id, session_token)`
    pub async fn signup(&self, email: &str) -> (String, String) {
        let user = self.register(email).await;
        let token = self.login(email).await;
        (user["id"].as_str().unwrap_or_default().to_string(), token)
    }

    /// Create a note and return its id
    pub async fn create_note(&self, token: &str, title: &str) -> String {
        let response = self
            .request(
                "POST",
                "/notes",
                Some(json!({ "title": title, "content": "first draft" })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"]["id"].as_str().unwrap_or_default().to_string()
    }

    /// Invite `email` to a note and return the invitation id
    pub async fn invite(&self, token: &str, note_id: &str, email: &str, role: &str) -> String {
        let response = self
            .request(
                "POST",
                "/note-invitations",
                Some(json!({ "email": email, "note_id": note_id, "role": role })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"]["id"].as_str().unwrap_or_default().to_string()
    }

    /// Invite and accept in one step
    pub async fn share(&self, owner: &str, note_id: &str, email: &str, member: &str, role: &str) {
        let id = self.invite(owner, note_id, email, role).await;
        let response = self
            .request(
                "PATCH",
                &format!("/note-invitations/{id}"),
                Some(json!({ "accept": true })),
                Some(member),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        session: Option<&str>,
    ) -> TestResponse {
        let body = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.request_raw(method, path, body, session).await
    }

    /// Make an HTTP request with a raw body
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body: String,
        session: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = session {
            req = req.header(
                header::COOKIE,
                format!("{}={}", self.config.session.cookie_name, token),
            );
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookie,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// Raw `Set-Cookie` header, if any
    pub set_cookie: Option<String>,
}

impl TestResponse {
    /// Value of the `session` cookie set by this response
    pub fn session_token(&self) -> Option<String> {
        let cookie = self.set_cookie.as_deref()?;
        let pair = cookie.split(';').next()?;
        pair.strip_prefix("session=").map(String::from)
    }

    /// The `message` of a success or error body
    pub fn message(&self) -> &str {
        self.body["data"]["message"]
            .as_str()
            .or_else(|| self.body["message"].as_str())
            .unwrap_or_default()
    }
}
