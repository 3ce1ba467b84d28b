#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use notes_api::{
    AppState,
    app::router::{HttpOptions, build_router},
    auth::TokenKeys,
    config::Environment,
    notes::{MemoryNoteRepo, NoteRepo},
    users::{MemoryUserRepo, UserRepo},
};
use serde_json::{Value, json};
use time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration-test-jwt-secret";

pub struct TestApp {
    app: Router,
    pub users: Arc<MemoryUserRepo>,
    pub tokens: TokenKeys,
}

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub access_token: String,
}

pub fn test_keys() -> TokenKeys {
    TokenKeys::from_secret(TEST_JWT_SECRET, Duration::minutes(30))
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_notes(Arc::new(MemoryNoteRepo::new()), Environment::Development)
    }

    pub fn with_notes(notes: Arc<dyn NoteRepo>, environment: Environment) -> Self {
        Self::build(notes, environment, &HttpOptions::default())
    }

    pub fn with_options(options: &HttpOptions) -> Self {
        Self::build(
            Arc::new(MemoryNoteRepo::new()),
            Environment::Development,
            options,
        )
    }

    fn build(notes: Arc<dyn NoteRepo>, environment: Environment, options: &HttpOptions) -> Self {
        let users = Arc::new(MemoryUserRepo::new());
        let tokens = test_keys();
        let state = AppState::new(notes, users.clone(), tokens.clone(), environment);

        Self {
            app: build_router(state, options),
            users,
            tokens,
        }
    }

    /// Creates a user directly in the store and signs a token for it,
    /// skipping the password hashing of the register/login endpoints.
    pub async fn seed_user(&self) -> TestUser {
        let email = format!("user-{}@example.test", Uuid::new_v4());
        let user = self
            .users
            .create(&email, "integration-test-password-hash")
            .await
            .expect("failed to create test user");
        let access_token = self
            .tokens
            .issue(user.id)
            .expect("failed to issue test token")
            .token;

        TestUser {
            id: user.id,
            email,
            access_token,
        }
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: Value,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        self.request_json(Method::POST, path, Some(body), bearer)
            .await
    }

    pub async fn put_json(
        &self,
        path: &str,
        body: Value,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        self.request_json(Method::PUT, path, Some(body), bearer)
            .await
    }

    pub async fn get_json(&self, path: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        self.request_json(Method::GET, path, None, bearer).await
    }

    pub async fn delete_json(&self, path: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        self.request_json(Method::DELETE, path, None, bearer).await
    }

    pub async fn get_text(&self, path: &str, bearer: Option<&str>) -> (StatusCode, String) {
        let req = Self::builder(Method::GET, path, bearer)
            .body(Body::empty())
            .expect("failed to build request");
        let (status, _, bytes) = self.send(req).await;
        let text = String::from_utf8(bytes).expect("response is not valid utf-8 text");
        (status, text)
    }

    /// Sends a body verbatim, for payloads that are not valid JSON.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        content_type: Option<&str>,
        body: &'static str,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Self::builder(method, path, bearer);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let req = builder.body(Body::from(body)).expect("failed to build request");
        let (status, _, bytes) = self.send(req).await;
        (status, Self::parse(&bytes))
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = self
            .app
            .clone()
            .oneshot(req)
            .await
            .expect("request execution failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("failed to read response body");

        (status, headers, bytes.to_vec())
    }

    fn builder(method: Method, path: &str, bearer: Option<&str>) -> axum::http::request::Builder {
        let mut req_builder = Request::builder().method(method).uri(path);
        if let Some(token) = bearer {
            req_builder = req_builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        req_builder
    }

    fn parse(bytes: &[u8]) -> Value {
        if bytes.is_empty() {
            return Value::Null;
        }
        serde_json::from_slice(bytes).expect("response is not valid json")
    }

    async fn request_json(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut req_builder = Self::builder(method, path, bearer);

        let body = match body {
            Some(body) => {
                req_builder = req_builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&body).expect("failed to serialize request body"))
            }
            None => Body::empty(),
        };

        let req = req_builder.body(body).expect("failed to build request");
        let (status, _, bytes) = self.send(req).await;
        (status, Self::parse(&bytes))
    }

    pub async fn create_note(&self, user: &TestUser, title: &str, content: &str) -> Value {
        let (status, note) = self
            .post_json(
                "/api/notes",
                json!({ "title": title, "content": content }),
                Some(&user.access_token),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        note
    }

    pub async fn register_and_login(&self, email: &str, password: &str) -> TestUser {
        let (register_status, register_json) = self
            .post_json(
                "/api/auth/register",
                json!({
                    "email": email,
                    "password": password
                }),
                None,
            )
            .await;
        assert_eq!(register_status, StatusCode::CREATED);

        let user_id = register_json
            .get("id")
            .and_then(Value::as_str)
            .expect("register response misses user id");
        let user_id = Uuid::parse_str(user_id).expect("invalid user id from register response");

        let (login_status, login_json) = self
            .post_json(
                "/api/auth/login",
                json!({
                    "email": email,
                    "password": password
                }),
                None,
            )
            .await;
        assert_eq!(login_status, StatusCode::OK);

        let access_token = login_json
            .get("token")
            .and_then(Value::as_str)
            .expect("login response misses token")
            .to_string();

        TestUser {
            id: user_id,
            email: email.to_string(),
            access_token,
        }
    }
}

pub fn message(body: &Value) -> Option<&str> {
    body.get("message").and_then(Value::as_str)
}
