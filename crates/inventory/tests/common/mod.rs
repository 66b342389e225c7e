#![allow(dead_code)]

use anyhow::{Result, anyhow};
use axum::{
    Router,
    body::{Body, Bytes, to_bytes},
    http::{Request, StatusCode, header},
};
use inventory::{handler::AppRouter, state::AppState};
use serde_json::{Value, json};
use shared::{
    config::{ConnectionManager, ConnectionPool},
    schema::bootstrap_schema,
};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret";
pub const USERNAME: &str = "warehouse";
pub const PASSWORD: &str = "s3cret";

pub struct TestApp {
    pub router: Router,
    pub pool: ConnectionPool,
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        let pool = ConnectionManager::new_pool("sqlite::memory:").await?;
        bootstrap_schema(&pool).await?;

        let state = AppState::new(pool.clone(), JWT_SECRET, 4).await?;
        let router = AppRouter::build(state);

        Ok(Self { router, pool })
    }

    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Bytes)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, bytes))
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let (status, bytes) = self.send(builder.body(body)?).await?;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, json))
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<(StatusCode, Value)> {
        self.request(
            "POST",
            "/api/register",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(StatusCode, Value)> {
        self.request(
            "POST",
            "/api/login",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Registers the default user and returns a fresh token for it.
    pub async fn token(&self) -> Result<String> {
        let (status, _) = self.register(USERNAME, PASSWORD).await?;
        if status != StatusCode::CREATED {
            return Err(anyhow!("register returned {status}"));
        }

        let (status, body) = self.login(USERNAME, PASSWORD).await?;
        if status != StatusCode::OK {
            return Err(anyhow!("login returned {status}"));
        }

        body["token"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| anyhow!("login response has no token: {body}"))
    }
}
