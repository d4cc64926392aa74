#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::{json, Value};
use tower::ServiceExt;

use forumhub::app::{router, AppState};
use forumhub::auth::{hash_secret, TokenCodec};
use forumhub::database::{
    MemoryTopicRepository, MemoryUserRepository, NewUser, TopicRepository, UserRepository,
};
use forumhub::filter::PageDefaults;

pub const SECRET: &str = "integration-test-secret";
pub const ISSUER: &str = "API ForumHub";

/// The real router over the given stores, signing with `SECRET`
pub fn router_over(users: Arc<dyn UserRepository>, topics: Arc<dyn TopicRepository>) -> Result<Router> {
    let tokens = TokenCodec::new(SECRET, ISSUER, Duration::hours(2))?;
    Ok(router(AppState::new(tokens, users, topics, PageDefaults::default())))
}

/// Token for `login` as the router built by `router_over` would issue it
pub fn token_for(login: &str) -> Result<String> {
    Ok(TokenCodec::new(SECRET, ISSUER, Duration::hours(2))?.issue(login)?)
}

pub async fn send(router: &Router, request: Request<Body>) -> Result<TestResponse> {
    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).context("response body is not JSON")?
    };

    Ok(TestResponse { status, headers, body })
}

/// Full router over in-memory stores, seeded with admin/123456
pub struct TestApp {
    pub router: Router,
    pub topics: Arc<MemoryTopicRepository>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        let users = Arc::new(MemoryUserRepository::new());
        users
            .insert(NewUser {
                login: "admin".to_string(),
                senha: hash_secret("123456")?,
                roles: vec!["ROLE_USER".to_string()],
            })
            .await?;

        let topics = Arc::new(MemoryTopicRepository::new());

        Ok(Self {
            router: router_over(users, topics.clone())?,
            topics,
        })
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        send(&self.router, request).await
    }

    /// Logs in as the seeded admin and returns the bearer token
    pub async fn login(&self) -> Result<String> {
        let res = self
            .request(
                Method::POST,
                "/login",
                None,
                Some(json!({ "login": "admin", "senha": "123456" })),
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::OK, "login failed: {}", res.status);
        res.body["tokenJWT"]
            .as_str()
            .map(str::to_string)
            .context("login response has no tokenJWT")
    }

    pub async fn create_topic(&self, token: &str, titulo: &str, mensagem: &str, curso: &str) -> Result<TestResponse> {
        self.request(
            Method::POST,
            "/topicos",
            Some(token),
            Some(json!({ "titulo": titulo, "mensagem": mensagem, "curso": curso })),
        )
        .await
    }
}
