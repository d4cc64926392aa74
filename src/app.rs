use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::{Authenticator, TokenCodec};
use crate::database::{TopicRepository, UserRepository};
use crate::filter::PageDefaults;
use crate::handlers::{protected, public};
use crate::middleware::request_gate;
use crate::services::TopicService;

/// Shared, read-only collaborators handed to the gate and every handler
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenCodec>,
    pub users: Arc<dyn UserRepository>,
    pub authenticator: Authenticator,
    pub topics: TopicService,
    pub page_defaults: PageDefaults,
}

impl AppState {
    pub fn new(
        tokens: TokenCodec,
        users: Arc<dyn UserRepository>,
        topics: Arc<dyn TopicRepository>,
        page_defaults: PageDefaults,
    ) -> Self {
        Self {
            tokens: Arc::new(tokens),
            authenticator: Authenticator::new(users.clone()),
            users,
            topics: TopicService::new(topics),
            page_defaults,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/login", post(public::login::login_post))
        .route("/v3/api-docs", get(public::docs::api_docs))
        .route("/health", get(public::health::health))
        // Protected (handlers require an AuthenticatedPrincipal)
        .merge(topic_routes())
        .layer(middleware::from_fn_with_state(state.clone(), request_gate))
        .with_state(state)
}

fn topic_routes() -> Router<AppState> {
    use protected::topic;

    Router::new()
        .route("/topicos", get(topic::list).post(topic::create))
        .route(
            "/topicos/:id",
            get(topic::detail).put(topic::update).delete(topic::delete),
        )
}
