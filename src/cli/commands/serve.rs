use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::app::{router, AppState};
use crate::auth::{hash_secret, TokenCodec};
use crate::config::{AppConfig, SecurityConfig};
use crate::database::{
    DatabaseManager, MemoryTopicRepository, MemoryUserRepository, NewUser, PgTopicRepository,
    PgUserRepository, TopicRepository, UserRepository,
};
use crate::filter::PageDefaults;

pub async fn handle(config: &AppConfig, memory: bool) -> anyhow::Result<()> {
    // A missing signing secret is fatal here, before any request is served
    let tokens = TokenCodec::from_config(&config.security).context("invalid JWT configuration")?;

    let (users, topics): (Arc<dyn UserRepository>, Arc<dyn TopicRepository>) = if memory {
        let users = MemoryUserRepository::new();
        seed_admin(&users).await?;
        (Arc::new(users), Arc::new(MemoryTopicRepository::new()))
    } else {
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        DatabaseManager::migrate(&pool).await.context("failed to apply migrations")?;
        (
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgTopicRepository::new(pool)),
        )
    };

    let page_defaults = PageDefaults {
        default_size: config.api.default_page_size,
        max_size: config.api.max_page_size,
    };
    let state = AppState::new(tokens, users, topics, page_defaults);

    let app = router(state)
        .layer(cors_layer(&config.security))
        .layer(TraceLayer::new_for_http());

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("ForumHub API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn seed_admin(users: &MemoryUserRepository) -> anyhow::Result<()> {
    users
        .insert(NewUser {
            login: "admin".to_string(),
            senha: hash_secret("123456")?,
            roles: vec!["ROLE_USER".to_string(), "ROLE_ADMIN".to_string()],
        })
        .await?;
    tracing::warn!("In-memory mode: seeded user 'admin' with the default password");
    Ok(())
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([header::LOCATION])
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
