use axum::extract::State;

use crate::api::{ApiJson, ApiPath};
use crate::app::AppState;
use crate::auth::AuthenticatedPrincipal;
use crate::database::Topic;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UpdateTopic;

/// GET /topicos/:id
pub async fn detail(
    State(state): State<AppState>,
    _principal: AuthenticatedPrincipal,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Topic> {
    let topic = state.topics.get(id).await?;
    Ok(ApiResponse::success(topic))
}

/// PUT /topicos/:id - partial update; 400 if it would duplicate another topic
pub async fn update(
    State(state): State<AppState>,
    principal: AuthenticatedPrincipal,
    ApiPath(id): ApiPath<i64>,
    ApiJson(changes): ApiJson<UpdateTopic>,
) -> ApiResult<Topic> {
    let topic = state.topics.update(id, changes).await?;

    tracing::info!("Topic {} updated by '{}'", id, principal.login());
    Ok(ApiResponse::success(topic))
}

/// DELETE /topicos/:id
pub async fn delete(
    State(state): State<AppState>,
    principal: AuthenticatedPrincipal,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<()> {
    state.topics.delete(id).await?;

    tracing::info!("Topic {} deleted by '{}'", id, principal.login());
    Ok(ApiResponse::<()>::no_content())
}
