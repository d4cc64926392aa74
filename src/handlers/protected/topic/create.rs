use axum::extract::State;

use crate::api::ApiJson;
use crate::app::AppState;
use crate::auth::AuthenticatedPrincipal;
use crate::database::Topic;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::CreateTopic;

/// POST /topicos - 201 with Location, or 400 when the titulo/mensagem pair exists
pub async fn create(
    State(state): State<AppState>,
    principal: AuthenticatedPrincipal,
    ApiJson(payload): ApiJson<CreateTopic>,
) -> ApiResult<Topic> {
    let topic = state.topics.create(payload).await?;

    tracing::info!("Topic {} created by '{}'", topic.id, principal.login());
    let location = format!("/topicos/{}", topic.id);
    Ok(ApiResponse::created(topic, location))
}
