use axum::extract::State;
use serde::Deserialize;

use crate::api::{empty_as_none, ApiQuery};
use crate::app::AppState;
use crate::auth::AuthenticatedPrincipal;
use crate::database::Topic;
use crate::filter::{Page, Pageable};
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub curso: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub ano: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub size: Option<u32>,
    /// `field[,asc|desc]`, defaults to `dataCriacao,asc`
    pub sort: Option<String>,
}

/// GET /topicos - paged listing, optionally filtered by curso and/or ano
pub async fn list(
    State(state): State<AppState>,
    _principal: AuthenticatedPrincipal,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<Page<Topic>> {
    let pageable = Pageable::from_params(
        query.page,
        query.size,
        query.sort.as_deref(),
        &state.page_defaults,
    )?;

    let page = state.topics.list(query.curso, query.ano, &pageable).await?;
    Ok(ApiResponse::success(page))
}
