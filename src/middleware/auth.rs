use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::AuthenticatedPrincipal;
use crate::error::ApiError;

/// Paths served without any token inspection
pub fn is_public_path(path: &str) -> bool {
    path == "/login" || path.starts_with("/v3/api-docs") || path.starts_with("/swagger-ui")
}

/// Token from the Authorization header, with a leading "Bearer " removed if present
pub fn recover_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

async fn resolve_principal(state: &AppState, token: &str) -> Option<AuthenticatedPrincipal> {
    let subject = state.tokens.validate(token)?;

    match state.users.find_by_login(&subject).await {
        Ok(Some(user)) => Some(AuthenticatedPrincipal::new(user)),
        Ok(None) => {
            tracing::debug!("Token subject '{}' has no matching user", subject);
            None
        }
        Err(e) => {
            tracing::warn!("Credential store lookup failed for '{}': {}", subject, e);
            None
        }
    }
}

/// Request gate: attaches an `AuthenticatedPrincipal` when the bearer token
/// checks out. Never rejects; protected handlers decide via the extractor below.
pub async fn request_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if is_public_path(request.uri().path()) {
        tracing::debug!("Public path {}, skipping token check", request.uri().path());
        return next.run(request).await;
    }

    if let Some(token) = recover_token(request.headers()) {
        if let Some(principal) = resolve_principal(&state, &token).await {
            tracing::debug!("Authenticated request as '{}'", principal.login());
            request.extensions_mut().insert(principal);
        }
    }

    next.run(request).await
}

/// Authorization check for protected handlers: 401 when the gate attached no principal
#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedPrincipal>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}
