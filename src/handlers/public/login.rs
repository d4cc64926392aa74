// handlers/public/login.rs - POST /login handler

use std::collections::HashMap;

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::api::ApiJson;
use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: Option<String>,
    pub senha: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    #[serde(rename = "tokenJWT")]
    pub token_jwt: String,
}

impl LoginRequest {
    fn into_credentials(self) -> Result<(String, String), ApiError> {
        let mut field_errors = HashMap::new();
        if self.login.as_deref().map_or(true, |v| v.trim().is_empty()) {
            field_errors.insert("login".to_string(), "Login é obrigatório".to_string());
        }
        if self.senha.as_deref().map_or(true, |v| v.trim().is_empty()) {
            field_errors.insert("senha".to_string(), "Senha é obrigatória".to_string());
        }

        match (self.login, self.senha) {
            (Some(login), Some(senha)) if field_errors.is_empty() => Ok((login, senha)),
            _ => Err(ApiError::validation_error("Invalid login request", Some(field_errors))),
        }
    }
}

/// POST /login - Authenticate credentials and receive a bearer token
///
/// Input: `{"login": "admin", "senha": "123456"}`
/// Output: `{"tokenJWT": "eyJhbGciOiJIUzI1NiI..."}`
///
/// 400 when a field is missing or blank, 401 when the pair does not match.
pub async fn login_post(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<TokenResponse> {
    let (login, senha) = payload.into_credentials()?;

    let principal = state.authenticator.authenticate(&login, &senha).await?;

    let token_jwt = state.tokens.issue(principal.login()).map_err(|e| {
        tracing::error!("Token issuance failed: {}", e);
        ApiError::internal_server_error("Failed to issue token")
    })?;

    tracing::info!("User '{}' logged in", principal.login());
    Ok(ApiResponse::success(TokenResponse { token_jwt }))
}
