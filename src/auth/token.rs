use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT signing secret is not configured")]
    MissingSecret,

    #[error("JWT lifetime is out of range")]
    InvalidLifetime,

    #[error("JWT generation error: {0}")]
    Generation(String),
}

/// Issues and verifies HS256 tokens whose subject is the user's login.
///
/// Holds only the signing keys, the issuer and the token lifetime, so one
/// instance is shared by every request.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: Duration,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &str, issuer: impl Into<String>, ttl: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        if Utc::now().checked_add_signed(ttl).is_none() {
            return Err(TokenError::InvalidLifetime);
        }

        let issuer = issuer.into();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            ttl,
            validation,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, TokenError> {
        let ttl = i64::try_from(security.jwt_expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or(TokenError::InvalidLifetime)?;

        Self::new(&security.jwt_secret, security.jwt_issuer.clone(), ttl)
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires = now.checked_add_signed(self.ttl).ok_or(TokenError::InvalidLifetime)?;
        let claims = Claims {
            sub: subject.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Subject of a valid token. Every verification failure yields `None`.
    pub fn validate(&self, token: &str) -> Option<String> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims.sub),
            Err(e) => {
                tracing::debug!("Rejected token: {}", e);
                None
            }
        }
    }
}
