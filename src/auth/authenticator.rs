use std::sync::Arc;

use crate::auth::password::{verify_against_dummy, verify_secret};
use crate::auth::principal::AuthenticatedPrincipal;
use crate::database::{DatabaseError, UserRepository};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Same error for an unknown login and a wrong secret
    #[error("Invalid login or password")]
    AuthenticationFailed,

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// Checks login/secret pairs against the credential store
#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn authenticate(&self, login: &str, secret: &str) -> Result<AuthenticatedPrincipal, AuthError> {
        let Some(user) = self.users.find_by_login(login).await? else {
            verify_against_dummy(secret);
            tracing::warn!("Authentication failed for login '{}'", login);
            return Err(AuthError::AuthenticationFailed);
        };

        if !verify_secret(secret, &user.senha) {
            tracing::warn!("Authentication failed for login '{}'", login);
            return Err(AuthError::AuthenticationFailed);
        }

        Ok(AuthenticatedPrincipal::new(user))
    }
}
