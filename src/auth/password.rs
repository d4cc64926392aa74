use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;

#[derive(Debug, thiserror::Error)]
#[error("Failed to hash secret: {0}")]
pub struct PasswordError(String);

/// Hashes a secret with Argon2id, returning a PHC string
pub fn hash_secret(secret: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError(e.to_string()))
}

/// False for a wrong secret and for an unparsable hash alike
pub fn verify_secret(secret: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is not a valid PHC string: {}", e);
            false
        }
    }
}

static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| hash_secret("forumhub-dummy-secret").ok());

/// Burns the same work as a real verification when the login is unknown
pub(crate) fn verify_against_dummy(secret: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_secret(secret, hash);
    }
}
