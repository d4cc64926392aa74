use std::fmt;

use sqlx::FromRow;

/// A forum account as stored in `usuarios`
#[derive(Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub login: String,
    /// Argon2 PHC string
    pub senha: String,
    pub roles: Vec<String>,
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

// Keep the password hash out of logs
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("login", &self.login)
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub senha: String,
    pub roles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_omits_hash() {
        let user = User {
            id: 1,
            login: "admin".to_string(),
            senha: "$argon2id$v=19$secret".to_string(),
            roles: vec!["ROLE_USER".to_string()],
        };
        let out = format!("{:?}", user);
        assert!(out.contains("admin"));
        assert!(!out.contains("argon2id"));
        assert!(user.has_role("ROLE_USER"));
        assert!(!user.has_role("ROLE_ADMIN"));
    }
}
