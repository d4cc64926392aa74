use crate::database::models::User;

/// Identity attached to one request by the request gate
#[derive(Clone, Debug)]
pub struct AuthenticatedPrincipal {
    pub user: User,
    pub roles: Vec<String>,
}

impl AuthenticatedPrincipal {
    pub fn new(user: User) -> Self {
        let roles = user.roles.clone();
        Self { user, roles }
    }

    pub fn login(&self) -> &str {
        &self.user.login
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
