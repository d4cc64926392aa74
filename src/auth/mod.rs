pub mod authenticator;
pub mod password;
pub mod principal;
pub mod token;

pub use authenticator::{AuthError, Authenticator};
pub use password::{hash_secret, verify_secret, PasswordError};
pub use principal::AuthenticatedPrincipal;
pub use token::{Claims, TokenCodec, TokenError};
