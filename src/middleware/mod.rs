pub mod auth;
pub mod response;

pub use auth::{is_public_path, recover_token, request_gate};
pub use response::{ApiResponse, ApiResult};
