pub mod extract;

pub use extract::{empty_as_none, ApiJson, ApiPath, ApiQuery};
