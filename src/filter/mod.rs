pub mod types;
pub mod filter_order;
pub mod page;
pub mod error;

pub use types::*;
pub use filter_order::FilterOrder;
pub use page::Page;
pub use error::FilterError;
