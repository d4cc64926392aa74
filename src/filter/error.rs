use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("Unknown sort field: {0}")]
    InvalidSortField(String),

    #[error("Invalid sort direction: {0}")]
    InvalidSortDirection(String),

    #[error("Page size must be at least 1")]
    InvalidSize,
}

impl FilterError {
    /// Query parameter the error refers to
    pub fn param(&self) -> &'static str {
        match self {
            FilterError::InvalidSortField(_) | FilterError::InvalidSortDirection(_) => "sort",
            FilterError::InvalidSize => "size",
        }
    }
}
