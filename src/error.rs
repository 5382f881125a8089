use std::fmt;

/// Unified error type for record store operations.
#[derive(Debug)]
pub enum StoreError {
    /// A field value was malformed or out of range.
    InvalidInput(String),
    /// The product code is already used by another record.
    DuplicateCode(String),
    /// No product exists with the given id.
    NotFound(i64),
    /// The underlying database failed.
    Database(rusqlite::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            StoreError::DuplicateCode(code) => {
                write!(f, "A product with code '{}' already exists", code)
            }
            StoreError::NotFound(id) => write!(f, "No product found with id {}", id),
            StoreError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(err)
    }
}

/// Result type alias for record store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
