//! Marketplace error types.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur in catalog and search operations.
#[derive(Error, Debug)]
pub enum MarketError {
    /// A request parameter could not be turned into typed search criteria.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Store round trip did not finish in time.
    #[error("Store query timed out after {0:?}")]
    Timeout(Duration),

    /// Database error.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl MarketError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        MarketError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the caller supplied bad input, as opposed to a store failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, MarketError::InvalidParameter { .. })
    }
}

#[cfg(feature = "storage")]
impl From<parts_db::DbError> for MarketError {
    fn from(e: parts_db::DbError) -> Self {
        MarketError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for MarketError {
    fn from(e: serde_json::Error) -> Self {
        MarketError::SerializationError(e.to_string())
    }
}
