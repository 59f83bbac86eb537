//! HTTP error mapping.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use parts_market::MarketError;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(&'static str),

    /// The cause is logged, never sent to the client.
    #[error("Error searching products")]
    SearchFailed(#[source] MarketError),

    /// A catalog read failed. Only `message` reaches the client.
    #[error("{message}")]
    LookupFailed {
        message: &'static str,
        #[source]
        source: MarketError,
    },
}

impl From<MarketError> for ApiError {
    fn from(e: MarketError) -> Self {
        if e.is_client_error() {
            ApiError::BadRequest(e.to_string())
        } else {
            ApiError::SearchFailed(e)
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::SearchFailed(_) | ApiError::LookupFailed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        HttpResponse::build(self.status_code()).json(ErrorBody { message: &message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_errors_are_bad_requests() {
        let err = ApiError::from(MarketError::InvalidParameter {
            name: "page".into(),
            reason: "`x` is not an integer".into(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("page"));
    }

    #[test]
    fn test_store_errors_are_generic() {
        let err = ApiError::from(MarketError::Timeout(Duration::from_secs(5)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Error searching products");
    }

    #[test]
    fn test_lookup_errors_hide_the_cause() {
        let err = ApiError::LookupFailed {
            message: "Failed to fetch car brands",
            source: MarketError::DatabaseError("no such table: car_brands".into()),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to fetch car brands");
        assert_eq!(ApiError::NotFound("Category not found").status_code(), StatusCode::NOT_FOUND);
    }
}
