//! Shared API types
//!
//! Error responses for handlers that call the data layer. Compiler errors are
//! client errors; database failures are logged and hidden behind a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use thiserror::Error;

use crate::data::{DataError, QueryError};

/// Standard API error response
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest { code: String, message: String },
    #[error("{message}")]
    NotFound { code: String, message: String },
    #[error("{message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body shared by HTTP responses and CLI error output
    pub fn body(&self) -> Value {
        let (error_type, code, message) = match self {
            Self::BadRequest { code, message } => ("bad_request", code.as_str(), message),
            Self::NotFound { code, message } => ("not_found", code.as_str(), message),
            Self::Internal { message } => ("internal_error", "INTERNAL", message),
        };
        json!({
            "error": error_type,
            "code": code,
            "message": message
        })
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        let code = match e {
            QueryError::EmptyPayload => "NO_DATA",
            QueryError::InvalidFilterKey { .. } => "INVALID_FILTER",
            QueryError::RangeInconsistency(_) => "INVALID_RANGE",
            QueryError::InvalidUpdateField { .. } => "INVALID_FIELD",
        };
        Self::bad_request(code, e.to_string())
    }
}

impl From<DataError> for ApiError {
    fn from(e: DataError) -> Self {
        match e {
            DataError::Query(q) => q.into(),
            DataError::NotFound { .. } => Self::not_found("NOT_FOUND", e.to_string()),
            DataError::Duplicate { .. } => Self::bad_request("DUPLICATE", e.to_string()),
            other => {
                tracing::error!(error = %other, "Data error");
                Self::internal("Database operation failed")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::RangeError;

    fn status_of(e: impl Into<ApiError>) -> StatusCode {
        e.into().into_response().status()
    }

    #[test]
    fn compiler_errors_are_bad_requests() {
        assert_eq!(status_of(QueryError::EmptyPayload), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(QueryError::invalid_filter_key("potatoes")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(QueryError::from(RangeError::EqualBounds)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn query_error_codes() {
        match ApiError::from(QueryError::invalid_filter_key("potatoes")) {
            ApiError::BadRequest { code, message } => {
                assert_eq!(code, "INVALID_FILTER");
                assert_eq!(message, "Invalid Filter potatoes");
            }
            other => panic!("unexpected {:?}", other),
        }
        match ApiError::from(QueryError::from(RangeError::InvertedBounds)) {
            ApiError::BadRequest { code, message } => {
                assert_eq!(code, "INVALID_RANGE");
                assert_eq!(message, "Max must be greater than min.");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn invalid_update_field_body() {
        let err = ApiError::from(QueryError::invalid_update_field("password"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.body(),
            json!({
                "error": "bad_request",
                "code": "INVALID_FIELD",
                "message": "Invalid field password"
            })
        );
    }

    #[test]
    fn internal_body_hides_details() {
        let err = ApiError::from(DataError::Config("bad url".to_string()));
        assert_eq!(err.to_string(), "Database operation failed");
        assert_eq!(err.body()["code"], "INTERNAL");
    }

    #[test]
    fn data_errors_map_to_status() {
        assert_eq!(
            status_of(DataError::not_found("company", "nope")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DataError::duplicate("company", "c1")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DataError::Query(QueryError::EmptyPayload)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DataError::Postgres(sqlx::Error::PoolTimedOut)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
