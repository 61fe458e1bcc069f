//! Error types for the data layer
//!
//! `QueryError` covers the clause compilers (filters, partial updates). Those
//! errors are raised before any SQL reaches the database. `DataError` is the
//! unified error returned by repositories and wraps database failures.

use thiserror::Error;

/// Range validation failures for min/max filter pairs
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("Max and min can not be equal.")]
    EqualBounds,

    #[error("Max must be greater than min.")]
    InvertedBounds,
}

/// Errors raised while compiling WHERE or SET clauses
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Partial update called without any fields
    #[error("No data")]
    EmptyPayload,

    /// Filter key outside the resource allow-list
    #[error("Invalid Filter {key}")]
    InvalidFilterKey { key: String },

    #[error(transparent)]
    RangeInconsistency(#[from] RangeError),

    /// Update payload key outside the table's updatable fields
    #[error("Invalid field {key}")]
    InvalidUpdateField { key: String },
}

impl QueryError {
    pub fn invalid_filter_key(key: impl Into<String>) -> Self {
        Self::InvalidFilterKey { key: key.into() }
    }

    pub fn invalid_update_field(key: impl Into<String>) -> Self {
        Self::InvalidUpdateField { key: key.into() }
    }
}

/// Unified error type for repository operations
#[derive(Error, Debug)]
pub enum DataError {
    /// Clause compilation rejected the input
    #[error(transparent)]
    Query(#[from] QueryError),

    /// PostgreSQL database error, including type errors from malformed filter values
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Row lookup by key found nothing
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// Insert would violate a unique key
    #[error("Duplicate {entity}: {key}")]
    Duplicate { entity: &'static str, key: String },
}

impl DataError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn duplicate(entity: &'static str, key: impl ToString) -> Self {
        Self::Duplicate {
            entity,
            key: key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_messages() {
        assert_eq!(QueryError::EmptyPayload.to_string(), "No data");
        assert_eq!(
            QueryError::invalid_filter_key("potatoes").to_string(),
            "Invalid Filter potatoes"
        );
        assert_eq!(
            QueryError::from(RangeError::EqualBounds).to_string(),
            "Max and min can not be equal."
        );
        assert_eq!(
            QueryError::from(RangeError::InvertedBounds).to_string(),
            "Max must be greater than min."
        );
    }

    #[test]
    fn test_data_error_display() {
        assert_eq!(
            DataError::not_found("company", "c1").to_string(),
            "company not found: c1"
        );
        assert_eq!(
            DataError::duplicate("company", "c1").to_string(),
            "Duplicate company: c1"
        );
    }

    #[test]
    fn test_query_error_passes_through() {
        let err = DataError::from(QueryError::EmptyPayload);
        assert_eq!(err.to_string(), "No data");
        assert!(matches!(err, DataError::Query(QueryError::EmptyPayload)));
    }

    #[test]
    fn test_invalid_update_field_message() {
        assert_eq!(
            QueryError::invalid_update_field("password").to_string(),
            "Invalid field password"
        );
    }
}
