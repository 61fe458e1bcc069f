//! Data layer
//!
//! - `filters` - WHERE clause compiler for company and job searches
//! - `update` - SET clause compiler for partial updates
//! - `sql` - dialects and bound parameter values
//! - `postgres` - connection pool, schema and repositories
//! - `types` - row and input types
//! - `error` - compiler and repository errors

pub mod error;
pub mod filters;
pub mod postgres;
pub mod sql;
pub mod types;
pub mod update;

pub use error::{DataError, QueryError};
pub use postgres::PostgresService;
