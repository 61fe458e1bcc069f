//! SQL building blocks shared by the clause compilers
//!
//! Dialects decide how placeholders are spelled; `SqlValue`/`SqlParams` carry
//! the bound values in placeholder order.

mod dialect;
mod params;
mod postgres_dialect;
mod sqlite_dialect;

pub use dialect::SqlDialect;
pub use params::{SqlParams, SqlValue, bind_query_as};
pub use postgres_dialect::PostgresDialect;
pub use sqlite_dialect::SqliteDialect;

/// Database backend identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    #[default]
    Postgres,
    Sqlite,
}

impl Backend {
    /// Get the SQL dialect for this backend
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Backend::Postgres => &PostgresDialect,
            Backend::Sqlite => &SqliteDialect,
        }
    }

    /// Get the backend name
    pub fn name(&self) -> &'static str {
        self.dialect().name()
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_dialect() {
        assert_eq!(Backend::Postgres.dialect().placeholder(2), "$2");
        assert_eq!(Backend::Sqlite.dialect().placeholder(2), "?");
        assert_eq!(Backend::default(), Backend::Postgres);
        assert_eq!(Backend::Sqlite.to_string(), "sqlite");
    }
}
