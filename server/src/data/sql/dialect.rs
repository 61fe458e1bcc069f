//! SQL dialect trait for placeholder generation
//!
//! The clause compilers only differ between backends in how bound parameters
//! are spelled, so that is all this trait covers.

/// SQL dialect trait for generating database-specific SQL
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - PostgreSQL: Returns "$1", "$2", etc.
    /// - SQLite: Always returns "?"
    fn placeholder(&self, index: usize) -> String;

    /// Quote a column name for use on the left side of a SET assignment
    ///
    /// Embedded quotes are doubled so the name stays a single identifier.
    fn quote_ident(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }
}
