//! PostgreSQL SQL dialect implementation

use super::SqlDialect;

/// PostgreSQL SQL dialect
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let dialect = PostgresDialect;
        assert_eq!(dialect.placeholder(1), "$1");
        assert_eq!(dialect.placeholder(5), "$5");
    }

    #[test]
    fn test_quote_ident() {
        let dialect = PostgresDialect;
        assert_eq!(dialect.quote_ident("num_employees"), "\"num_employees\"");
    }

    #[test]
    fn test_quote_ident_doubles_embedded_quotes() {
        let dialect = PostgresDialect;
        assert_eq!(
            dialect.quote_ident("name\"=$1, \"handle"),
            "\"name\"\"=$1, \"\"handle\""
        );
    }
}
