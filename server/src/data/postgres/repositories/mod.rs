//! PostgreSQL repositories
//!
//! Statement text is assembled by the pure `*_sql` functions so it can be
//! checked without a database; the async functions bind and execute it.

pub mod company;
pub mod job;
pub mod user;

use crate::data::filters::WhereClause;
use crate::data::update::SetClause;

/// `SELECT ... FROM table [WHERE ...] ORDER BY ...`
pub(crate) fn select_sql(
    table: &str,
    columns: &str,
    clause: &WhereClause,
    order_by: &str,
) -> String {
    if clause.is_empty() {
        format!("SELECT {} FROM {} ORDER BY {}", columns, table, order_by)
    } else {
        format!(
            "SELECT {} FROM {} WHERE {} ORDER BY {}",
            columns, table, clause.sql, order_by
        )
    }
}

/// `UPDATE table SET ... WHERE key = $n RETURNING ...`, key bound after the SET values
pub(crate) fn update_sql(table: &str, set: &SetClause, key_column: &str, returning: &str) -> String {
    format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        table,
        set.set_cols,
        key_column,
        set.next_placeholder(),
        returning
    )
}
