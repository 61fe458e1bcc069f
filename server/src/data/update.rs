//! Partial update compilation
//!
//! Turns a sparse update payload into the SET list of a parameterized UPDATE.
//! Payload keys are external (camelCase) names; a `FieldMap` translates the
//! ones whose column name differs.
//!
//! Unmapped keys are used verbatim as column names, so callers run
//! `check_update_fields` against the table's updatable keys first.

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::QueryError;
use super::sql::{PostgresDialect, SqlDialect, SqlParams, SqlValue};

/// External field name to column name pairs
pub type FieldMap<'a> = &'a [(&'a str, &'a str)];

pub const COMPANY_FIELDS: FieldMap<'static> =
    &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")];

pub const JOB_FIELDS: FieldMap<'static> = &[("companyHandle", "company_handle")];

pub const USER_FIELDS: FieldMap<'static> = &[
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("isAdmin", "is_admin"),
];

/// Keys a caller may change on each table
pub const COMPANY_UPDATABLE: &[&str] = &["name", "description", "numEmployees", "logoUrl"];

pub const JOB_UPDATABLE: &[&str] = &["title", "salary", "equity"];

/// Passwords are not updatable through partial updates
pub const USER_UPDATABLE: &[&str] = &["firstName", "lastName", "email"];

/// Reject any payload key outside `allowed`
pub fn check_update_fields(
    payload: &Map<String, Value>,
    allowed: &[&str],
) -> Result<(), QueryError> {
    match payload.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => {
            tracing::debug!(%key, "Rejected update field");
            Err(QueryError::invalid_update_field(key.as_str()))
        }
        None => Ok(()),
    }
}

/// Compiled SET list and the values for its placeholders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetClause {
    /// e.g. `"first_name"=$1, "age"=$2`
    pub set_cols: String,
    pub values: Vec<SqlValue>,
}

impl SetClause {
    /// Placeholder index for the first parameter after the SET values
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Compile a partial update for PostgreSQL
pub fn compile_update(
    payload: &Map<String, Value>,
    field_map: FieldMap<'_>,
) -> Result<SetClause, QueryError> {
    compile_update_with(payload, field_map, &PostgresDialect)
}

/// Compile a partial update using the dialect's placeholders
pub fn compile_update_with(
    payload: &Map<String, Value>,
    field_map: FieldMap<'_>,
    dialect: &dyn SqlDialect,
) -> Result<SetClause, QueryError> {
    if payload.is_empty() {
        return Err(QueryError::EmptyPayload);
    }

    let mut params = SqlParams::default();
    let cols: Vec<String> = payload
        .iter()
        .map(|(key, value)| {
            let idx = params.push(SqlValue::from(value));
            format!(
                "{}={}",
                dialect.quote_ident(column_for(key, field_map)),
                dialect.placeholder(idx)
            )
        })
        .collect();

    let set_cols = cols.join(", ");
    tracing::debug!(%set_cols, dialect = dialect.name(), "Compiled partial update");

    Ok(SetClause {
        set_cols,
        values: params.into_values(),
    })
}

fn column_for<'a>(key: &'a str, field_map: FieldMap<'a>) -> &'a str {
    field_map
        .iter()
        .find(|(field, column)| *field == key && !column.is_empty())
        .map(|(_, column)| *column)
        .unwrap_or(key)
}
