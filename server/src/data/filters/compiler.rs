//! Filter clause compiler
//!
//! Builds the WHERE expression for a resource from its descriptor. Predicates
//! are emitted in the filter object's key order and joined with `AND`.

use serde::Serialize;
use serde_json::Value;

use super::range::check_bounds;
use super::types::{FilterField, FilterMode, FilterObject, Resource, ResourceDescriptor};
use crate::data::error::QueryError;
use crate::data::sql::{SqlDialect, SqlParams, SqlValue};

const AND: &str = " AND ";

/// A compiled WHERE expression and its bound values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl WhereClause {
    /// True when no filters were given; callers omit the WHERE keyword
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Compile filters with values interpolated into the SQL text
///
/// Output is byte-compatible with existing consumers of the search helpers.
/// Values are not escaped, so only use this with trusted input.
pub fn compile_filter(resource: Resource, filters: &FilterObject) -> Result<String, QueryError> {
    let descriptor = resource.descriptor();
    let fields = resolve(descriptor, filters)?;
    validate_range(descriptor, filters, fields.len())?;

    let sql = fields
        .iter()
        .map(|(field, value)| field.predicate.render_literal(value))
        .collect::<Vec<_>>()
        .join(AND);

    tracing::debug!(%resource, %sql, "Compiled literal filter clause");
    Ok(sql)
}

/// Compile filters with every value routed through a bound placeholder
///
/// Predicate shape and operators match `compile_filter`; only the value
/// positions become placeholders numbered from 1.
pub fn compile_filter_params(
    resource: Resource,
    filters: &FilterObject,
    dialect: &dyn SqlDialect,
) -> Result<WhereClause, QueryError> {
    let descriptor = resource.descriptor();
    let fields = resolve(descriptor, filters)?;
    validate_range(descriptor, filters, fields.len())?;

    let mut params = SqlParams::default();
    let sql = fields
        .iter()
        .map(|(field, value)| field.predicate.render_bound(value, &mut params, dialect))
        .collect::<Vec<_>>()
        .join(AND);

    tracing::debug!(%resource, %sql, dialect = dialect.name(), "Compiled bound filter clause");
    tracing::trace!(params = ?params.values, "Filter clause parameters");
    Ok(WhereClause {
        sql,
        params: params.into_values(),
    })
}

/// Compile filters in the given mode
pub fn compile_filter_with(
    resource: Resource,
    filters: &FilterObject,
    mode: FilterMode,
    dialect: &dyn SqlDialect,
) -> Result<WhereClause, QueryError> {
    match mode {
        FilterMode::Bound => compile_filter_params(resource, filters, dialect),
        FilterMode::Literal => Ok(WhereClause {
            sql: compile_filter(resource, filters)?,
            params: Vec::new(),
        }),
    }
}

/// Validate every key against the allow-list before any rendering
fn resolve<'a>(
    descriptor: &ResourceDescriptor,
    filters: &'a FilterObject,
) -> Result<Vec<(&'static FilterField, &'a Value)>, QueryError> {
    filters
        .iter()
        .map(|(key, value)| match descriptor.field(key) {
            Some(field) => Ok((field, value)),
            None => {
                tracing::debug!(resource = descriptor.name, %key, "Rejected filter key");
                Err(QueryError::invalid_filter_key(key))
            }
        })
        .collect()
}

/// Range checks only apply once more than one filter is combined
fn validate_range(
    descriptor: &ResourceDescriptor,
    filters: &FilterObject,
    field_count: usize,
) -> Result<(), QueryError> {
    match descriptor.range {
        Some(bounds) if field_count > 1 => Ok(check_bounds(filters, &bounds)?),
        _ => Ok(()),
    }
}
