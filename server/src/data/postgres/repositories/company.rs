//! Company repository for PostgreSQL operations

use serde_json::{Map, Value};
use sqlx::PgPool;

use super::{select_sql, update_sql};
use crate::data::error::{DataError, QueryError};
use crate::data::filters::{FilterMode, FilterObject, Resource, compile_filter_with};
use crate::data::sql::{PostgresDialect, SqlValue, bind_query_as};
use crate::data::types::{CompanyDetail, CompanyRow, CompanyTuple, JobRow, JobTuple, NewCompany};
use crate::data::update::{COMPANY_FIELDS, COMPANY_UPDATABLE, check_update_fields, compile_update};

const ENTITY: &str = "company";

const COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// Build the company search statement and its parameters
pub fn find_all_sql(
    filters: &FilterObject,
    mode: FilterMode,
) -> Result<(String, Vec<SqlValue>), QueryError> {
    let clause = compile_filter_with(Resource::Company, filters, mode, &PostgresDialect)?;
    let sql = select_sql("companies", COLUMNS, &clause, "name");
    Ok((sql, clause.params))
}

/// Build the company partial update statement; the handle binds last
pub fn update_company_sql(
    payload: &Map<String, Value>,
) -> Result<(String, Vec<SqlValue>), QueryError> {
    check_update_fields(payload, COMPANY_UPDATABLE)?;
    let set = compile_update(payload, COMPANY_FIELDS)?;
    let sql = update_sql("companies", &set, "handle", COLUMNS);
    Ok((sql, set.values))
}

/// Create a company; fails if the handle is taken
pub async fn create_company(pool: &PgPool, company: &NewCompany) -> Result<CompanyRow, DataError> {
    let existing: Option<String> =
        sqlx::query_scalar("SELECT handle FROM companies WHERE handle = $1")
            .bind(&company.handle)
            .fetch_optional(pool)
            .await?;

    if existing.is_some() {
        return Err(DataError::duplicate(ENTITY, &company.handle));
    }

    let row = sqlx::query_as::<_, CompanyTuple>(&format!(
        "INSERT INTO companies (handle, name, description, num_employees, logo_url)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {}",
        COLUMNS
    ))
    .bind(&company.handle)
    .bind(&company.name)
    .bind(&company.description)
    .bind(company.num_employees)
    .bind(&company.logo_url)
    .fetch_one(pool)
    .await?;

    tracing::debug!(handle = %company.handle, "Company created");
    Ok(row.into())
}

/// List companies matching the filters, ordered by name
pub async fn find_companies(
    pool: &PgPool,
    filters: &FilterObject,
    mode: FilterMode,
) -> Result<Vec<CompanyRow>, DataError> {
    let (sql, params) = find_all_sql(filters, mode)?;
    let rows = bind_query_as(sqlx::query_as::<_, CompanyTuple>(&sql), &params)
        .fetch_all(pool)
        .await?;

    tracing::debug!(count = rows.len(), "Company search complete");
    Ok(rows.into_iter().map(CompanyRow::from).collect())
}

/// Get a company and its jobs
pub async fn get_company(pool: &PgPool, handle: &str) -> Result<CompanyDetail, DataError> {
    let company = sqlx::query_as::<_, CompanyTuple>(&format!(
        "SELECT {} FROM companies WHERE handle = $1",
        COLUMNS
    ))
    .bind(handle)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DataError::not_found(ENTITY, handle))?;

    let jobs = sqlx::query_as::<_, JobTuple>(
        "SELECT id, title, salary, equity::TEXT, company_handle
         FROM jobs WHERE company_handle = $1 ORDER BY id",
    )
    .bind(handle)
    .fetch_all(pool)
    .await?;

    Ok(CompanyDetail {
        company: company.into(),
        jobs: jobs.into_iter().map(JobRow::from).collect(),
    })
}

/// Apply a partial update to a company
pub async fn update_company(
    pool: &PgPool,
    handle: &str,
    payload: &Map<String, Value>,
) -> Result<CompanyRow, DataError> {
    let (sql, values) = update_company_sql(payload)?;
    let row = bind_query_as(sqlx::query_as::<_, CompanyTuple>(&sql), &values)
        .bind(handle)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DataError::not_found(ENTITY, handle))?;

    tracing::debug!(%handle, fields = values.len(), "Company updated");
    Ok(row.into())
}

/// Delete a company (its jobs cascade)
pub async fn delete_company(pool: &PgPool, handle: &str) -> Result<(), DataError> {
    let deleted: Option<String> =
        sqlx::query_scalar("DELETE FROM companies WHERE handle = $1 RETURNING handle")
            .bind(handle)
            .fetch_optional(pool)
            .await?;

    match deleted {
        Some(_) => {
            tracing::debug!(%handle, "Company deleted");
            Ok(())
        }
        None => Err(DataError::not_found(ENTITY, handle)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::data::error::RangeError;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn find_all_without_filters() {
        let (sql, params) = find_all_sql(&FilterObject::new(), FilterMode::Bound).unwrap();
        assert_eq!(
            sql,
            "SELECT handle, name, description, num_employees, logo_url FROM companies ORDER BY name"
        );
        assert!(params.is_empty());
    }

    #[test]
    fn find_all_literal_filters() {
        let (sql, params) = find_all_sql(
            &object(json!({"name": "bro", "minEmployees": 100})),
            FilterMode::Literal,
        )
        .unwrap();
        assert!(sql.ends_with(
            "FROM companies WHERE LOWER(name) LIKE '%bro%' AND num_employees > 100 ORDER BY name"
        ));
        assert!(params.is_empty());
    }

    #[test]
    fn find_all_bound_filters() {
        let (sql, params) = find_all_sql(
            &object(json!({"minEmployees": 2, "maxEmployees": 3})),
            FilterMode::Bound,
        )
        .unwrap();
        assert!(sql.contains("WHERE num_employees > $1 AND num_employees < $2"));
        assert_eq!(params, vec![SqlValue::Int(2), SqlValue::Int(3)]);
    }

    #[test]
    fn find_all_rejects_bad_range() {
        let err = find_all_sql(
            &object(json!({"minEmployees": 3, "maxEmployees": 2})),
            FilterMode::Bound,
        )
        .unwrap_err();
        assert_eq!(
            err,
            QueryError::RangeInconsistency(RangeError::InvertedBounds)
        );
    }

    #[test]
    fn update_maps_columns_and_binds_handle_last() {
        let (sql, values) =
            update_company_sql(&object(json!({"name": "New", "numEmployees": 10}))).unwrap();
        assert_eq!(
            sql,
            r#"UPDATE companies SET "name"=$1, "num_employees"=$2 WHERE handle = $3 RETURNING handle, name, description, num_employees, logo_url"#
        );
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn update_without_data() {
        assert_eq!(
            update_company_sql(&Map::new()).unwrap_err(),
            QueryError::EmptyPayload
        );
    }

    #[test]
    fn update_rejects_keys_outside_updatable_fields() {
        let err = update_company_sql(&object(json!({"name\"=$1, \"handle": "pwned"})))
            .unwrap_err();
        assert_eq!(err, QueryError::invalid_update_field("name\"=$1, \"handle"));

        let err = update_company_sql(&object(json!({"name": "New", "handle": "other"})))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid field handle");
    }
}
