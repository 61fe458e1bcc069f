//! Job repository for PostgreSQL operations

use serde_json::{Map, Value};
use sqlx::PgPool;

use super::{select_sql, update_sql};
use crate::data::error::{DataError, QueryError};
use crate::data::filters::{FilterMode, FilterObject, Resource, compile_filter_with};
use crate::data::sql::{PostgresDialect, SqlValue, bind_query_as};
use crate::data::types::{JobRow, JobTuple, NewJob};
use crate::data::update::{JOB_FIELDS, JOB_UPDATABLE, check_update_fields, compile_update};

const ENTITY: &str = "job";

// NUMERIC equity comes back as text
const COLUMNS: &str = "id, title, salary, equity::TEXT, company_handle";

/// Build the job search statement and its parameters
pub fn find_all_sql(
    filters: &FilterObject,
    mode: FilterMode,
) -> Result<(String, Vec<SqlValue>), QueryError> {
    let clause = compile_filter_with(Resource::Job, filters, mode, &PostgresDialect)?;
    let sql = select_sql("jobs", COLUMNS, &clause, "title");
    Ok((sql, clause.params))
}

/// Build the job partial update statement; the id binds last
pub fn update_job_sql(payload: &Map<String, Value>) -> Result<(String, Vec<SqlValue>), QueryError> {
    check_update_fields(payload, JOB_UPDATABLE)?;
    let set = compile_update(payload, JOB_FIELDS)?;
    let sql = update_sql("jobs", &set, "id", COLUMNS);
    Ok((sql, set.values))
}

pub async fn create_job(pool: &PgPool, job: &NewJob) -> Result<JobRow, DataError> {
    let row = sqlx::query_as::<_, JobTuple>(&format!(
        "INSERT INTO jobs (title, salary, equity, company_handle)
         VALUES ($1, $2, $3::NUMERIC, $4)
         RETURNING {}",
        COLUMNS
    ))
    .bind(&job.title)
    .bind(job.salary)
    .bind(job.equity)
    .bind(&job.company_handle)
    .fetch_one(pool)
    .await?;

    tracing::debug!(id = row.0, company = %job.company_handle, "Job created");
    Ok(row.into())
}

/// List jobs matching the filters, ordered by title
pub async fn find_jobs(
    pool: &PgPool,
    filters: &FilterObject,
    mode: FilterMode,
) -> Result<Vec<JobRow>, DataError> {
    let (sql, params) = find_all_sql(filters, mode)?;
    let rows = bind_query_as(sqlx::query_as::<_, JobTuple>(&sql), &params)
        .fetch_all(pool)
        .await?;

    tracing::debug!(count = rows.len(), "Job search complete");
    Ok(rows.into_iter().map(JobRow::from).collect())
}

pub async fn get_job(pool: &PgPool, id: i32) -> Result<JobRow, DataError> {
    let row = sqlx::query_as::<_, JobTuple>(&format!("SELECT {} FROM jobs WHERE id = $1", COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DataError::not_found(ENTITY, id))?;
    Ok(row.into())
}

/// Apply a partial update to a job
pub async fn update_job(
    pool: &PgPool,
    id: i32,
    payload: &Map<String, Value>,
) -> Result<JobRow, DataError> {
    let (sql, values) = update_job_sql(payload)?;
    let row = bind_query_as(sqlx::query_as::<_, JobTuple>(&sql), &values)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DataError::not_found(ENTITY, id))?;

    tracing::debug!(id, fields = values.len(), "Job updated");
    Ok(row.into())
}

pub async fn delete_job(pool: &PgPool, id: i32) -> Result<(), DataError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DataError::not_found(ENTITY, id));
    }
    tracing::debug!(id, "Job deleted");
    Ok(())
}
