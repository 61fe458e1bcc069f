//! User repository for PostgreSQL operations

use serde_json::{Map, Value};
use sqlx::PgPool;

use super::update_sql;
use crate::data::error::{DataError, QueryError};
use crate::data::sql::{SqlValue, bind_query_as};
use crate::data::types::{UserRow, UserTuple};
use crate::data::update::{USER_FIELDS, USER_UPDATABLE, check_update_fields, compile_update};

const ENTITY: &str = "user";

const COLUMNS: &str = "username, first_name, last_name, email, is_admin";

/// Build the user partial update statement; the username binds last
pub fn update_user_sql(
    payload: &Map<String, Value>,
) -> Result<(String, Vec<SqlValue>), QueryError> {
    check_update_fields(payload, USER_UPDATABLE)?;
    let set = compile_update(payload, USER_FIELDS)?;
    let sql = update_sql("users", &set, "username", COLUMNS);
    Ok((sql, set.values))
}

/// Get a user by username
pub async fn get_user(pool: &PgPool, username: &str) -> Result<UserRow, DataError> {
    let row = sqlx::query_as::<_, UserTuple>(&format!(
        "SELECT {} FROM users WHERE username = $1",
        COLUMNS
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DataError::not_found(ENTITY, username))?;
    Ok(row.into())
}

/// Apply a partial update to a user
pub async fn update_user(
    pool: &PgPool,
    username: &str,
    payload: &Map<String, Value>,
) -> Result<UserRow, DataError> {
    let (sql, values) = update_user_sql(payload)?;
    let row = bind_query_as(sqlx::query_as::<_, UserTuple>(&sql), &values)
        .bind(username)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DataError::not_found(ENTITY, username))?;

    tracing::debug!(%username, fields = values.len(), "User updated");
    Ok(row.into())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn update_maps_user_fields() {
        let payload = match json!({"firstName": "Aliya", "email": "aliya@example.com"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let (sql, values) = update_user_sql(&payload).unwrap();
        assert_eq!(
            sql,
            r#"UPDATE users SET "first_name"=$1, "email"=$2 WHERE username = $3 RETURNING username, first_name, last_name, email, is_admin"#
        );
        assert_eq!(
            values,
            vec![
                SqlValue::Text("Aliya".to_string()),
                SqlValue::Text("aliya@example.com".to_string())
            ]
        );
    }

    #[test]
    fn update_without_data() {
        assert_eq!(
            update_user_sql(&Map::new()).unwrap_err(),
            QueryError::EmptyPayload
        );
    }

    #[test]
    fn update_rejects_password_and_admin_flag() {
        for key in ["password", "isAdmin"] {
            let mut payload = Map::new();
            payload.insert(key.to_string(), json!("x"));
            assert_eq!(
                update_user_sql(&payload).unwrap_err(),
                QueryError::invalid_update_field(key)
            );
        }
    }
}
