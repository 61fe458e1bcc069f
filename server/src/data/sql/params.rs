//! Bound SQL values
//!
//! Caller payloads arrive as loosely typed JSON. `SqlValue` keeps just enough of
//! that shape to bind through sqlx without interpreting the value further; type
//! mismatches surface from PostgreSQL when the statement runs.

use serde::Serialize;
use serde_json::Value;
use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;

/// A single bound parameter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<&Value> for SqlValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Self::Text(value.to_string()),
        }
    }
}

impl From<Value> for SqlValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            other => Self::from(&other),
        }
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Collects SQL parameters during clause building (maintains insertion order)
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SqlParams {
    pub values: Vec<SqlValue>,
}

impl SqlParams {
    /// Append a value and return its 1-based placeholder index
    pub fn push(&mut self, value: impl Into<SqlValue>) -> usize {
        self.values.push(value.into());
        self.values.len()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<SqlValue> {
        self.values
    }
}

/// Bind values onto a sqlx `query_as` in placeholder order
pub fn bind_query_as<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    values: &[SqlValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    values.iter().fold(query, |query, value| match value.clone() {
        // Untyped NULL is not expressible through sqlx; int8 has assignment
        // casts to the integer, numeric and text columns in this schema.
        SqlValue::Null => query.bind(None::<i64>),
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(i) => query.bind(i),
        SqlValue::Float(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn sql_value_from_json() {
        assert_eq!(SqlValue::from(&json!(null)), SqlValue::Null);
        assert_eq!(SqlValue::from(&json!(true)), SqlValue::Bool(true));
        assert_eq!(SqlValue::from(&json!(100)), SqlValue::Int(100));
        assert_eq!(SqlValue::from(&json!(0.25)), SqlValue::Float(0.25));
        assert_eq!(
            SqlValue::from(&json!("bro")),
            SqlValue::Text("bro".to_string())
        );
        assert_eq!(
            SqlValue::from(&json!([1, 2])),
            SqlValue::Text("[1,2]".to_string())
        );
    }

    #[test]
    fn sql_params_indices_are_one_based() {
        let mut params = SqlParams::default();
        assert!(params.is_empty());
        assert_eq!(params.push(SqlValue::Int(1)), 1);
        assert_eq!(params.push("x".to_string()), 2);
        assert_eq!(params.len(), 2);
        assert_eq!(
            params.into_values(),
            vec![SqlValue::Int(1), SqlValue::Text("x".to_string())]
        );
    }

    #[test]
    fn sql_value_serializes_untagged() {
        let values = vec![SqlValue::Null, SqlValue::Int(3), SqlValue::Text("a".into())];
        assert_eq!(serde_json::to_string(&values).unwrap(), r#"[null,3,"a"]"#);
    }
}
