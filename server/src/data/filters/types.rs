//! Filter type definitions
//!
//! Each searchable resource is described by a static `ResourceDescriptor`: the
//! allow-listed filter keys, the predicate each key compiles to, and the
//! optional min/max pair that must be range-checked.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::sql::{SqlDialect, SqlParams, SqlValue};
use crate::utils::sql::escape_like_pattern;

/// Caller-supplied filters, in the order the caller wrote the keys
pub type FilterObject = serde_json::Map<String, Value>;

/// Resources that support filtered search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Company,
    Job,
}

impl Resource {
    pub fn descriptor(&self) -> &'static ResourceDescriptor {
        match self {
            Resource::Company => &COMPANY_FILTERS,
            Resource::Job => &JOB_FILTERS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.descriptor().name
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How filter values reach the database
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Values travel as bound parameters
    #[default]
    Bound,
    /// Values are interpolated into the clause text
    Literal,
}

impl FilterMode {
    pub fn from_bind_values(bind_values: bool) -> Self {
        if bind_values { Self::Bound } else { Self::Literal }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Gt,
    Lt,
    Gte,
}

impl CompareOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Gte => ">=",
        }
    }
}

/// Predicate template for a single filter key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring match: `LOWER(column) LIKE '%value%'`
    Contains { column: &'static str },
    /// `column <op> value`
    Compare { column: &'static str, op: CompareOp },
    /// Fixed SQL; the filter value is ignored, only the key's presence counts
    Flag { sql: &'static str },
}

impl Predicate {
    /// Render with the value interpolated into the SQL text
    pub fn render_literal(&self, value: &Value) -> String {
        match self {
            Predicate::Contains { column } => {
                format!(
                    "LOWER({}) LIKE '%{}%'",
                    column,
                    literal_text(value).to_lowercase()
                )
            }
            Predicate::Compare { column, op } => {
                format!("{} {} {}", column, op.as_sql(), literal_text(value))
            }
            Predicate::Flag { sql } => sql.to_string(),
        }
    }

    /// Render with the value pushed onto `params` and referenced by placeholder
    pub fn render_bound(
        &self,
        value: &Value,
        params: &mut SqlParams,
        dialect: &dyn SqlDialect,
    ) -> String {
        match self {
            Predicate::Contains { column } => {
                let pattern = format!(
                    "%{}%",
                    escape_like_pattern(&literal_text(value).to_lowercase())
                );
                let idx = params.push(SqlValue::Text(pattern));
                format!("LOWER({}) LIKE {}", column, dialect.placeholder(idx))
            }
            Predicate::Compare { column, op } => {
                let idx = params.push(SqlValue::from(value));
                format!("{} {} {}", column, op.as_sql(), dialect.placeholder(idx))
            }
            Predicate::Flag { sql } => sql.to_string(),
        }
    }
}

/// Text form of a filter value as it appears when interpolated
pub fn literal_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Number(n) => Cow::Owned(match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(u)) => u.to_string(),
            _ => n.as_f64().map(number_text).unwrap_or_else(|| n.to_string()),
        }),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Null => Cow::Borrowed("null"),
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

/// Shortest round-trip text of a float, switching to exponent form outside
/// `1e-6 <= |f| < 1e21` (`1e+21`, `1.5e-7`)
pub(crate) fn number_text(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        let text = if f > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        // Display prints integral floats without a fraction (100.0 -> "100")
        return f.to_string();
    }
    let exp = format!("{:e}", f);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

/// An allow-listed filter key and its predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub key: &'static str,
    pub predicate: Predicate,
}

/// Min/max filter keys that are validated against each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeBounds {
    pub min: &'static str,
    pub max: &'static str,
}

/// Allow-list and predicate table for one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub name: &'static str,
    pub fields: &'static [FilterField],
    pub range: Option<RangeBounds>,
}

impl ResourceDescriptor {
    pub fn field(&self, key: &str) -> Option<&'static FilterField> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn is_allowed(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    /// Allow-listed filter keys in declaration order
    pub fn codes(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.key).collect()
    }
}

pub const COMPANY_FILTERS: ResourceDescriptor = ResourceDescriptor {
    name: "company",
    fields: &[
        FilterField {
            key: "name",
            predicate: Predicate::Contains { column: "name" },
        },
        FilterField {
            key: "minEmployees",
            predicate: Predicate::Compare {
                column: "num_employees",
                op: CompareOp::Gt,
            },
        },
        FilterField {
            key: "maxEmployees",
            predicate: Predicate::Compare {
                column: "num_employees",
                op: CompareOp::Lt,
            },
        },
    ],
    range: Some(RangeBounds {
        min: "minEmployees",
        max: "maxEmployees",
    }),
};

pub const JOB_FILTERS: ResourceDescriptor = ResourceDescriptor {
    name: "job",
    fields: &[
        FilterField {
            key: "title",
            predicate: Predicate::Contains { column: "title" },
        },
        FilterField {
            key: "minSalary",
            predicate: Predicate::Compare {
                column: "salary",
                op: CompareOp::Gte,
            },
        },
        FilterField {
            key: "hasEquity",
            predicate: Predicate::Flag { sql: "equity > 0" },
        },
    ],
    range: None,
};
