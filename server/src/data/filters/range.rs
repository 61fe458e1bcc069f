//! Min/max range validation
//!
//! Filter values are weakly typed, so comparisons follow loose scalar rules:
//! absent/null/false/0/""/NaN are falsy, equality is type-strict, and ordering
//! compares strings lexicographically and everything else numerically.
//! Arrays and objects order by their text form (`["9"]` is `"9"`).

use std::borrow::Cow;
use std::cmp::Ordering;

use serde_json::Value;

use super::types::{COMPANY_FILTERS, FilterObject, RangeBounds, literal_text};
use crate::data::error::{QueryError, RangeError};

/// Validate `minEmployees`/`maxEmployees` of a company filter
pub fn check_range(filters: &FilterObject) -> Result<(), QueryError> {
    match COMPANY_FILTERS.range {
        Some(bounds) => check_bounds(filters, &bounds).map_err(QueryError::from),
        None => Ok(()),
    }
}

/// Validate a min/max pair
///
/// A falsy min next to a truthy max is accepted without comparing.
pub fn check_bounds(filters: &FilterObject, bounds: &RangeBounds) -> Result<(), RangeError> {
    let min = filters.get(bounds.min);
    let max = filters.get(bounds.max);

    if !is_truthy(min) && is_truthy(max) {
        return Ok(());
    }
    if strict_equals(min, max) {
        return Err(RangeError::EqualBounds);
    }
    if greater_than(min, max) {
        return Err(RangeError::InvertedBounds);
    }
    Ok(())
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn strict_equals(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x.as_f64() == y.as_f64(),
        (Some(Value::Null), Some(Value::Null)) => true,
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x == y,
        (Some(Value::String(x)), Some(Value::String(y))) => x == y,
        // Arrays and objects are compared by identity, never equal across keys
        _ => false,
    }
}

fn greater_than(a: Option<&Value>, b: Option<&Value>) -> bool {
    let (x, y) = (text_form(a), text_form(b));
    if let (Some(x), Some(y)) = (&x, &y) {
        return x.encode_utf16().cmp(y.encode_utf16()) == Ordering::Greater;
    }
    let x = x.map_or_else(|| to_number(a), |t| parse_number(&t));
    let y = y.map_or_else(|| to_number(b), |t| parse_number(&t));
    x > y
}

/// Text a value orders by, or `None` for values that order numerically
fn text_form(value: Option<&Value>) -> Option<Cow<'_, str>> {
    match value {
        Some(Value::String(s)) => Some(Cow::Borrowed(s.as_str())),
        Some(Value::Array(items)) => Some(Cow::Owned(join_text(items))),
        Some(Value::Object(_)) => Some(Cow::Borrowed("[object Object]")),
        _ => None,
    }
}

/// Comma-joined element text; null elements are empty
fn join_text(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Null => Cow::Borrowed(""),
            Value::Array(inner) => Cow::Owned(join_text(inner)),
            Value::Object(_) => Cow::Borrowed("[object Object]"),
            other => literal_text(other),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Numeric coercion; NaN makes every ordering comparison false
fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_number(s),
        Some(Value::Array(items)) => parse_number(&join_text(items)),
        Some(Value::Object(_)) => f64::NAN,
    }
}

fn parse_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }
    // Rust also accepts "inf"/"nan" spellings, which are not numbers here
    if s.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn filters(value: Value) -> FilterObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn min_greater_than_max_is_rejected() {
        let result = check_range(&filters(json!({"maxEmployees": 50, "minEmployees": 100})));
        assert_eq!(
            result,
            Err(QueryError::RangeInconsistency(RangeError::InvertedBounds))
        );
    }

    #[test]
    fn equal_bounds_are_rejected() {
        let result = check_range(&filters(json!({"maxEmployees": 50, "minEmployees": 50})));
        assert_eq!(
            result,
            Err(QueryError::RangeInconsistency(RangeError::EqualBounds))
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "Max and min can not be equal."
        );
    }

    #[test]
    fn integral_float_equals_integer() {
        let result = check_range(&filters(json!({"minEmployees": 50.0, "maxEmployees": 50})));
        assert_eq!(
            result,
            Err(QueryError::RangeInconsistency(RangeError::EqualBounds))
        );
    }

    #[test]
    fn valid_range_passes() {
        assert!(check_range(&filters(json!({"minEmployees": 10, "maxEmployees": 50}))).is_ok());
    }

    #[test]
    fn max_without_min_skips_check() {
        assert!(check_range(&filters(json!({"name": "a", "maxEmployees": 5}))).is_ok());
        // falsy min is treated as absent
        assert!(check_range(&filters(json!({"minEmployees": 0, "maxEmployees": 5}))).is_ok());
    }

    #[test]
    fn min_without_max_passes() {
        assert!(check_range(&filters(json!({"name": "a", "minEmployees": 100}))).is_ok());
    }

    #[test]
    fn zero_max_with_truthy_min_is_compared() {
        let result = check_range(&filters(json!({"minEmployees": 10, "maxEmployees": 0})));
        assert_eq!(
            result,
            Err(QueryError::RangeInconsistency(RangeError::InvertedBounds))
        );
    }

    #[test]
    fn both_absent_counts_as_equal() {
        assert_eq!(
            check_range(&filters(json!({"name": "a"}))),
            Err(QueryError::RangeInconsistency(RangeError::EqualBounds))
        );
    }

    #[test]
    fn mixed_string_and_number_compare_numerically() {
        // "50" and 50 are not strictly equal, and "100" > 50 numerically
        assert!(check_range(&filters(json!({"minEmployees": "50", "maxEmployees": 50}))).is_ok());
        assert_eq!(
            check_range(&filters(json!({"minEmployees": "100", "maxEmployees": 50}))),
            Err(QueryError::RangeInconsistency(RangeError::InvertedBounds))
        );
    }

    #[test]
    fn strings_compare_lexicographically() {
        // "9" > "10" as strings
        assert_eq!(
            check_range(&filters(json!({"minEmployees": "9", "maxEmployees": "10"}))),
            Err(QueryError::RangeInconsistency(RangeError::InvertedBounds))
        );
    }

    #[test]
    fn arrays_order_by_their_text() {
        // ["9"] becomes "9", which sorts after "10"
        assert_eq!(
            check_range(&filters(json!({"minEmployees": ["9"], "maxEmployees": "10"}))),
            Err(QueryError::RangeInconsistency(RangeError::InvertedBounds))
        );
        // against a number the array text is parsed
        assert_eq!(
            check_range(&filters(json!({"minEmployees": [100], "maxEmployees": 50}))),
            Err(QueryError::RangeInconsistency(RangeError::InvertedBounds))
        );
        assert!(check_range(&filters(json!({"minEmployees": [1, 2], "maxEmployees": 0}))).is_ok());
    }

    #[test]
    fn array_numeric_coercion() {
        assert_eq!(to_number(Some(&json!([]))), 0.0);
        assert_eq!(to_number(Some(&json!([null]))), 0.0);
        assert_eq!(to_number(Some(&json!([[7]]))), 7.0);
        assert_eq!(join_text(&[json!(1), json!(null), json!("a"), json!(1e21)]), "1,,a,1e+21");
        assert!(to_number(Some(&json!({"a": 1}))).is_nan());
    }

    #[test]
    fn non_numeric_strings_never_order() {
        assert!(check_range(&filters(json!({"minEmployees": "lots", "maxEmployees": 5}))).is_ok());
    }

    #[test]
    fn parse_number_forms() {
        assert_eq!(parse_number(" 42 "), 42.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("0x10"), 16.0);
        assert_eq!(parse_number("1e3"), 1000.0);
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("NaN").is_nan());
        assert!(parse_number("12abc").is_nan());
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(null))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(is_truthy(Some(&json!("0"))));
        assert!(is_truthy(Some(&json!([]))));
    }
}
