//! Lenient JSON field conversion used by the request models.
//!
//! Front-ends post form values either as numbers or as strings, so numeric
//! fields accept both. A numeric key that is present with `null` is rejected
//! instead of falling back to the default; [`raw`] keeps the `null` for fields
//! that decide for themselves.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

pub fn value_to_f64(value: &Value) -> Result<f64, String> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("number out of range: {}", n)),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("could not convert string to float: '{}'", s)),
        Value::Null => Err("expected a number, found null".to_string()),
        other => Err(format!("expected a number, found {}", other)),
    }
}

pub fn value_to_i64(value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                // 浮點數向零截斷
                Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Ok(f.trunc() as i64),
                _ => Err(format!("cannot convert {} to an integer", n)),
            }
        }
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("invalid literal for integer: '{}'", s)),
        Value::Null => Err("expected an integer, found null".to_string()),
        other => Err(format!("expected an integer, found {}", other)),
    }
}

/// `#[serde(default, deserialize_with = "coerce::number")]`
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_f64(&value).map(Some).map_err(de::Error::custom)
}

/// `#[serde(default, deserialize_with = "coerce::integer")]`
pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_i64(&value).map(Some).map_err(de::Error::custom)
}

/// `#[serde(default, deserialize_with = "coerce::raw")]`: keeps an explicit
/// `null` as `Some(Value::Null)` so only a missing key falls back to a default.
pub fn raw<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_and_numeric_strings() {
        assert_eq!(value_to_f64(&json!(21)), Ok(21.0));
        assert_eq!(value_to_f64(&json!(1.5)), Ok(1.5));
        assert_eq!(value_to_f64(&json!(" 12.5 ")), Ok(12.5));
        assert_eq!(value_to_f64(&json!(true)), Ok(1.0));
        assert!(value_to_f64(&json!("abc")).is_err());
        assert!(value_to_f64(&json!(null)).is_err());
        assert!(value_to_f64(&json!([1])).is_err());
    }

    #[test]
    fn test_integer_truncates_floats() {
        assert_eq!(value_to_i64(&json!(3)), Ok(3));
        assert_eq!(value_to_i64(&json!(2.9)), Ok(2));
        assert_eq!(value_to_i64(&json!(-2.9)), Ok(-2));
        assert_eq!(value_to_i64(&json!("4")), Ok(4));
        assert!(value_to_i64(&json!("2.5")).is_err());
        assert!(value_to_i64(&json!(null)).is_err());
    }
}
