//! Field deserializers that fall back to defaults instead of failing.
//!
//! A wrong type in one field of one section must not reject the whole
//! document, so these read the raw value and keep what they can use.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Text field: strings as-is, numbers and booleans stringified, anything
/// else (null, arrays, objects) empty.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Enum-like field with a string fallback conversion; non-strings become the default.
pub(crate) fn enum_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String> + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => T::from(s),
        _ => T::default(),
    })
}

/// Optional enum-like string, dropping values it does not recognize.
pub(crate) fn hint<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.parse().ok(),
        _ => None,
    })
}

/// Optional count accepting integers and numeric strings.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Spacing;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "string")]
        name: String,
        #[serde(default, deserialize_with = "count")]
        columns: Option<u16>,
        #[serde(default, deserialize_with = "enum_or_default")]
        spacing: Spacing,
    }

    fn parse(value: serde_json::Value) -> Fields {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_string_fallbacks() {
        assert_eq!(parse(json!({"name": null})).name, "");
        assert_eq!(parse(json!({"name": 42})).name, "42");
        assert_eq!(parse(json!({"name": ["a"]})).name, "");
        assert_eq!(parse(json!({})).name, "");
    }

    #[test]
    fn test_count_fallbacks() {
        assert_eq!(parse(json!({"columns": 2})).columns, Some(2));
        assert_eq!(parse(json!({"columns": "4"})).columns, Some(4));
        assert_eq!(parse(json!({"columns": "wide"})).columns, None);
        assert_eq!(parse(json!({"columns": -1})).columns, None);
        assert_eq!(parse(json!({"columns": 70000})).columns, None);
    }

    #[test]
    fn test_enum_fallbacks() {
        assert_eq!(parse(json!({"spacing": "compact"})).spacing, Spacing::Compact);
        assert_eq!(parse(json!({"spacing": 2})).spacing, Spacing::Normal);
        assert_eq!(parse(json!({"spacing": null})).spacing, Spacing::Normal);
    }
}
