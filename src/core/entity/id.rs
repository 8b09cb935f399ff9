// Normalized entity identifier.
//
// Purpose
// - Give every cross-entity match one comparable key type.
//
// Responsibilities
// - Integers and integer-valued strings collapse to Numeric, so "3" and 3 are the same key.
// - Anything else is kept as trimmed text and compared by string equality.
// - Lookup objects like {"Id": 3, "Name": "Website"} resolve to their Id.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Numeric(i64),
    Text(String),
}

impl EntityId {
    /// Parses a textual identifier. Blank input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(number) = trimmed.parse::<i64>() {
            return Some(EntityId::Numeric(number));
        }
        match trimmed.parse::<f64>() {
            Ok(number) if is_integral(number) => Some(EntityId::Numeric(number as i64)),
            _ => Some(EntityId::Text(trimmed.to_string())),
        }
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => {
                if let Some(integer) = number.as_i64() {
                    Some(EntityId::Numeric(integer))
                } else {
                    match number.as_f64() {
                        Some(float) if is_integral(float) => Some(EntityId::Numeric(float as i64)),
                        _ => Some(EntityId::Text(number.to_string())),
                    }
                }
            }
            Value::String(text) => EntityId::parse(text),
            Value::Object(lookup) => lookup
                .get("Id")
                .or_else(|| lookup.get("id"))
                .filter(|inner| !inner.is_object())
                .and_then(EntityId::from_value),
            _ => None,
        }
    }
}

fn is_integral(number: f64) -> bool {
    number.is_finite()
        && number.fract() == 0.0
        && number >= i64::MIN as f64
        && number <= i64::MAX as f64
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        EntityId::Numeric(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        EntityId::parse(value).unwrap_or_else(|| EntityId::Text(String::new()))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Numeric(number) => write!(f, "{number}"),
            EntityId::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod entity_id_tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(3))]
    #[case(json!("3"))]
    #[case(json!(" 3 "))]
    #[case(json!(3.0))]
    #[case(json!({"Id": 3, "Name": "Website"}))]
    fn it_should_collapse_numeric_shapes_to_the_same_key(#[case] raw: Value) {
        assert_eq!(EntityId::from_value(&raw), Some(EntityId::Numeric(3)));
    }

    #[rstest]
    fn it_should_keep_non_numeric_identifiers_as_text() {
        assert_eq!(
            EntityId::from_value(&json!(" proj-a ")),
            Some(EntityId::Text("proj-a".to_string()))
        );
        assert_ne!(EntityId::from("proj-a"), EntityId::from("proj-b"));
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!(""))]
    #[case(json!("   "))]
    #[case(json!(true))]
    #[case(json!([1, 2]))]
    #[case(json!({"Name": "no id"}))]
    fn it_should_reject_values_without_an_identifier(#[case] raw: Value) {
        assert_eq!(EntityId::from_value(&raw), None);
    }

    #[rstest]
    fn it_should_keep_fractional_numbers_as_text() {
        assert_eq!(
            EntityId::from_value(&json!(2.5)),
            Some(EntityId::Text("2.5".to_string()))
        );
    }

    #[rstest]
    fn it_should_display_the_identifier() {
        assert_eq!(EntityId::Numeric(42).to_string(), "42");
        assert_eq!(EntityId::Text("abc".into()).to_string(), "abc");
    }
}
