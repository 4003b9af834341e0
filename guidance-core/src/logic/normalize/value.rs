//! Attribute values and per-kind coercion

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::UNKNOWN_CATEGORY;
use crate::logic::schema::FieldKind;

/// A resolved attribute: numeric or categorical
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(f64),
    Text(String),
}

impl AttributeValue {
    /// Default for a field kind (0 / "Unknown")
    pub fn default_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Numeric => AttributeValue::Number(0.0),
            FieldKind::Categorical => AttributeValue::Text(UNKNOWN_CATEGORY.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            AttributeValue::Text(s) => parse_number(s),
        }
    }

    /// Category string (numbers are stringified)
    pub fn to_category(&self) -> String {
        match self {
            AttributeValue::Number(n) => format_number(*n),
            AttributeValue::Text(s) => s.clone(),
        }
    }
}

/// Outcome of coercing one raw JSON value
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Coerced {
    Value(AttributeValue),
    /// null or blank
    Empty,
    /// present but unusable for the field kind
    Malformed,
}

pub(crate) fn coerce(kind: FieldKind, raw: &Value) -> Coerced {
    match kind {
        FieldKind::Numeric => coerce_numeric(raw),
        FieldKind::Categorical => coerce_categorical(raw),
    }
}

fn coerce_numeric(raw: &Value) -> Coerced {
    match raw {
        Value::Null => Coerced::Empty,
        Value::Number(n) => match n.as_f64() {
            Some(x) if x.is_finite() => Coerced::Value(AttributeValue::Number(x)),
            _ => Coerced::Malformed,
        },
        Value::Bool(b) => Coerced::Value(AttributeValue::Number(if *b { 1.0 } else { 0.0 })),
        Value::String(s) if s.trim().is_empty() => Coerced::Empty,
        Value::String(s) => match parse_number(s) {
            Some(x) => Coerced::Value(AttributeValue::Number(x)),
            None => Coerced::Malformed,
        },
        Value::Array(_) | Value::Object(_) => Coerced::Malformed,
    }
}

fn coerce_categorical(raw: &Value) -> Coerced {
    match raw {
        Value::Null => Coerced::Empty,
        Value::String(s) if s.trim().is_empty() => Coerced::Empty,
        Value::String(s) => Coerced::Value(AttributeValue::Text(s.trim().to_string())),
        Value::Number(n) => Coerced::Value(AttributeValue::Text(n.to_string())),
        Value::Bool(b) => Coerced::Value(AttributeValue::Text(if *b { "True" } else { "False" }.to_string())),
        Value::Array(_) | Value::Object(_) => Coerced::Malformed,
    }
}

/// Lenient number parsing: trims, drops thousands separators
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|x| x.is_finite())
}

/// `3.0` -> "3", `2.5` -> "2.5"
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(coerce(FieldKind::Numeric, &json!(7.5)), Coerced::Value(AttributeValue::Number(7.5)));
        assert_eq!(coerce(FieldKind::Numeric, &json!(" 1,250 ")), Coerced::Value(AttributeValue::Number(1250.0)));
        assert_eq!(coerce(FieldKind::Numeric, &json!(true)), Coerced::Value(AttributeValue::Number(1.0)));
        assert_eq!(coerce(FieldKind::Numeric, &json!("")), Coerced::Empty);
        assert_eq!(coerce(FieldKind::Numeric, &json!(null)), Coerced::Empty);
        assert_eq!(coerce(FieldKind::Numeric, &json!("eight")), Coerced::Malformed);
        assert_eq!(coerce(FieldKind::Numeric, &json!([1, 2])), Coerced::Malformed);
    }

    #[test]
    fn test_categorical_coercion() {
        assert_eq!(
            coerce(FieldKind::Categorical, &json!("  Male ")),
            Coerced::Value(AttributeValue::Text("Male".into()))
        );
        assert_eq!(
            coerce(FieldKind::Categorical, &json!(3)),
            Coerced::Value(AttributeValue::Text("3".into()))
        );
        assert_eq!(coerce(FieldKind::Categorical, &json!("   ")), Coerced::Empty);
        assert_eq!(coerce(FieldKind::Categorical, &json!({"a": 1})), Coerced::Malformed);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(AttributeValue::default_for(FieldKind::Numeric), AttributeValue::Number(0.0));
        assert_eq!(
            AttributeValue::default_for(FieldKind::Categorical),
            AttributeValue::Text(UNKNOWN_CATEGORY.into())
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(AttributeValue::Number(4.0).to_category(), "4");
        assert_eq!(AttributeValue::Text("12".into()).as_f64(), Some(12.0));
    }
}
