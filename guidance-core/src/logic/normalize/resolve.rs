//! Key resolution
//!
//! Matching order per field:
//! exact canonical → exact raw (then aliases) → case-insensitive raw (then
//! aliases) → case-insensitive canonical → default.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::value::{coerce, AttributeValue, Coerced};
use crate::logic::schema::{FieldSpec, SchemaVariant};

// ============================================================================
// RESOLVED ATTRIBUTES
// ============================================================================

/// Canonical attribute set: one value per declared field, in schema order
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAttributes {
    variant: SchemaVariant,
    values: Vec<(&'static FieldSpec, AttributeValue)>,
    missing: Vec<&'static str>,
    malformed: Vec<&'static str>,
}

impl ResolvedAttributes {
    pub fn variant(&self) -> SchemaVariant {
        self.variant
    }

    pub fn get(&self, canonical: &str) -> Option<&AttributeValue> {
        self.values
            .iter()
            .find(|(spec, _)| spec.canonical == canonical)
            .map(|(_, v)| v)
    }

    /// Numeric view of a field (0 when absent or non-numeric)
    pub fn number(&self, canonical: &str) -> f64 {
        self.get(canonical).and_then(AttributeValue::as_f64).unwrap_or(0.0)
    }

    /// Categorical view of a field ("" when absent)
    pub fn text(&self, canonical: &str) -> String {
        self.get(canonical).map(AttributeValue::to_category).unwrap_or_default()
    }

    /// True when the client supplied a usable value (no default substituted)
    pub fn was_supplied(&self, canonical: &str) -> bool {
        self.get(canonical).is_some()
            && !self.missing.iter().any(|f| *f == canonical)
            && !self.malformed.iter().any(|f| *f == canonical)
    }

    /// Fields absent from the input (or null/blank)
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }

    /// Fields present but unusable for their kind
    pub fn malformed(&self) -> &[&'static str] {
        &self.malformed
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.malformed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static FieldSpec, &AttributeValue)> {
        self.values.iter().map(|(spec, v)| (*spec, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Canonical-keyed JSON object, for logs
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .values
            .iter()
            .map(|(spec, v)| {
                let json = match v {
                    AttributeValue::Number(n) => serde_json::Number::from_f64(*n)
                        .map(Value::Number)
                        .unwrap_or(Value::Null),
                    AttributeValue::Text(s) => Value::String(s.clone()),
                };
                (spec.canonical.to_string(), json)
            })
            .collect();
        Value::Object(map)
    }
}

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Map arbitrary input keys onto the variant's canonical fields.
///
/// Unknown keys (e.g. `Name`) are ignored. Missing or unusable values take the
/// field default; this function never fails.
pub fn normalize(variant: SchemaVariant, input: &Map<String, Value>) -> ResolvedAttributes {
    // Last key wins when two keys only differ in case/whitespace
    let lowered: HashMap<String, &Value> = input
        .iter()
        .map(|(k, v)| (k.trim().to_lowercase(), v))
        .collect();

    let mut values = Vec::with_capacity(variant.fields().len());
    let mut missing = Vec::new();
    let mut malformed = Vec::new();

    for spec in variant.fields() {
        let value = match lookup(spec, input, &lowered).map(|raw| coerce(spec.kind, raw)) {
            Some(Coerced::Value(v)) => v,
            Some(Coerced::Malformed) => {
                malformed.push(spec.canonical);
                AttributeValue::default_for(spec.kind)
            }
            Some(Coerced::Empty) | None => {
                missing.push(spec.canonical);
                AttributeValue::default_for(spec.kind)
            }
        };
        values.push((spec, value));
    }

    ResolvedAttributes { variant, values, missing, malformed }
}

fn lookup<'a>(
    spec: &FieldSpec,
    input: &'a Map<String, Value>,
    lowered: &HashMap<String, &'a Value>,
) -> Option<&'a Value> {
    let folded = |name: &str| lowered.get(&name.to_lowercase()).copied();

    input
        .get(spec.canonical)
        .or_else(|| input.get(spec.raw))
        .or_else(|| spec.aliases.iter().find_map(|a| input.get(*a)))
        .or_else(|| folded(spec.raw))
        .or_else(|| spec.aliases.iter().find_map(|a| folded(*a)))
        .or_else(|| folded(spec.canonical))
}
