//! Performance bands (Math)

use crate::logic::features::derived::GRADE_FIELDS;
use crate::logic::normalize::ResolvedAttributes;

/// Best to worst
const BANDS: [&str; 4] = ["Excellent", "Good", "Average", "At Risk"];

/// Band index of a mean grade on the 0-20 scale
fn band(mean: f64) -> usize {
    if mean >= 16.0 {
        0
    } else if mean >= 12.0 {
        1
    } else if mean >= 10.0 {
        2
    } else {
        3
    }
}

/// Performance category for one Math student
///
/// Mean over the grades actually supplied (none supplied counts as 0).
/// Two or more past failures drop one band, never below At Risk.
pub fn performance_category(resolved: &ResolvedAttributes) -> &'static str {
    let grades: Vec<f64> = GRADE_FIELDS
        .iter()
        .filter(|f| resolved.was_supplied(f))
        .map(|f| resolved.number(f))
        .collect();
    let mean = if grades.is_empty() { 0.0 } else { grades.iter().sum::<f64>() / grades.len() as f64 };

    let mut idx = band(mean);
    if resolved.number("past_failures") >= 2.0 {
        idx = (idx + 1).min(BANDS.len() - 1);
    }
    BANDS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::normalize::normalize;
    use crate::logic::schema::SchemaVariant;
    use serde_json::{json, Value};

    fn category(input: Value) -> &'static str {
        performance_category(&normalize(SchemaVariant::Math, input.as_object().unwrap()))
    }

    #[test]
    fn test_bands() {
        assert_eq!(category(json!({ "G1": 17, "G2": 16, "G3": 18 })), "Excellent");
        assert_eq!(category(json!({ "G1": 12, "G2": 12 })), "Good");
        assert_eq!(category(json!({ "G1": 10 })), "Average");
        assert_eq!(category(json!({ "G1": 9, "G2": 10 })), "At Risk");
    }

    #[test]
    fn test_failures_drop_one_band() {
        assert_eq!(category(json!({ "G1": 17, "G2": 17, "failures": 2 })), "Good");
        assert_eq!(category(json!({ "G1": 17, "G2": 17, "failures": 1 })), "Excellent");
        assert_eq!(category(json!({ "G1": 5, "failures": 3 })), "At Risk");
    }

    #[test]
    fn test_no_grades() {
        assert_eq!(category(json!({ "age": 17 })), "At Risk");
    }
}
