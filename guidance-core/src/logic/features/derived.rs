//! Derived Columns
//!
//! Deterministic functions of the resolved attributes. Only the Math variant
//! has any; names and order match `SchemaVariant::derived_columns()`.

use crate::logic::normalize::ResolvedAttributes;
use crate::logic::schema::SchemaVariant;

/// Grades that feed the consistency column
pub(crate) const GRADE_FIELDS: [&str; 3] = ["first_period_grade", "second_period_grade", "third_period_grade"];

/// Compute the derived columns of the attributes' variant
pub fn derive_columns(resolved: &ResolvedAttributes) -> Vec<(&'static str, f64)> {
    match resolved.variant() {
        SchemaVariant::Btech => Vec::new(),
        SchemaVariant::Math => math_columns(resolved),
    }
}

fn math_columns(resolved: &ResolvedAttributes) -> Vec<(&'static str, f64)> {
    let g1 = resolved.number("first_period_grade");
    let g2 = resolved.number("second_period_grade");

    // Dispersion only over grades the client actually sent
    let supplied: Vec<f64> = GRADE_FIELDS
        .iter()
        .filter(|f| resolved.was_supplied(f))
        .map(|f| resolved.number(f))
        .collect();

    vec![
        ("grade_trend", g2 - g1),
        ("grade_mean", (g1 + g2) / 2.0),
        ("study_failure_load", resolved.number("study_time") * resolved.number("past_failures")),
        ("grade_consistency", sample_std_dev(&supplied).unwrap_or(0.0)),
    ]
}

/// Sample standard deviation (n - 1); undefined below two samples
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_std_dev() {
        assert_eq!(sample_std_dev(&[]), None);
        assert_eq!(sample_std_dev(&[12.0]), None);
        assert_eq!(sample_std_dev(&[10.0, 10.0]), Some(0.0));

        let sd = sample_std_dev(&[10.0, 12.0, 14.0]).unwrap();
        assert!((sd - 2.0).abs() < 1e-12);
    }
}
