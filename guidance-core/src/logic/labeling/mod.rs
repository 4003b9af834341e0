//! Labeling Module - Rule tables that produce the training targets
//!
//! Used by training tooling to label rows and by tests to check that a
//! fitted model agrees with the rules on representative students.

pub mod career;
pub mod performance;

pub use career::{recommend_career, CareerScores};
pub use performance::performance_category;

use crate::logic::normalize::ResolvedAttributes;
use crate::logic::schema::SchemaVariant;

/// Heuristic label for the attributes' variant
pub fn heuristic_label(resolved: &ResolvedAttributes) -> &'static str {
    match resolved.variant() {
        SchemaVariant::Btech => recommend_career(resolved),
        SchemaVariant::Math => performance_category(resolved),
    }
}
