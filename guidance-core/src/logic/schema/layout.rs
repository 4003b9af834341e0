//! Column Layout - What the transformer of a variant is trained on
//!
//! ## Rules:
//! 1. Add/remove/reorder a field or derived column → the layout hash changes
//! 2. Artifacts record the hash of the layout they were fitted against
//!
//! A mismatch is not fatal (the feature builder default-fills any column the
//! transformer wants), but it means the artifact and this build disagree on
//! the schema, so it is logged loudly at load time.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use super::variant::SchemaVariant;

// ============================================================================
// EXPECTED COLUMNS
// ============================================================================

/// Raw field columns followed by derived columns
pub fn expected_columns(variant: SchemaVariant) -> Vec<&'static str> {
    variant
        .fields()
        .iter()
        .map(|f| f.raw)
        .chain(variant.derived_columns().iter().copied())
        .collect()
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over the variant name and its column names in order
pub fn layout_hash(variant: SchemaVariant) -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(variant.name().as_bytes());
    hasher.update(&[0]);

    for column in expected_columns(variant) {
        hasher.update(column.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Layout summary for logging and the health endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub variant: SchemaVariant,
    pub hash: u32,
    pub column_count: usize,
    pub columns: Vec<String>,
}

impl LayoutInfo {
    pub fn for_variant(variant: SchemaVariant) -> Self {
        let columns: Vec<String> = expected_columns(variant).into_iter().map(String::from).collect();
        Self {
            variant,
            hash: layout_hash(variant),
            column_count: columns.len(),
            columns,
        }
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Artifact layout hash doesn't match this build
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("column layout mismatch for {variant}: expected hash {expected:08x}, artifact has {actual:08x}")]
pub struct LayoutMismatchError {
    pub variant: SchemaVariant,
    pub expected: u32,
    pub actual: u32,
}

pub fn validate_layout(variant: SchemaVariant, artifact_hash: u32) -> Result<(), LayoutMismatchError> {
    let expected = layout_hash(variant);
    if artifact_hash != expected {
        return Err(LayoutMismatchError { variant, expected, actual: artifact_hash });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_columns_order() {
        let cols = expected_columns(SchemaVariant::Math);
        assert_eq!(cols.len(), 23);
        assert_eq!(cols[0], "sex");
        assert_eq!(cols[18], "G3");
        assert_eq!(cols[19], "grade_trend");
        assert_eq!(cols[22], "grade_consistency");

        let cols = expected_columns(SchemaVariant::Btech);
        assert_eq!(cols.len(), 18);
        assert_eq!(cols[12], "GitHub commits/month");
    }

    #[test]
    fn test_layout_hash_stable_and_distinct() {
        assert_eq!(layout_hash(SchemaVariant::Btech), layout_hash(SchemaVariant::Btech));
        assert_ne!(layout_hash(SchemaVariant::Btech), layout_hash(SchemaVariant::Math));
    }

    #[test]
    fn test_validate_layout() {
        let hash = layout_hash(SchemaVariant::Math);
        assert!(validate_layout(SchemaVariant::Math, hash).is_ok());

        let err = validate_layout(SchemaVariant::Math, hash.wrapping_add(1)).unwrap_err();
        assert_eq!(err.expected, hash);
        assert!(err.to_string().contains("math"));
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::for_variant(SchemaVariant::Btech);
        assert_eq!(info.column_count, 18);
        assert_eq!(info.columns.len(), info.column_count);
        assert_eq!(info.hash, layout_hash(SchemaVariant::Btech));
    }
}
