//! Schema Module - Field sets of the two dataset variants
//!
//! Both variants live behind one `SchemaVariant` enum; every other module asks
//! the variant for its fields instead of hard-coding column names.

pub mod variant;
pub mod layout;

pub use variant::{SchemaVariant, FieldSpec, FieldKind, InputPolicy, ParseVariantError};
pub use layout::{LayoutInfo, LayoutMismatchError, layout_hash, expected_columns, validate_layout};
