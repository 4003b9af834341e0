//! Features Module - Canonical attributes to the transformer's input row
//!
//! Column order always comes from the fitted transformer, never from the
//! request.

pub mod row;
pub mod derived;

#[cfg(test)]
mod tests;

pub use row::{build_row, Cell, ExpectedColumn, FeatureRow};
pub use derived::{derive_columns, sample_std_dev};
