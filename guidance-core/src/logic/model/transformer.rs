//! Column Transformer - standard scaling + one-hot expansion
//!
//! Output layout: every numeric column (in stored order), then one indicator
//! block per categorical column with one slot per training-time category.
//! Unknown categories produce an all-zero block.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::ModelError;
use crate::logic::features::{ExpectedColumn, FeatureRow};
use crate::logic::schema::FieldKind;

/// Standard-scaled numeric column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumericColumn {
    pub column: String,
    pub mean: f64,
    pub scale: f64,
}

impl NumericColumn {
    pub fn apply(&self, value: f64) -> f64 {
        // A constant training column has scale 0, treated as 1
        let scale = if self.scale == 0.0 { 1.0 } else { self.scale };
        (value - self.mean) / scale
    }
}

/// One-hot encoded categorical column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoricalColumn {
    pub column: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ColumnTransformer {
    #[serde(default)]
    pub numeric: Vec<NumericColumn>,
    #[serde(default)]
    pub categorical: Vec<CategoricalColumn>,
}

impl ColumnTransformer {
    /// Columns the transformer consumes, in the order it reads them
    pub fn input_columns(&self) -> Vec<ExpectedColumn<'_>> {
        let numeric = self.numeric.iter().map(|c| ExpectedColumn {
            name: c.column.as_str(),
            kind: FieldKind::Numeric,
        });
        let categorical = self.categorical.iter().map(|c| ExpectedColumn {
            name: c.column.as_str(),
            kind: FieldKind::Categorical,
        });
        numeric.chain(categorical).collect()
    }

    /// Width of the transformed row
    pub fn output_width(&self) -> usize {
        self.numeric.len() + self.categorical.iter().map(|c| c.categories.len()).sum::<usize>()
    }

    pub fn transform(&self, row: &FeatureRow) -> Result<Array1<f64>, ModelError> {
        let mut out = Vec::with_capacity(self.output_width());

        for col in &self.numeric {
            let value = row
                .number(&col.column)
                .ok_or_else(|| ModelError::MissingColumn(col.column.clone()))?;
            out.push(col.apply(value));
        }

        for col in &self.categorical {
            let value = row
                .category(&col.column)
                .ok_or_else(|| ModelError::MissingColumn(col.column.clone()))?;
            out.extend(col.categories.iter().map(|c| if c == value { 1.0 } else { 0.0 }));
        }

        Ok(Array1::from_vec(out))
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = std::collections::HashSet::new();
        for name in self.input_columns().iter().map(|c| c.name) {
            if !seen.insert(name) {
                return Err(ModelError::Invalid(format!("duplicate transformer column '{}'", name)));
            }
        }
        if let Some(col) = self.numeric.iter().find(|c| !c.mean.is_finite() || !c.scale.is_finite()) {
            return Err(ModelError::Invalid(format!("non-finite scaling for '{}'", col.column)));
        }
        if self.output_width() == 0 {
            return Err(ModelError::Invalid("transformer has no columns".to_string()));
        }
        Ok(())
    }
}
