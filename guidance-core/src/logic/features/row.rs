//! Feature Row - Single-row input for the column transformer
//!
//! Built fresh per request, never persisted. Always carries exactly the
//! transformer's columns in the transformer's order; anything the attributes
//! could not supply is injected with a default.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::derived::derive_columns;
use crate::constants::UNKNOWN_CATEGORY;
use crate::logic::normalize::value::{format_number, parse_number};
use crate::logic::normalize::{AttributeValue, ResolvedAttributes};
use crate::logic::schema::FieldKind;

// ============================================================================
// CELLS
// ============================================================================

/// One cell of the row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Category(String),
}

impl Cell {
    fn default_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Numeric => Cell::Number(0.0),
            FieldKind::Categorical => Cell::Category(UNKNOWN_CATEGORY.to_string()),
        }
    }

    /// Coerce to the kind the transformer expects for this column
    fn into_kind(self, kind: FieldKind) -> Self {
        match (self, kind) {
            (Cell::Number(n), FieldKind::Numeric) => Cell::Number(n),
            (Cell::Category(s), FieldKind::Numeric) => Cell::Number(parse_number(&s).unwrap_or(0.0)),
            (Cell::Number(n), FieldKind::Categorical) => Cell::Category(format_number(n)),
            (Cell::Category(s), FieldKind::Categorical) => Cell::Category(s),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            Cell::Number(_) => None,
            Cell::Category(s) => Some(s),
        }
    }
}

impl From<&AttributeValue> for Cell {
    fn from(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Number(n) => Cell::Number(*n),
            AttributeValue::Text(s) => Cell::Category(s.clone()),
        }
    }
}

/// A column the transformer was fitted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedColumn<'a> {
    pub name: &'a str,
    pub kind: FieldKind,
}

// ============================================================================
// FEATURE ROW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    columns: Vec<String>,
    cells: Vec<Cell>,
    /// Columns the attributes did not provide at all
    injected: Vec<String>,
}

impl FeatureRow {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.cells[i])
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Cell::as_number)
    }

    pub fn category(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(Cell::as_category)
    }

    pub fn injected(&self) -> &[String] {
        &self.injected
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.columns.iter().map(String::as_str).zip(self.cells.iter())
    }

    /// JSON object for debug logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "columns": self.columns.len(),
            "injected": self.injected,
            "values": self.iter()
                .map(|(name, cell)| (name.to_string(), serde_json::to_value(cell).unwrap_or_default()))
                .collect::<serde_json::Map<_, _>>(),
        })
    }
}

/// Lay the attributes (plus derived columns) out as the transformer expects.
pub fn build_row(resolved: &ResolvedAttributes, expected: &[ExpectedColumn<'_>]) -> FeatureRow {
    let mut available: HashMap<&str, Cell> = resolved
        .iter()
        .map(|(spec, value)| (spec.raw, Cell::from(value)))
        .collect();

    for (name, value) in derive_columns(resolved) {
        available.insert(name, Cell::Number(value));
    }

    let mut columns = Vec::with_capacity(expected.len());
    let mut cells = Vec::with_capacity(expected.len());
    let mut injected = Vec::new();

    for column in expected {
        let cell = match available.remove(column.name) {
            Some(cell) => cell.into_kind(column.kind),
            None => {
                injected.push(column.name.to_string());
                Cell::default_for(column.kind)
            }
        };
        columns.push(column.name.to_string());
        cells.push(cell);
    }

    if !injected.is_empty() {
        log::debug!("Injected defaults for {} transformer column(s): {:?}", injected.len(), injected);
    }

    FeatureRow { columns, cells, injected }
}
