//! Schema Variants
//!
//! Each field has a canonical (API) name and the raw column name the model was
//! trained on. The two variants come from different datasets and share no
//! fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// FIELD SPEC
// ============================================================================

/// Value kind of a field, decides coercion and default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Numeric,
    Categorical,
}

/// One declared input field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Clean API name (underscore style)
    pub canonical: &'static str,
    /// Column name in the training data
    pub raw: &'static str,
    /// Extra accepted spellings, matched with the raw name
    pub aliases: &'static [&'static str],
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn numeric(canonical: &'static str, raw: &'static str) -> Self {
        Self { canonical, raw, aliases: &[], kind: FieldKind::Numeric }
    }

    const fn categorical(canonical: &'static str, raw: &'static str) -> Self {
        Self { canonical, raw, aliases: &[], kind: FieldKind::Categorical }
    }

    const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == FieldKind::Numeric
    }
}

// ============================================================================
// FIELD TABLES
// ============================================================================

/// B.Tech career dataset
const BTECH_FIELDS: &[FieldSpec] = &[
    FieldSpec::categorical("Gender", "Gender"),
    FieldSpec::numeric("Age", "Age"),
    FieldSpec::numeric("CGPA", "CGPA"),
    FieldSpec::numeric("Matriculation_Percentage", "Matriculation Percentage"),
    FieldSpec::numeric("Intermediate_Percentage", "Intermediate Percentage"),
    FieldSpec::numeric("Data_Structures_And_Algorithm_Marks", "Data Structures And Algorithm Marks"),
    FieldSpec::numeric("DBMS_Marks", "DBMS Marks"),
    FieldSpec::numeric("Number_of_backlogs", "Number of backlogs"),
    FieldSpec::numeric("Number_of_Reappears", "Number of Reappears"),
    // The web form posts the plural spelling
    FieldSpec::categorical("History_of_Reappear_Backlogs", "History of Reappear/Backlogs")
        .with_aliases(&["History_of_Reappears_Backlogs"]),
    FieldSpec::categorical("Programming_proficiency", "Programming proficiency"),
    FieldSpec::numeric("GitHub_total_repositories", "GitHub total repositories"),
    FieldSpec::numeric("GitHub_commits_per_month", "GitHub commits/month"),
    FieldSpec::categorical("Experience_with_frameworks", "Experience with frameworks"),
    FieldSpec::categorical("English_proficiency", "English proficiency"),
    FieldSpec::numeric("Coding_practice_hours_per_week", "Coding practice hours/week"),
    FieldSpec::numeric("Aptitude_score", "Aptitude score"),
    FieldSpec::numeric("Attandance", "Attandance"),
];

/// Math performance dataset (short dataset codes as raw names)
const MATH_FIELDS: &[FieldSpec] = &[
    FieldSpec::categorical("sex", "sex"),
    FieldSpec::numeric("age", "age"),
    FieldSpec::categorical("address", "address"),
    FieldSpec::numeric("mother_education", "Medu"),
    FieldSpec::numeric("father_education", "Fedu"),
    FieldSpec::numeric("study_time", "studytime"),
    FieldSpec::numeric("past_failures", "failures"),
    FieldSpec::categorical("school_support", "schoolsup"),
    FieldSpec::categorical("family_support", "famsup"),
    FieldSpec::categorical("paid_classes", "paid"),
    FieldSpec::categorical("higher_education", "higher"),
    FieldSpec::categorical("internet_access", "internet"),
    FieldSpec::numeric("free_time", "freetime"),
    FieldSpec::numeric("going_out", "goout"),
    FieldSpec::numeric("health", "health"),
    FieldSpec::numeric("absences", "absences"),
    FieldSpec::numeric("first_period_grade", "G1"),
    FieldSpec::numeric("second_period_grade", "G2"),
    FieldSpec::numeric("third_period_grade", "G3"),
];

/// Derived numeric columns appended after the raw Math columns
const MATH_DERIVED: &[&str] = &[
    "grade_trend",
    "grade_mean",
    "study_failure_load",
    "grade_consistency",
];

// ============================================================================
// SCHEMA VARIANT
// ============================================================================

/// Dataset variant the service is configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    /// Career path recommendation for B.Tech students
    Btech,
    /// Performance category from Math course records
    Math,
}

impl SchemaVariant {
    pub fn name(&self) -> &'static str {
        match self {
            SchemaVariant::Btech => "btech",
            SchemaVariant::Math => "math",
        }
    }

    /// Declared input fields, in training column order
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            SchemaVariant::Btech => BTECH_FIELDS,
            SchemaVariant::Math => MATH_FIELDS,
        }
    }

    /// Names of columns computed from other fields
    pub fn derived_columns(&self) -> &'static [&'static str] {
        match self {
            SchemaVariant::Btech => &[],
            SchemaVariant::Math => MATH_DERIVED,
        }
    }

    /// Lookup by canonical name
    pub fn field(&self, canonical: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.canonical == canonical)
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value '{0}'")]
pub struct ParseVariantError(pub String);

impl FromStr for SchemaVariant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "btech" | "b.tech" | "career" => Ok(SchemaVariant::Btech),
            "math" | "math_performance" | "performance" => Ok(SchemaVariant::Math),
            other => Err(ParseVariantError(other.to_string())),
        }
    }
}

// ============================================================================
// INPUT POLICY
// ============================================================================

/// What to do with missing or malformed fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPolicy {
    /// Substitute defaults silently (historical behavior)
    #[default]
    Lenient,
    /// Reject requests that miss or mangle a declared field
    Strict,
}

impl fmt::Display for InputPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputPolicy::Lenient => "lenient",
            InputPolicy::Strict => "strict",
        })
    }
}

impl FromStr for InputPolicy {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(InputPolicy::Lenient),
            "strict" => Ok(InputPolicy::Strict),
            other => Err(ParseVariantError(other.to_string())),
        }
    }
}
