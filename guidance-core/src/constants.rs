//! Central Configuration Constants
//!
//! Single source of truth for defaults shared by the library and the server.

/// Number of attributions returned when the caller does not ask for a count
pub const DEFAULT_TOP_K: usize = 7;

/// Upper bound accepted for a caller-supplied `top_k`
pub const MAX_TOP_K: usize = 50;

/// Sentinel category for absent or unusable categorical input
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Separator between column and category in one-hot feature names
pub const ONE_HOT_SEPARATOR: &str = "__";

/// Placeholder feature when the explainer cannot evaluate a row
pub const SHAP_UNAVAILABLE: &str = "SHAP_unavailable";

/// Artifact format understood by this build
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Default artifact locations (relative to the working directory)
pub const DEFAULT_MODEL_PATH: &str = "models/model.json";
pub const DEFAULT_EXPLAINER_PATH: &str = "models/explainer.json";
pub const DEFAULT_LABELS_PATH: &str = "models/labels.json";
