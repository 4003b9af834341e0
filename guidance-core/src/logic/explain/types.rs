use serde::{Deserialize, Serialize};

/// One ranked attribution: transformed feature and its signed contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub feature: String,
    pub impact: f64,
}

impl Explanation {
    pub fn new(feature: impl Into<String>, impact: f64) -> Self {
        Self { feature: feature.into(), impact }
    }

    /// Zero-impact diagnostic entry
    pub fn placeholder(message: impl Into<String>) -> Self {
        Self::new(message, 0.0)
    }
}
