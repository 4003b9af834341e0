//! Configuration module

use std::env;
use std::path::PathBuf;

use guidance_core::constants::{
    DEFAULT_EXPLAINER_PATH, DEFAULT_LABELS_PATH, DEFAULT_MODEL_PATH, DEFAULT_TOP_K, MAX_TOP_K,
};
use guidance_core::{ArtifactPaths, InputPolicy, SchemaVariant};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {var}")]
    Invalid { var: &'static str, value: String },
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::parse(env::var("LOG_FORMAT").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Artifact files
    pub model_path: PathBuf,
    pub explainer_path: PathBuf,
    pub labels_path: PathBuf,

    /// Which field set the loaded model serves
    pub variant: SchemaVariant,

    pub input_policy: InputPolicy,

    /// Attributions returned when the request has no `top_k`
    pub default_top_k: usize,

    /// Environment (development, production)
    pub environment: String,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let variant = match var("SCHEMA_VARIANT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { var: "SCHEMA_VARIANT", value })?,
            None => SchemaVariant::Btech,
        };

        let input_policy = match var("INPUT_POLICY") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { var: "INPUT_POLICY", value })?,
            None => InputPolicy::default(),
        };

        Ok(Self {
            port: var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            model_path: var("MODEL_PATH")
                .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())
                .into(),

            explainer_path: var("EXPLAINER_PATH")
                .unwrap_or_else(|| DEFAULT_EXPLAINER_PATH.to_string())
                .into(),

            labels_path: var("LABELS_PATH")
                .unwrap_or_else(|| DEFAULT_LABELS_PATH.to_string())
                .into(),

            variant,
            input_policy,

            default_top_k: var("DEFAULT_TOP_K")
                .and_then(|k| k.parse::<usize>().ok())
                .unwrap_or(DEFAULT_TOP_K)
                .clamp(1, MAX_TOP_K),

            environment: var("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string()),

            log_format: LogFormat::parse(var("LOG_FORMAT").as_deref()),
        })
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.model_path.clone(),
            explainer: self.explainer_path.clone(),
            labels: self.labels_path.clone(),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
