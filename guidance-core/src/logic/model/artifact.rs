//! Artifact files: presence checks and JSON loading
//!
//! The three artifacts (model, explainer, labels) must all exist before the
//! service starts. Missing or unreadable files are fatal at load time.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Model,
    Explainer,
    Labels,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArtifactKind::Model => "model",
            ArtifactKind::Explainer => "explainer",
            ArtifactKind::Labels => "label index",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("{kind} artifact not found at {}. Run the training pipeline first.", .path.display())]
    NotFound { kind: ArtifactKind, path: PathBuf },

    #[error("failed to read {kind} artifact {}: {source}", .path.display())]
    Io {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {kind} artifact {}: {source}", .path.display())]
    Parse {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} artifact has format version {found}, expected {expected}")]
    Version { kind: ArtifactKind, found: u32, expected: u32 },

    #[error("invalid {kind} artifact: {source}")]
    Invalid {
        kind: ArtifactKind,
        #[source]
        source: ModelError,
    },

    #[error("artifacts do not belong together: {0}")]
    Mismatch(String),
}

/// Fail fast when an artifact file is absent
pub fn ensure_present(kind: ArtifactKind, path: &Path) -> Result<(), ArtifactError> {
    if !path.is_file() {
        return Err(ArtifactError::NotFound { kind, path: path.to_path_buf() });
    }
    Ok(())
}

/// Read and deserialize one JSON artifact
pub fn read_json<T: DeserializeOwned>(kind: ArtifactKind, path: &Path) -> Result<T, ArtifactError> {
    ensure_present(kind, path)?;

    let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
        kind,
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

pub fn check_version(kind: ArtifactKind, found: u32) -> Result<(), ArtifactError> {
    let expected = crate::constants::ARTIFACT_FORMAT_VERSION;
    if found != expected {
        return Err(ArtifactError::Version { kind, found, expected });
    }
    Ok(())
}
