//! Student Guidance Core
//!
//! Request pipeline for the guidance service:
//!
//! ```text
//! attributes ──► normalize ──► feature row ──► transformer ──► classifier
//!                                                   │              │
//!                                                   ▼              ▼
//!                                              tree explainer   probabilities
//!                                                   └──────┬───────┘
//!                                                          ▼
//!                                                  PredictionResult
//! ```
//!
//! Fitting is done offline; this crate only loads the fitted artifacts and
//! evaluates them.

pub mod constants;
pub mod logic;

pub use logic::prediction::{PredictionService, PredictError, ArtifactPaths};
pub use logic::prediction::{Explanation, PredictionResult};
pub use logic::schema::{SchemaVariant, InputPolicy};
