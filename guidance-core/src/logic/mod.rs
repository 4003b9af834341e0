//! Logic Module - Inference Pipeline
//!
//! - `schema/` - Schema variants, field specs, column layout
//! - `normalize/` - Loose client input -> canonical attributes
//! - `features/` - Canonical attributes -> transformer row (with derived columns)
//! - `model/` - Column transformer, tree ensemble, label index, artifacts
//! - `explain/` - TreeSHAP attribution + feature names
//! - `labeling/` - Training-time label heuristics
//! - `prediction/` - Service context and response assembly

pub mod schema;
pub mod normalize;
pub mod features;
pub mod model;
pub mod explain;
pub mod labeling;
pub mod prediction;
