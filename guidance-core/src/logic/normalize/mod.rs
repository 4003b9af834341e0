//! Normalize Module - Loose client input to canonical attributes
//!
//! Accepts clean (`Number_of_backlogs`) or raw (`Number of backlogs`) keys in
//! any letter case. Never fails: anything unresolved takes its default and is
//! reported in `missing()` / `malformed()`.

pub mod value;
pub mod resolve;

#[cfg(test)]
mod tests;

pub use value::AttributeValue;
pub use resolve::{normalize, ResolvedAttributes};
