//! Error types for spinner construction and configuration

use thiserror::Error;

/// Rejected configuration. Raised at construction time only; a built
/// spinner never fails at runtime.
#[derive(Error, Debug)]
pub enum SpinError {
    #[error("slice set is empty")]
    EmptySliceSet,
    #[error("need at least {min} entries, found {found}")]
    TooFewEntries { found: usize, min: usize },
    #[error("at most {max} entries allowed, found {found}")]
    TooManyEntries { found: usize, max: usize },
    #[error("invalid tuning: {field} = {value} ({reason})")]
    InvalidTuning {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("element bounds are degenerate ({width} x {height})")]
    DegenerateBounds { width: f64, height: f64 },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
