//! Calibration error taxonomy
//!
//! All failures are deterministic and fatal to the calling computation;
//! per-point variants carry the frequency index so a bad standard
//! measurement can be traced back to its sweep position.

use thiserror::Error;

/// Errors produced by the calibration core
#[derive(Error, Debug, PartialEq)]
pub enum CalError {
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    #[error("singular calibration system at frequency index {index}: standards are degenerate or duplicated")]
    SingularSystem { index: usize },

    #[error("degenerate error network at frequency index {index}: division by zero in embed/de-embed")]
    DegenerateNetwork { index: usize },

    #[error("calibration kit is missing the {0} standard")]
    MissingStandard(&'static str),

    #[error("frequency grid mismatch: grid has {expected} points, array has {got}")]
    GridMismatch { expected: usize, got: usize },

    #[error("unknown network {0:?}")]
    UnknownNetwork(String),
}
