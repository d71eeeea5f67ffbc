//! Errors raised by the line-age pipeline.
//!
//! Degenerate inputs (no lines, all lines sharing one date) are defined
//! branches, not errors. What fails is malformed input that would otherwise
//! have to be clamped silently.

use codeage_term::ColorError;

/// Errors that can occur while mapping coefficients to colors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AgingError {
    #[error("coefficient for line {line} is outside [0, 1]: {value}")]
    CoefficientOutOfRange { line: usize, value: f32 },

    #[error("invalid background color: {0}")]
    Color(#[from] ColorError),
}
