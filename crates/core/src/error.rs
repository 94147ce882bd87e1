//! Error types for the heightfield core.

use thiserror::Error;

/// Errors produced by field construction, generator setup, and field access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// Width or height was zero (or their product overflowed) when creating a Field.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// An (x, y) coordinate was outside the field bounds.
    #[error("index ({x}, {y}) out of bounds for field of size ({width}, {height})")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A data buffer did not match the requested field dimensions.
    #[error("dimension mismatch: ({lhs_w}, {lhs_h}) vs ({rhs_w}, {rhs_h})")]
    DimensionMismatch {
        lhs_w: usize,
        lhs_h: usize,
        rhs_w: usize,
        rhs_h: usize,
    },

    /// Generator hyperparameters were rejected by `validate()`.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A generator name was not found in the registry.
    #[error("unknown generator: {0}")]
    UnknownGenerator(String),
}
