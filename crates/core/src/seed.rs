//! Reproducible description of a generated field.
//!
//! A [`Seed`] captures everything needed to recreate a field:
//! generator name, field dimensions, parameters, and PRNG seed.

use crate::error::FieldError;
use serde::{Deserialize, Serialize};

/// Reproducible description of a generated field.
///
/// Two identical `Seed` values fed to the same generator produce
/// bit-identical fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub generator: String,
    pub width: usize,
    pub height: usize,
    pub params: serde_json::Value,
    pub seed: i64,
}

impl Seed {
    /// Creates a new Seed with default params (`{}`).
    pub fn new(generator: &str, width: usize, height: usize, seed: i64) -> Self {
        Self {
            generator: generator.to_string(),
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
        }
    }

    /// Replaces the parameter object (builder style).
    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = params;
        self
    }

    /// Validates that the seed has non-zero dimensions and that
    /// `width * height` does not overflow.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.width == 0 || self.height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(FieldError::InvalidDimensions)?;
        Ok(())
    }
}
