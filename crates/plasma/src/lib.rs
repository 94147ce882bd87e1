#![deny(unsafe_code)]
//! Plasma fractal generator.
//!
//! Recursive midpoint displacement over tiles of a fixed size. Tile corners
//! come from an integer hash of their pixel position, so the fractal is a
//! pure function of seed, tile shape, and strength, and adjacent tiles meet
//! at shared corner values.

pub mod displacement;

pub use displacement::{lattice_hash, GridCell, PlasmaField, EDGE_DAMPING};

use heightfield_core::error::FieldError;
use heightfield_core::field::Field;
use heightfield_core::params::param;
use heightfield_core::Generator;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const DEFAULT_TILE_WIDTH: usize = 256;
const DEFAULT_TILE_HEIGHT: usize = 128;
const DEFAULT_STRENGTH: f64 = 1.0;
/// Largest accepted tile side.
pub const MAX_TILE_DIMENSION: usize = 1 << 16;
/// Largest accepted `tile_width / tile_height`. Every pixel receives this many
/// leaf writes, one per sub-row of the subdivision.
pub const MAX_TILE_RATIO: usize = 256;

/// Parameters for [`PlasmaGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlasmaParams {
    pub tile_width: usize,
    /// Must equal `tile_width / 2^n` for some `n >= 0`.
    pub tile_height: usize,
    /// Roughness. Values in [0, 1] keep displacements proportionate.
    pub strength: f64,
}

impl Default for PlasmaParams {
    fn default() -> Self {
        Self {
            tile_width: DEFAULT_TILE_WIDTH,
            tile_height: DEFAULT_TILE_HEIGHT,
            strength: DEFAULT_STRENGTH,
        }
    }
}

impl PlasmaParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let defaults = Self::default();
        Self {
            tile_width: param(params, "tile_width", defaults.tile_width),
            tile_height: param(params, "tile_height", defaults.tile_height),
            strength: param(params, "strength", defaults.strength),
        }
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(FieldError::InvalidConfiguration(format!(
                "tile dimensions must be positive, got {}x{}",
                self.tile_width, self.tile_height
            )));
        }
        if self.tile_width > MAX_TILE_DIMENSION || self.tile_height > MAX_TILE_DIMENSION {
            return Err(FieldError::InvalidConfiguration(format!(
                "tile dimensions must not exceed {MAX_TILE_DIMENSION}, got {}x{}",
                self.tile_width, self.tile_height
            )));
        }
        let ratio = self.tile_width / self.tile_height;
        if self.tile_width % self.tile_height != 0 || !ratio.is_power_of_two() {
            return Err(FieldError::InvalidConfiguration(format!(
                "tile width must be tile height times a power of two, got {}x{}",
                self.tile_width, self.tile_height
            )));
        }
        if ratio > MAX_TILE_RATIO {
            return Err(FieldError::InvalidConfiguration(format!(
                "tile width may be at most {MAX_TILE_RATIO} times its height, got {}x{}",
                self.tile_width, self.tile_height
            )));
        }
        if !self.strength.is_finite() {
            return Err(FieldError::InvalidConfiguration(format!(
                "strength must be finite, got {}",
                self.strength
            )));
        }
        Ok(())
    }
}

/// Fills a field with plasma tiles laid out from the origin.
pub struct PlasmaGenerator {
    plasma: PlasmaField,
    field: Field,
    params: PlasmaParams,
}

impl PlasmaGenerator {
    /// Creates a generator with a zeroed output field.
    ///
    /// The hash works on 32-bit integers, so only the low 32 bits of `seed`
    /// are used.
    pub fn new(
        width: usize,
        height: usize,
        seed: i64,
        params: PlasmaParams,
    ) -> Result<Self, FieldError> {
        params.validate()?;
        let field = Field::new(width, height)?;
        let plasma = PlasmaField::new(
            seed as i32,
            params.tile_width,
            params.tile_height,
            params.strength,
        );
        Ok(Self {
            plasma,
            field,
            params,
        })
    }

    pub fn from_json(
        width: usize,
        height: usize,
        seed: i64,
        json_params: &Value,
    ) -> Result<Self, FieldError> {
        Self::new(width, height, seed, PlasmaParams::from_json(json_params))
    }

    pub fn plasma(&self) -> &PlasmaField {
        &self.plasma
    }
}

impl Generator for PlasmaGenerator {
    fn generate(&mut self) -> Result<(), FieldError> {
        tracing::debug!(
            width = self.field.width(),
            height = self.field.height(),
            seed = self.plasma.seed(),
            tile_width = self.params.tile_width,
            tile_height = self.params.tile_height,
            strength = self.params.strength,
            "generating plasma field"
        );
        self.field.data_mut().fill(0.0);
        let tiles = self.plasma.fill(&mut self.field);
        tracing::debug!(tiles, "plasma field complete");
        Ok(())
    }

    fn field(&self) -> &Field {
        &self.field
    }

    fn params(&self) -> Value {
        json!({
            "tile_width": self.params.tile_width,
            "tile_height": self.params.tile_height,
            "strength": self.params.strength,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "tile_width": {
                "type": "integer",
                "default": DEFAULT_TILE_WIDTH,
                "min": 1,
                "max": MAX_TILE_DIMENSION,
                "description": "Tile width in pixels"
            },
            "tile_height": {
                "type": "integer",
                "default": DEFAULT_TILE_HEIGHT,
                "min": 1,
                "max": MAX_TILE_DIMENSION,
                "description": "Tile height in pixels; tile_width / 2^n with n <= 8"
            },
            "strength": {
                "type": "number",
                "default": DEFAULT_STRENGTH,
                "min": 0.0,
                "max": 1.0,
                "description": "Displacement roughness"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> PlasmaParams {
        PlasmaParams {
            tile_width: 16,
            tile_height: 8,
            strength: 0.9,
        }
    }

    #[test]
    fn default_params_validate() {
        assert!(PlasmaParams::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_tile_shapes() {
        let bad = [(0, 8), (8, 0), (12, 8), (24, 8), (4, 8)];
        for (tile_width, tile_height) in bad {
            let params = PlasmaParams {
                tile_width,
                tile_height,
                strength: 1.0,
            };
            assert!(
                matches!(params.validate(), Err(FieldError::InvalidConfiguration(_))),
                "{tile_width}x{tile_height} should be rejected"
            );
        }
        for (tile_width, tile_height) in [(8, 8), (16, 4), (1024, 128), (1, 1)] {
            let params = PlasmaParams {
                tile_width,
                tile_height,
                strength: 1.0,
            };
            assert!(params.validate().is_ok());
        }
    }

    #[test]
    fn validate_rejects_non_finite_strength() {
        let params = PlasmaParams {
            strength: f64::NAN,
            ..PlasmaParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn from_json_reads_and_defaults() {
        let params = PlasmaParams::from_json(&json!({"tile_width": 64, "strength": 0.25}));
        assert_eq!(params.tile_width, 64);
        assert_eq!(params.tile_height, DEFAULT_TILE_HEIGHT);
        assert_eq!(params.strength, 0.25);
        assert_eq!(PlasmaParams::from_json(&json!({})), PlasmaParams::default());
    }

    #[test]
    fn new_rejects_invalid_params_and_dimensions() {
        let bad = PlasmaParams {
            tile_width: 6,
            ..small_params()
        };
        assert!(PlasmaGenerator::new(8, 8, 1, bad).is_err());
        assert!(matches!(
            PlasmaGenerator::new(0, 8, 1, small_params()),
            Err(FieldError::InvalidDimensions)
        ));
    }

    #[test]
    fn generate_fills_every_cell_in_unit_range() {
        let mut gen = PlasmaGenerator::new(40, 20, 2024, small_params()).unwrap();
        gen.generate().unwrap();
        let stats = gen.field().stats();
        assert!(stats.min >= 0.0 && stats.max <= 1.0);
        assert!(stats.max > stats.min);
    }

    #[test]
    fn generate_is_deterministic_and_idempotent() {
        let mut a = PlasmaGenerator::new(33, 17, 7, small_params()).unwrap();
        let mut b = PlasmaGenerator::new(33, 17, 7, small_params()).unwrap();
        a.generate().unwrap();
        b.generate().unwrap();
        assert_eq!(a.field(), b.field());
        let first = a.field().clone();
        a.generate().unwrap();
        assert_eq!(a.field(), &first);
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = PlasmaGenerator::new(16, 8, 1, small_params()).unwrap();
        let mut b = PlasmaGenerator::new(16, 8, 2, small_params()).unwrap();
        a.generate().unwrap();
        b.generate().unwrap();
        assert_ne!(a.field(), b.field());
    }

    #[test]
    fn validate_bounds_tile_size_and_aspect() {
        let too_wide = PlasmaParams {
            tile_width: 1 << 14,
            tile_height: 1,
            strength: 1.0,
        };
        assert!(matches!(
            too_wide.validate(),
            Err(FieldError::InvalidConfiguration(_))
        ));
        let too_big = PlasmaParams {
            tile_width: MAX_TILE_DIMENSION * 2,
            tile_height: MAX_TILE_DIMENSION * 2,
            strength: 1.0,
        };
        assert!(too_big.validate().is_err());
        let widest = PlasmaParams {
            tile_width: MAX_TILE_RATIO * 2,
            tile_height: 2,
            strength: 1.0,
        };
        assert!(widest.validate().is_ok());
    }

    #[test]
    fn largest_tile_on_tiny_field_generates() {
        let params = PlasmaParams {
            tile_width: MAX_TILE_DIMENSION,
            tile_height: MAX_TILE_DIMENSION / MAX_TILE_RATIO,
            strength: 1.0,
        };
        let mut gen = PlasmaGenerator::new(1, 1, 7, params).unwrap();
        gen.generate().unwrap();
        let v = gen.field().get(0, 0).unwrap();
        assert!((0.0..=1.0).contains(&v));
    }

    #[test]
    fn seed_is_truncated_to_32_bits() {
        let gen = PlasmaGenerator::new(4, 4, (1_i64 << 32) + 5, small_params()).unwrap();
        assert_eq!(gen.plasma().seed(), 5);
    }

    #[test]
    fn params_reflect_configuration() {
        let gen = PlasmaGenerator::new(8, 8, 0, small_params()).unwrap();
        let params = gen.params();
        assert_eq!(params["tile_width"], 16);
        assert_eq!(params["tile_height"], 8);
        assert_eq!(params["strength"], 0.9);
        let schema = gen.param_schema();
        for key in ["tile_width", "tile_height", "strength"] {
            assert!(schema.get(key).is_some(), "schema missing {key}");
        }
    }

    #[test]
    fn params_round_trip_through_generator() {
        let gen = PlasmaGenerator::new(8, 8, 3, small_params()).unwrap();
        assert_eq!(PlasmaParams::from_json(&gen.params()), small_params());
    }
}
