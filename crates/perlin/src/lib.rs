#![deny(unsafe_code)]
//! Gradient noise field generator.
//!
//! Builds a seeded [`PermutationTable`], samples improved 3D gradient noise
//! (or the bit-hashed 2D variant) and sums octaves with fractal Brownian
//! motion. [`PerlinGenerator`] fills a [`Field`] by sampling fBm at every cell
//! and remapping the result from [-1, 1] into [0, 1].

pub mod fbm;
pub mod lattice;
pub mod noise;
pub mod noise2d;
pub mod noise3d;
pub mod permutation;

pub use fbm::{spectral_weights, NoiseConfiguration, SpectralWeights};
pub use noise::NoiseGenerator;
pub use permutation::{PermutationTable, ShuffleMode};

use heightfield_core::error::FieldError;
use heightfield_core::field::Field;
use heightfield_core::params::param;
use heightfield_core::Generator;
use serde_json::{json, Value};

/// Default number of octaves for field generation.
const DEFAULT_FIELD_OCTAVES: i32 = 3;
/// Default coordinate scale from cell index to noise space.
const DEFAULT_SCALE: f64 = 0.005;
/// Default fixed coordinate of the sampled plane in 3D mode.
const DEFAULT_PLANE: f64 = 0.0;
/// Default noise dimensionality.
const DEFAULT_DIMENSIONS: usize = 3;

/// Parameters for [`PerlinGenerator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerlinParams {
    /// fBm octave count, lacunarity, and persistence.
    pub noise: NoiseConfiguration,
    /// Multiplier from cell index to noise coordinate.
    pub scale: f64,
    /// 3D mode samples the plane `y = plane`, with cell (x, y) mapped to noise (x, z).
    pub plane: f64,
    /// 2 for `fbm2d`, 3 for `fbm3d`.
    pub dimensions: usize,
    pub shuffle: ShuffleMode,
}

impl Default for PerlinParams {
    fn default() -> Self {
        Self {
            noise: NoiseConfiguration::default().with_octaves(DEFAULT_FIELD_OCTAVES),
            scale: DEFAULT_SCALE,
            plane: DEFAULT_PLANE,
            dimensions: DEFAULT_DIMENSIONS,
            shuffle: ShuffleMode::Legacy,
        }
    }
}

impl PerlinParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// Fails only for an unrecognised `shuffle` name.
    pub fn from_json(params: &Value) -> Result<Self, FieldError> {
        let defaults = Self::default();
        Ok(Self {
            noise: NoiseConfiguration::new(
                param(params, "octaves", defaults.noise.octaves),
                param(params, "lacunarity", defaults.noise.lacunarity),
                param(params, "persistence", defaults.noise.persistence),
            ),
            scale: param(params, "scale", defaults.scale),
            plane: param(params, "plane", defaults.plane),
            dimensions: param(params, "dimensions", defaults.dimensions),
            shuffle: ShuffleMode::from_name(&param(
                params,
                "shuffle",
                defaults.shuffle.name().to_owned(),
            ))?,
        })
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        self.noise.validate()?;
        if !self.scale.is_finite() {
            return Err(FieldError::InvalidConfiguration(format!(
                "scale must be finite, got {}",
                self.scale
            )));
        }
        if !self.plane.is_finite() {
            return Err(FieldError::InvalidConfiguration(format!(
                "plane must be finite, got {}",
                self.plane
            )));
        }
        if !matches!(self.dimensions, 2 | 3) {
            return Err(FieldError::InvalidConfiguration(format!(
                "dimensions must be 2 or 3, got {}",
                self.dimensions
            )));
        }
        Ok(())
    }
}

/// Fills a field with `clip((fbm + 1) / 2)` sampled at every cell.
pub struct PerlinGenerator {
    noise: NoiseGenerator,
    field: Field,
    params: PerlinParams,
}

impl PerlinGenerator {
    /// Creates a generator with a zeroed output field.
    ///
    /// Returns `FieldError::InvalidDimensions` for zero dimensions and
    /// `FieldError::InvalidConfiguration` if `params` fail validation.
    pub fn new(
        width: usize,
        height: usize,
        seed: i64,
        params: PerlinParams,
    ) -> Result<Self, FieldError> {
        params.validate()?;
        let field = Field::new(width, height)?;
        let noise = NoiseGenerator::with_shuffle(seed, params.shuffle).with_config(params.noise);
        Ok(Self {
            noise,
            field,
            params,
        })
    }

    /// Creates a generator from a JSON params object.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: i64,
        json_params: &Value,
    ) -> Result<Self, FieldError> {
        Self::new(width, height, seed, PerlinParams::from_json(json_params)?)
    }

    /// The underlying noise sampler.
    pub fn noise(&self) -> &NoiseGenerator {
        &self.noise
    }

    /// Raw fBm value for cell `(x, y)`, before remapping into [0, 1].
    pub fn sample(&self, x: usize, y: usize) -> f64 {
        let sx = x as f64 * self.params.scale;
        let sy = y as f64 * self.params.scale;
        match self.params.dimensions {
            2 => self.noise.fbm2d(sx, sy),
            _ => self.noise.fbm3d(sx, self.params.plane, sy),
        }
    }
}

impl Generator for PerlinGenerator {
    fn generate(&mut self) -> Result<(), FieldError> {
        let w = self.field.width();
        let h = self.field.height();
        tracing::debug!(
            width = w,
            height = h,
            seed = self.noise.seed(),
            octaves = self.params.noise.octaves,
            dimensions = self.params.dimensions,
            "generating perlin field"
        );

        let mut data = vec![0.0_f64; w * h];
        for y in 0..h {
            for x in 0..w {
                data[y * w + x] = ((self.sample(x, y) + 1.0) / 2.0).clamp(0.0, 1.0);
            }
        }
        self.field.data_mut().copy_from_slice(&data);
        Ok(())
    }

    fn field(&self) -> &Field {
        &self.field
    }

    fn params(&self) -> Value {
        json!({
            "octaves": self.params.noise.octaves,
            "lacunarity": self.params.noise.lacunarity,
            "persistence": self.params.noise.persistence,
            "scale": self.params.scale,
            "plane": self.params.plane,
            "dimensions": self.params.dimensions,
            "shuffle": self.params.shuffle.name(),
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "octaves": {
                "type": "integer",
                "default": DEFAULT_FIELD_OCTAVES,
                "min": 1,
                "max": 16,
                "description": "Number of noise octaves summed per sample"
            },
            "lacunarity": {
                "type": "number",
                "default": fbm::DEFAULT_LACUNARITY,
                "min": 1.0,
                "max": 4.0,
                "description": "Frequency multiplier applied after each octave"
            },
            "persistence": {
                "type": "number",
                "default": fbm::DEFAULT_PERSISTENCE,
                "min": 0.0,
                "max": 2.0,
                "description": "Amplitude falloff exponent: weight[i] = lacunarity^(-persistence * i)"
            },
            "scale": {
                "type": "number",
                "default": DEFAULT_SCALE,
                "min": 0.0,
                "max": 1.0,
                "description": "Noise-space distance between adjacent cells"
            },
            "plane": {
                "type": "number",
                "default": DEFAULT_PLANE,
                "description": "Fixed middle coordinate of the sampled plane (3D only)"
            },
            "dimensions": {
                "type": "integer",
                "default": DEFAULT_DIMENSIONS,
                "enum": [2, 3],
                "description": "Sample fbm2d or fbm3d"
            },
            "shuffle": {
                "type": "string",
                "default": "legacy",
                "enum": ["legacy", "uniform"],
                "description": "Permutation shuffle: legacy (bit-compatible) or uniform"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perlin(width: usize, height: usize, seed: i64) -> PerlinGenerator {
        PerlinGenerator::new(width, height, seed, PerlinParams::default()).unwrap()
    }

    // ---- Construction ----

    #[test]
    fn new_creates_field_with_correct_dimensions() {
        let gen = perlin(64, 32, 42);
        assert_eq!(gen.field().width(), 64);
        assert_eq!(gen.field().height(), 32);
    }

    #[test]
    fn new_with_zero_dimensions_returns_error() {
        assert!(PerlinGenerator::new(0, 10, 42, PerlinParams::default()).is_err());
        assert!(PerlinGenerator::new(10, 0, 42, PerlinParams::default()).is_err());
    }

    #[test]
    fn new_rejects_invalid_configuration() {
        let params = PerlinParams {
            noise: NoiseConfiguration::default().with_octaves(0),
            ..PerlinParams::default()
        };
        assert!(matches!(
            PerlinGenerator::new(8, 8, 1, params),
            Err(FieldError::InvalidConfiguration(_))
        ));
        let params = PerlinParams {
            dimensions: 4,
            ..PerlinParams::default()
        };
        assert!(PerlinGenerator::new(8, 8, 1, params).is_err());
    }

    #[test]
    fn from_json_uses_defaults_for_empty_json() {
        let gen = PerlinGenerator::from_json(16, 16, 42, &json!({})).unwrap();
        let p = gen.params();
        assert_eq!(p["octaves"], DEFAULT_FIELD_OCTAVES);
        assert_eq!(p["shuffle"], "legacy");
        assert_eq!(p["dimensions"], 3);
    }

    #[test]
    fn from_json_extracts_custom_values() {
        let params = json!({
            "octaves": 6,
            "lacunarity": 2.0,
            "persistence": 0.5,
            "scale": 0.05,
            "plane": 1.5,
            "dimensions": 2,
            "shuffle": "uniform",
        });
        let gen = PerlinGenerator::from_json(16, 16, 42, &params).unwrap();
        assert_eq!(gen.noise().config(), NoiseConfiguration::new(6, 2.0, 0.5));
        let p = gen.params();
        assert_eq!(p["scale"], 0.05);
        assert_eq!(p["plane"], 1.5);
        assert_eq!(p["dimensions"], 2);
        assert_eq!(p["shuffle"], "uniform");
    }

    #[test]
    fn from_json_rejects_unknown_shuffle() {
        let result = PerlinGenerator::from_json(8, 8, 1, &json!({"shuffle": "sorted"}));
        assert!(matches!(result, Err(FieldError::InvalidConfiguration(_))));
    }

    #[test]
    fn param_schema_covers_every_param() {
        let gen = perlin(8, 8, 1);
        let schema = gen.param_schema();
        for key in gen.params().as_object().unwrap().keys() {
            assert!(schema.get(key).is_some(), "schema missing {key}");
        }
    }

    // ---- Generation ----

    #[test]
    fn generate_fills_unit_range() {
        let mut gen = PerlinGenerator::from_json(48, 48, 7, &json!({"scale": 0.11})).unwrap();
        gen.generate().unwrap();
        assert!(gen.field().data().iter().all(|v| (0.0..=1.0).contains(v)));
        let stats = gen.field().stats();
        assert!(stats.max > stats.min, "field should not be flat");
    }

    #[test]
    fn origin_cell_maps_to_midpoint() {
        // fbm3d(0, 0, 0) is 0 for any seed, remapped to 0.5.
        let mut gen = perlin(4, 4, 42);
        gen.generate().unwrap();
        assert_eq!(gen.field().get(0, 0), Some(0.5));
    }

    #[test]
    fn cells_match_direct_fbm_samples() {
        let mut gen = PerlinGenerator::from_json(8, 8, 3, &json!({"scale": 0.3})).unwrap();
        gen.generate().unwrap();
        let noise = gen.noise();
        let expected = ((noise.fbm3d(5.0 * 0.3, 0.0, 2.0 * 0.3) + 1.0) / 2.0).clamp(0.0, 1.0);
        assert_eq!(gen.field().get(5, 2), Some(expected));
    }

    #[test]
    fn two_dimensional_mode_uses_fbm2d() {
        let mut gen =
            PerlinGenerator::from_json(8, 8, 3, &json!({"scale": 0.3, "dimensions": 2})).unwrap();
        gen.generate().unwrap();
        let expected = ((gen.noise().fbm2d(3.0 * 0.3, 4.0 * 0.3) + 1.0) / 2.0).clamp(0.0, 1.0);
        assert_eq!(gen.field().get(3, 4), Some(expected));
    }

    #[test]
    fn determinism_same_seed() {
        let mut a = PerlinGenerator::from_json(32, 32, 99, &json!({"scale": 0.07})).unwrap();
        let mut b = PerlinGenerator::from_json(32, 32, 99, &json!({"scale": 0.07})).unwrap();
        a.generate().unwrap();
        b.generate().unwrap();
        assert!(a
            .field()
            .data()
            .iter()
            .zip(b.field().data().iter())
            .all(|(va, vb)| va.to_bits() == vb.to_bits()));
    }

    #[test]
    fn different_seeds_produce_different_fields() {
        let mut a = PerlinGenerator::from_json(32, 32, 1, &json!({"scale": 0.07})).unwrap();
        let mut b = PerlinGenerator::from_json(32, 32, 2, &json!({"scale": 0.07})).unwrap();
        a.generate().unwrap();
        b.generate().unwrap();
        assert_ne!(a.field().data(), b.field().data());
    }
}
