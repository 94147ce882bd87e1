//! Fractal Brownian motion: octave summation with geometric spectral weights.
//!
//! Weights are a pure function of a [`NoiseConfiguration`]. Callers that
//! sample many points with the same configuration build a [`SpectralWeights`]
//! once and reuse it; nothing on the sampling path mutates.

use heightfield_core::FieldError;
use serde::{Deserialize, Serialize};

/// Default per-octave frequency multiplier.
pub const DEFAULT_LACUNARITY: f64 = 2.1379201;
/// Default amplitude falloff exponent.
pub const DEFAULT_PERSISTENCE: f64 = 0.836281;
/// Default octave count, shared by the 2D and 3D samplers.
pub const DEFAULT_OCTAVES: i32 = 1;

/// fBm hyperparameters.
///
/// The default configuration sums a single octave for both `fbm2d` and
/// `fbm3d`, so a fresh [`NoiseGenerator`](crate::NoiseGenerator) returns plain
/// noise from either until [`with_octaves`](Self::with_octaves) or a setter
/// raises the count. Older 3D noise tools commonly defaulted to nine octaves;
/// pass `with_octaves(9)` to reproduce their output.
///
/// `octaves <= 0` is representable and yields an empty sum (always 0.0);
/// use [`validate`](Self::validate) to reject it up front.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfiguration {
    /// Number of noise evaluations summed per sample.
    pub octaves: i32,
    /// Frequency multiplier applied to coordinates after each octave.
    pub lacunarity: f64,
    /// Exponent of the amplitude falloff `lacunarity^(-persistence * i)`.
    pub persistence: f64,
}

impl Default for NoiseConfiguration {
    fn default() -> Self {
        Self {
            octaves: DEFAULT_OCTAVES,
            lacunarity: DEFAULT_LACUNARITY,
            persistence: DEFAULT_PERSISTENCE,
        }
    }
}

impl NoiseConfiguration {
    pub fn new(octaves: i32, lacunarity: f64, persistence: f64) -> Self {
        Self {
            octaves,
            lacunarity,
            persistence,
        }
    }

    /// Returns a copy with `octaves` replaced.
    pub fn with_octaves(self, octaves: i32) -> Self {
        Self { octaves, ..self }
    }

    /// Rejects non-positive octave counts, non-positive or non-finite
    /// lacunarity, and non-finite persistence.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.octaves <= 0 {
            return Err(FieldError::InvalidConfiguration(format!(
                "octaves must be positive, got {}",
                self.octaves
            )));
        }
        if !(self.lacunarity.is_finite() && self.lacunarity > 0.0) {
            return Err(FieldError::InvalidConfiguration(format!(
                "lacunarity must be a positive finite number, got {}",
                self.lacunarity
            )));
        }
        if !self.persistence.is_finite() {
            return Err(FieldError::InvalidConfiguration(format!(
                "persistence must be finite, got {}",
                self.persistence
            )));
        }
        Ok(())
    }
}

/// Computes `weights[i] = lacunarity^(-persistence * i)` for each octave.
pub fn spectral_weights(config: &NoiseConfiguration) -> Vec<f64> {
    (0..config.octaves.max(0))
        .map(|i| config.lacunarity.powf(-config.persistence * f64::from(i)))
        .collect()
}

/// Precomputed octave weights together with the lacunarity that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralWeights {
    lacunarity: f64,
    weights: Vec<f64>,
}

impl SpectralWeights {
    pub fn new(config: &NoiseConfiguration) -> Self {
        Self {
            lacunarity: config.lacunarity,
            weights: spectral_weights(config),
        }
    }

    pub fn lacunarity(&self) -> f64 {
        self.lacunarity
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of octaves summed per sample.
    pub fn octaves(&self) -> usize {
        self.weights.len()
    }

    /// Sums `noise(x, y) * weight[i]`, scaling both coordinates by the
    /// lacunarity after each octave.
    pub fn sum2(&self, mut x: f64, mut y: f64, noise: impl Fn(f64, f64) -> f64) -> f64 {
        let mut result = 0.0;
        for &weight in &self.weights {
            result += noise(x, y) * weight;
            x *= self.lacunarity;
            y *= self.lacunarity;
        }
        result
    }

    /// Three-dimensional counterpart of [`sum2`](Self::sum2).
    pub fn sum3(
        &self,
        mut x: f64,
        mut y: f64,
        mut z: f64,
        noise: impl Fn(f64, f64, f64) -> f64,
    ) -> f64 {
        let mut result = 0.0;
        for &weight in &self.weights {
            result += noise(x, y, z) * weight;
            x *= self.lacunarity;
            y *= self.lacunarity;
            z *= self.lacunarity;
        }
        result
    }
}
