//! Seeded gradient noise generator with per-instance fBm configuration.

use crate::fbm::{NoiseConfiguration, SpectralWeights};
use crate::noise2d::noise2d;
use crate::noise3d::noise3d;
use crate::permutation::{PermutationTable, ShuffleMode};

/// Gradient noise sampler owning its permutation table and fBm settings.
///
/// Setters recompute the spectral weights immediately, so every sampling
/// method takes `&self` and the generator can be shared read-only.
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    seed: i64,
    table: PermutationTable,
    config: NoiseConfiguration,
    weights: SpectralWeights,
}

impl NoiseGenerator {
    /// Builds a generator with the legacy-compatible permutation and default configuration.
    pub fn new(seed: i64) -> Self {
        Self::with_shuffle(seed, ShuffleMode::Legacy)
    }

    pub fn with_shuffle(seed: i64, mode: ShuffleMode) -> Self {
        let config = NoiseConfiguration::default();
        Self {
            seed,
            table: PermutationTable::with_mode(seed, mode),
            weights: SpectralWeights::new(&config),
            config,
        }
    }

    /// Replaces the fBm configuration (builder style).
    pub fn with_config(mut self, config: NoiseConfiguration) -> Self {
        self.set_config(config);
        self
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn table(&self) -> &PermutationTable {
        &self.table
    }

    pub fn config(&self) -> NoiseConfiguration {
        self.config
    }

    /// Weights used by [`fbm2d`](Self::fbm2d) and [`fbm3d`](Self::fbm3d).
    pub fn weights(&self) -> &SpectralWeights {
        &self.weights
    }

    pub fn set_config(&mut self, config: NoiseConfiguration) {
        self.config = config;
        self.weights = SpectralWeights::new(&config);
    }

    pub fn set_octaves(&mut self, octaves: i32) {
        self.set_config(self.config.with_octaves(octaves));
    }

    pub fn set_lacunarity(&mut self, lacunarity: f64) {
        self.set_config(NoiseConfiguration {
            lacunarity,
            ..self.config
        });
    }

    pub fn set_persistence(&mut self, persistence: f64) {
        self.set_config(NoiseConfiguration {
            persistence,
            ..self.config
        });
    }

    pub fn noise2d(&self, x: f64, y: f64) -> f64 {
        noise2d(&self.table, x, y)
    }

    pub fn noise3d(&self, x: f64, y: f64, z: f64) -> f64 {
        noise3d(&self.table, x, y, z)
    }

    /// fBm over 2D noise with the stored configuration.
    pub fn fbm2d(&self, x: f64, y: f64) -> f64 {
        self.fbm2d_weighted(x, y, &self.weights)
    }

    /// fBm over 2D noise with explicit hyperparameters and the stored octave count.
    ///
    /// Stored settings are left untouched.
    pub fn fbm2d_with(&self, x: f64, y: f64, lacunarity: f64, persistence: f64) -> f64 {
        let weights = self.explicit_weights(lacunarity, persistence);
        self.fbm2d_weighted(x, y, &weights)
    }

    /// fBm over 2D noise with caller-supplied weights.
    pub fn fbm2d_weighted(&self, x: f64, y: f64, weights: &SpectralWeights) -> f64 {
        weights.sum2(x, y, |x, y| self.noise2d(x, y))
    }

    /// fBm over 3D noise with the stored configuration.
    pub fn fbm3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.fbm3d_weighted(x, y, z, &self.weights)
    }

    /// fBm over 3D noise with explicit hyperparameters and the stored octave count.
    ///
    /// Stored settings are left untouched.
    pub fn fbm3d_with(&self, x: f64, y: f64, z: f64, lacunarity: f64, persistence: f64) -> f64 {
        let weights = self.explicit_weights(lacunarity, persistence);
        self.fbm3d_weighted(x, y, z, &weights)
    }

    /// fBm over 3D noise with caller-supplied weights.
    pub fn fbm3d_weighted(&self, x: f64, y: f64, z: f64, weights: &SpectralWeights) -> f64 {
        weights.sum3(x, y, z, |x, y, z| self.noise3d(x, y, z))
    }

    fn explicit_weights(&self, lacunarity: f64, persistence: f64) -> SpectralWeights {
        SpectralWeights::new(&NoiseConfiguration {
            lacunarity,
            persistence,
            ..self.config
        })
    }
}
