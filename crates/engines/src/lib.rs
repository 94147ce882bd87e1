#![deny(unsafe_code)]
//! Generator registry: maps generator names to implementations.
//!
//! This crate sits between `heightfield-core` (which defines the `Generator`
//! trait) and the individual generator crates (`heightfield-perlin`,
//! `heightfield-plasma`). The CLI depends on it to avoid duplicating
//! dispatch logic.

use heightfield_core::error::FieldError;
use heightfield_core::field::Field;
use heightfield_core::{Generator, Seed};
use heightfield_perlin::PerlinGenerator;
use heightfield_plasma::PlasmaGenerator;
use serde_json::Value;

/// All available generator names.
const GENERATOR_NAMES: &[&str] = &["perlin", "plasma"];

/// Enumeration of all available field generators.
///
/// Wraps each generator implementation and delegates `Generator` trait methods.
/// Use [`GeneratorKind::from_name`] for string-based construction.
pub enum GeneratorKind {
    /// fBm over seeded gradient noise.
    Perlin(PerlinGenerator),
    /// Tiled midpoint displacement.
    Plasma(PlasmaGenerator),
}

impl GeneratorKind {
    /// Constructs a generator by name.
    ///
    /// Returns `FieldError::UnknownGenerator` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: usize,
        height: usize,
        seed: i64,
        params: &Value,
    ) -> Result<Self, FieldError> {
        tracing::debug!(generator = name, width, height, seed, "building generator");
        match name {
            "perlin" => Ok(GeneratorKind::Perlin(PerlinGenerator::from_json(
                width, height, seed, params,
            )?)),
            "plasma" => Ok(GeneratorKind::Plasma(PlasmaGenerator::from_json(
                width, height, seed, params,
            )?)),
            _ => Err(FieldError::UnknownGenerator(name.to_string())),
        }
    }

    /// Rebuilds the generator a [`Seed`] describes.
    pub fn from_seed(seed: &Seed) -> Result<Self, FieldError> {
        seed.validate()?;
        Self::from_name(
            &seed.generator,
            seed.width,
            seed.height,
            seed.seed,
            &seed.params,
        )
    }

    /// Returns a slice of all recognized generator names.
    pub fn list_generators() -> &'static [&'static str] {
        GENERATOR_NAMES
    }

    pub fn name(&self) -> &'static str {
        match self {
            GeneratorKind::Perlin(_) => "perlin",
            GeneratorKind::Plasma(_) => "plasma",
        }
    }
}

impl Generator for GeneratorKind {
    fn generate(&mut self) -> Result<(), FieldError> {
        match self {
            GeneratorKind::Perlin(g) => g.generate(),
            GeneratorKind::Plasma(g) => g.generate(),
        }
    }

    fn field(&self) -> &Field {
        match self {
            GeneratorKind::Perlin(g) => g.field(),
            GeneratorKind::Plasma(g) => g.field(),
        }
    }

    fn params(&self) -> Value {
        match self {
            GeneratorKind::Perlin(g) => g.params(),
            GeneratorKind::Plasma(g) => g.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            GeneratorKind::Perlin(g) => g.param_schema(),
            GeneratorKind::Plasma(g) => g.param_schema(),
        }
    }
}
