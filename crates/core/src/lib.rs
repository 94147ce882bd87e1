#![deny(unsafe_code)]
//! Core types and traits for the heightfield procedural texture system.
//!
//! Provides the `Generator` trait, the bounded `Field` scalar grid,
//! `FieldError`, the `Xorshift64` PRNG, the `Seed` reproducibility record,
//! and JSON parameter helpers.

pub mod error;
pub mod field;
pub mod generator;
pub mod params;
pub mod prng;
pub mod seed;

pub use error::FieldError;
pub use field::{Field, FieldStats};
pub use generator::Generator;
pub use prng::Xorshift64;
pub use seed::Seed;
