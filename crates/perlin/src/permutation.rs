//! Seeded 512-entry permutation table shared by the 2D and 3D noise evaluators.
//!
//! Entries `[0, 256)` are a permutation of `0..=255` and entries `[256, 512)`
//! repeat them, so lattice lookups like `perm[perm[x] + y]` never need to wrap.

use heightfield_core::{FieldError, Xorshift64};
use serde::{Deserialize, Serialize};

/// Number of distinct lattice hash values.
pub const PERIOD: usize = 256;

/// How the identity table is shuffled during construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShuffleMode {
    /// Swap each `i` with `|next_i32() % 256|`. Biased, but reproduces
    /// existing fields bit for bit.
    #[default]
    Legacy,
    /// Unbiased Fisher-Yates shuffle.
    Uniform,
}

impl ShuffleMode {
    /// Parses `"legacy"` or `"uniform"`.
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        match name {
            "legacy" => Ok(ShuffleMode::Legacy),
            "uniform" => Ok(ShuffleMode::Uniform),
            other => Err(FieldError::InvalidConfiguration(format!(
                "unknown shuffle mode '{other}' (expected legacy or uniform)"
            ))),
        }
    }

    /// The name accepted by [`from_name`](Self::from_name).
    pub fn name(self) -> &'static str {
        match self {
            ShuffleMode::Legacy => "legacy",
            ShuffleMode::Uniform => "uniform",
        }
    }
}

/// Doubled permutation of `0..=255`, built once per seed and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationTable {
    entries: [u8; 2 * PERIOD],
}

impl PermutationTable {
    /// Builds the legacy-compatible table for `seed`.
    pub fn new(seed: i64) -> Self {
        Self::with_mode(seed, ShuffleMode::Legacy)
    }

    /// Builds a table for `seed` using the given shuffle.
    pub fn with_mode(seed: i64, mode: ShuffleMode) -> Self {
        let mut rng = Xorshift64::new(seed);
        let mut base: [u8; PERIOD] = std::array::from_fn(|i| i as u8);

        match mode {
            ShuffleMode::Legacy => {
                for i in 0..PERIOD {
                    let j = rng.next_i32_in(PERIOD as i32).unsigned_abs() as usize;
                    base.swap(i, j);
                }
            }
            ShuffleMode::Uniform => {
                for i in (1..PERIOD).rev() {
                    let j = (rng.next_i64() as u64 % (i as u64 + 1)) as usize;
                    base.swap(i, j);
                }
            }
        }

        let mut entries = [0u8; 2 * PERIOD];
        entries[..PERIOD].copy_from_slice(&base);
        entries[PERIOD..].copy_from_slice(&base);
        tracing::trace!(seed, mode = mode.name(), "built permutation table");
        Self { entries }
    }

    /// Entry at `index`, which must be below 512.
    #[inline]
    pub fn get(&self, index: usize) -> usize {
        self.entries[index] as usize
    }

    /// All 512 entries.
    pub fn entries(&self) -> &[u8; 2 * PERIOD] {
        &self.entries
    }

    /// 8-bit hash of a 2D lattice point: `perm[perm[u & 255] + (v & 255)]`.
    #[inline]
    pub fn hash8(&self, u: i32, v: i32) -> usize {
        self.get(self.get((u & 0xFF) as usize) + (v & 0xFF) as usize)
    }
}
