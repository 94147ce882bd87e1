//! Deterministic PRNG based on Marsaglia's xorshift family.
//!
//! Uses the (21, 35, 4) shift triple over a single 64-bit word. Same seed
//! always produces the same sequence on every platform. The generator feeds
//! permutation-table construction, so its exact output is part of the
//! reproducibility contract of every noise field built from it.

use serde::{Deserialize, Serialize};

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Seed 0 is kept as-is: it is a fixed point of xorshift and yields an
/// all-zero stream, which downstream table construction tolerates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Creates a new PRNG from a signed 64-bit seed.
    pub fn new(seed: i64) -> Self {
        Self { state: seed as u64 }
    }

    /// Advances the state and returns it as a signed 64-bit value.
    ///
    /// `state ^= state << 21; state ^= state >> 35 (logical); state ^= state << 4`.
    pub fn next_i64(&mut self) -> i64 {
        self.state ^= self.state << 21;
        self.state ^= self.state >> 35;
        self.state ^= self.state << 4;
        self.state as i64
    }

    /// Returns the low 32 bits of the next state.
    pub fn next_i32(&mut self) -> i32 {
        self.next_i64() as i32
    }

    /// Returns `next_i32() % range`.
    ///
    /// The remainder keeps the sign of the drawn value, so results lie in
    /// `(-range, range)`; callers fold negatives themselves.
    ///
    /// # Panics
    ///
    /// Panics if `range` is 0.
    pub fn next_i32_in(&mut self, range: i32) -> i32 {
        self.next_i32().wrapping_rem(range)
    }

    /// Returns the raw state divided by `2^63 - 1`, approximately uniform in (-1, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.next_i64() as f64 / (i64::MAX as f64 - 1.0)
    }

    /// Single-precision variant of [`next_f64`](Self::next_f64), in [-1, 1].
    ///
    /// The `f32` draws round out the generator's API for callers that store
    /// single-precision samples; the noise and plasma crates use only the
    /// integer and `f64` draws.
    pub fn next_f32(&mut self) -> f32 {
        self.next_i64() as f32 / (i64::MAX as f32 - 1.0)
    }

    /// Returns a value in [0, 1] by remapping [`next_f32`](Self::next_f32).
    pub fn next_pos_f32(&mut self) -> f32 {
        0.5 * (self.next_f32() + 1.0)
    }

    /// Returns `true` when the next state is strictly positive as a signed value.
    pub fn next_bool(&mut self) -> bool {
        self.next_i64() > 0
    }

    /// Draws a standard-normal sample with the Marsaglia polar method.
    ///
    /// Pairs `(u1, u2)` are redrawn until `q = u1² + u2²` lies in (0, 1).
    /// There is no iteration bound, so a generator seeded with 0 never returns.
    pub fn next_standard_normal(&mut self) -> f64 {
        loop {
            let u1 = self.next_f64();
            let u2 = self.next_f64();
            let q = u1 * u1 + u2 * u2;
            if q > 0.0 && q < 1.0 {
                return u1 * ((-2.0 * q.ln()) / q).sqrt();
            }
        }
    }
}
