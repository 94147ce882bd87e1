//! 2D gradient noise with bit-hashed pseudo-gradients.
//!
//! Gradients are not drawn from a direction table. Each lattice corner's
//! 8-bit hash is split into two overlapping 6-bit fields (bits 0..=5 and
//! 2..=7), each normalised to [0, 1] and remapped to [-1, 1]. Output differs
//! from a table-driven 2D Perlin noise and must stay that way.

use crate::lattice::{cell, fade, fast_floor, lerp};
use crate::permutation::PermutationTable;

const FIELD_MASK: usize = 0x3F;

/// Pseudo-gradient at lattice point `(u, v)`, components in [-1, 1].
#[inline]
fn gradient(perm: &PermutationTable, u: i32, v: i32) -> (f64, f64) {
    let h = perm.hash8(u, v);
    let hx = (h & FIELD_MASK) as f64 / FIELD_MASK as f64;
    let hy = ((h >> 2) & FIELD_MASK) as f64 / FIELD_MASK as f64;
    (2.0 * hx - 1.0, 2.0 * hy - 1.0)
}

/// Samples 2D gradient noise at `(x, y)`.
///
/// Each corner gradient is dotted with the offset from that corner, then the
/// four products are blended with faded x, then faded y. Returns roughly
/// [-1, 1] and exactly 0 at integer lattice points.
pub fn noise2d(perm: &PermutationTable, x: f64, y: f64) -> f64 {
    let (fx, fy) = (fast_floor(x), fast_floor(y));
    let (xi, yi) = (cell(fx), cell(fy));

    let (x, y) = (x - fx, y - fy);
    let (u, v) = (fade(x), fade(y));

    let g00 = gradient(perm, xi, yi);
    let g10 = gradient(perm, xi + 1, yi);
    let g01 = gradient(perm, xi, yi + 1);
    let g11 = gradient(perm, xi + 1, yi + 1);

    let w00 = g00.0 * x + g00.1 * y;
    let w10 = g10.0 * (x - 1.0) + g10.1 * y;
    let w01 = g01.0 * x + g01.1 * (y - 1.0);
    let w11 = g11.0 * (x - 1.0) + g11.1 * (y - 1.0);

    lerp(v, lerp(u, w00, w10), lerp(u, w01, w11))
}
