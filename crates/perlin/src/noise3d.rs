//! Improved 3D gradient noise over a [`PermutationTable`].

use crate::lattice::{cell, fade, fast_floor, lerp};
use crate::permutation::PermutationTable;

/// Dot product of the corner offset with one of 12 edge gradients (16 hash slots).
#[inline]
fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

/// Samples 3D gradient noise at `(x, y, z)`.
///
/// Returns roughly [-1, 1] (not strictly bounded) and exactly 0 at every
/// integer lattice point.
pub fn noise3d(perm: &PermutationTable, x: f64, y: f64, z: f64) -> f64 {
    let (fx, fy, fz) = (fast_floor(x), fast_floor(y), fast_floor(z));
    let (xi, yi, zi) = (cell(fx) as usize, cell(fy) as usize, cell(fz) as usize);

    let (x, y, z) = (x - fx, y - fy, z - fz);
    let (u, v, w) = (fade(x), fade(y), fade(z));

    let a = perm.get(xi) + yi;
    let aa = perm.get(a) + zi;
    let ab = perm.get(a + 1) + zi;
    let b = perm.get(xi + 1) + yi;
    let ba = perm.get(b) + zi;
    let bb = perm.get(b + 1) + zi;

    let near = lerp(
        v,
        lerp(
            u,
            grad(perm.get(aa), x, y, z),
            grad(perm.get(ba), x - 1.0, y, z),
        ),
        lerp(
            u,
            grad(perm.get(ab), x, y - 1.0, z),
            grad(perm.get(bb), x - 1.0, y - 1.0, z),
        ),
    );
    let far = lerp(
        v,
        lerp(
            u,
            grad(perm.get(aa + 1), x, y, z - 1.0),
            grad(perm.get(ba + 1), x - 1.0, y, z - 1.0),
        ),
        lerp(
            u,
            grad(perm.get(ab + 1), x, y - 1.0, z - 1.0),
            grad(perm.get(bb + 1), x - 1.0, y - 1.0, z - 1.0),
        ),
    );
    lerp(w, near, far)
}
