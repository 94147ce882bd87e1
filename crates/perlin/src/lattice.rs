//! Lattice helpers shared by the gradient noise evaluators.

/// Floor via integer truncation, stepping down for negative non-integers.
///
/// Inputs beyond the `i32` range saturate, so very distant coordinates all
/// collapse onto the same lattice cell.
#[inline]
pub fn fast_floor(d: f64) -> f64 {
    let i = d as i32;
    if d < 0.0 && d != f64::from(i) {
        f64::from(i.wrapping_sub(1))
    } else {
        f64::from(i)
    }
}

/// Lattice index of an already-floored coordinate, wrapped to `0..=255`.
#[inline]
pub fn cell(floored: f64) -> i32 {
    (floored as i32) & 0xFF
}

/// Quintic smoothing `t³(6t² - 15t + 10)`.
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}
