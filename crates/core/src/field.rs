//! Two-dimensional bounded scalar field with values clamped to [0, 1].
//!
//! A `Field` stores `width * height` f64 values using row-major layout.
//! Unlike a wrapping grid, coordinates outside the field are rejected
//! (`set`) or silently dropped (`set_if_in_bounds`), which is what tiled
//! generators need when a tile overhangs the field edge.

use crate::error::FieldError;

/// Summary statistics over every cell of a [`Field`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// A dense 2D scalar field with values clamped to [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

/// Returns `width * height`, or `InvalidDimensions` for zero or overflowing sizes.
fn checked_len(width: usize, height: usize) -> Result<usize, FieldError> {
    if width == 0 || height == 0 {
        return Err(FieldError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .ok_or(FieldError::InvalidDimensions)
}

impl Field {
    /// Creates a zero-filled field of the given dimensions.
    ///
    /// Returns `FieldError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, FieldError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0.0; len],
        })
    }

    /// Creates a field filled with `value`, clamped to [0, 1].
    pub fn filled(width: usize, height: usize, value: f64) -> Result<Self, FieldError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value.clamp(0.0, 1.0); len],
        })
    }

    /// Creates a field from a pre-built row-major data vector, validating that
    /// `data.len() == width * height`.
    ///
    /// Values are **not** clamped; the caller is responsible for ensuring
    /// they lie in [0, 1].
    pub fn from_data(width: usize, height: usize, data: Vec<f64>) -> Result<Self, FieldError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(FieldError::DimensionMismatch {
                lhs_w: width,
                lhs_h: height,
                rhs_w: data.len(),
                rhs_h: 1,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Field width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable access to the underlying row-major data.
    ///
    /// Values written here bypass the [0, 1] clamping.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Gets the value at `(x, y)`, or `None` outside the field.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Sets the value at `(x, y)`, clamped to [0, 1].
    ///
    /// Returns `FieldError::OutOfBounds` if the coordinate lies outside the field.
    pub fn set(&mut self, x: usize, y: usize, value: f64) -> Result<(), FieldError> {
        let idx = self.index(x, y).ok_or(FieldError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        self.data[idx] = value.clamp(0.0, 1.0);
        Ok(())
    }

    /// Sets the value at signed `(x, y)` if it lies inside the field, clamped
    /// to [0, 1]. Writes outside the field are dropped.
    ///
    /// Returns whether the write landed.
    pub fn set_if_in_bounds(&mut self, x: isize, y: isize, value: f64) -> bool {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return false;
        };
        match self.index(x, y) {
            Some(idx) => {
                self.data[idx] = value.clamp(0.0, 1.0);
                true
            }
            None => false,
        }
    }

    /// Iterates over all cells yielding `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data.iter().enumerate().map(|(i, &v)| {
            let x = i % self.width;
            let y = i / self.width;
            (x, y, v)
        })
    }

    /// Minimum, maximum, and mean over all cells.
    pub fn stats(&self) -> FieldStats {
        let (min, max, sum) = self.data.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &v| (min.min(v), max.max(v), sum + v),
        );
        FieldStats {
            min,
            max,
            mean: sum / self.data.len() as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Constructor tests --

    #[test]
    fn new_creates_zero_filled_field() {
        let field = Field::new(4, 3).unwrap();
        assert_eq!(field.width(), 4);
        assert_eq!(field.height(), 3);
        assert_eq!(field.data().len(), 12);
        assert!(field.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn new_with_zero_dimension_returns_error() {
        assert!(matches!(
            Field::new(0, 5),
            Err(FieldError::InvalidDimensions)
        ));
        assert!(matches!(
            Field::new(5, 0),
            Err(FieldError::InvalidDimensions)
        ));
    }

    #[test]
    fn new_with_overflow_dimensions_returns_error() {
        assert!(Field::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn filled_clamps_value() {
        let high = Field::filled(2, 2, 1.5).unwrap();
        assert!(high.data().iter().all(|&v| v == 1.0));
        let low = Field::filled(2, 2, -0.3).unwrap();
        assert!(low.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn from_data_rejects_wrong_length() {
        let result = Field::from_data(2, 2, vec![0.1, 0.2, 0.3]);
        assert!(matches!(result, Err(FieldError::DimensionMismatch { .. })));
    }

    #[test]
    fn from_data_keeps_row_major_layout() {
        let field = Field::from_data(3, 2, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap();
        assert_eq!(field.get(0, 0), Some(0.1));
        assert_eq!(field.get(2, 0), Some(0.3));
        assert_eq!(field.get(0, 1), Some(0.4));
    }

    // -- Access --

    #[test]
    fn get_and_set_inside_field() {
        let mut field = Field::new(4, 4).unwrap();
        field.set(2, 3, 0.42).unwrap();
        assert_eq!(field.get(2, 3), Some(0.42));
    }

    #[test]
    fn get_outside_field_is_none() {
        let field = Field::new(4, 4).unwrap();
        assert_eq!(field.get(4, 0), None);
        assert_eq!(field.get(0, 4), None);
    }

    #[test]
    fn set_outside_field_returns_out_of_bounds() {
        let mut field = Field::new(4, 4).unwrap();
        let err = field.set(4, 1, 0.5).unwrap_err();
        assert_eq!(
            err,
            FieldError::OutOfBounds {
                x: 4,
                y: 1,
                width: 4,
                height: 4
            }
        );
    }

    #[test]
    fn set_clamps_value() {
        let mut field = Field::new(2, 2).unwrap();
        field.set(0, 0, 2.5).unwrap();
        field.set(1, 0, -0.5).unwrap();
        assert_eq!(field.get(0, 0), Some(1.0));
        assert_eq!(field.get(1, 0), Some(0.0));
    }

    #[test]
    fn set_if_in_bounds_drops_outside_writes() {
        let mut field = Field::new(3, 3).unwrap();
        assert!(!field.set_if_in_bounds(-1, 0, 0.5));
        assert!(!field.set_if_in_bounds(0, -1, 0.5));
        assert!(!field.set_if_in_bounds(3, 0, 0.5));
        assert!(!field.set_if_in_bounds(0, 3, 0.5));
        assert!(field.data().iter().all(|&v| v == 0.0));
        assert!(field.set_if_in_bounds(2, 2, 0.5));
        assert_eq!(field.get(2, 2), Some(0.5));
    }

    // -- Iteration and stats --

    #[test]
    fn iter_yields_all_triples_in_row_major_order() {
        let field = Field::from_data(2, 2, vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        let triples: Vec<_> = field.iter().collect();
        assert_eq!(
            triples,
            vec![(0, 0, 0.1), (1, 0, 0.2), (0, 1, 0.3), (1, 1, 0.4)]
        );
    }

    #[test]
    fn stats_reports_min_max_mean() {
        let field = Field::from_data(2, 2, vec![0.0, 0.25, 0.75, 1.0]).unwrap();
        let stats = field.stats();
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 1.0);
        assert!((stats.mean - 0.5).abs() < f64::EPSILON);
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn set_if_in_bounds_lands_exactly_inside(
                w in 1_usize..=32,
                h in 1_usize..=32,
                x in -40_isize..=40,
                y in -40_isize..=40,
                v in -2.0_f64..2.0,
            ) {
                let mut field = Field::new(w, h).unwrap();
                let inside = x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h;
                prop_assert_eq!(field.set_if_in_bounds(x, y, v), inside);
                let written = field.data().iter().filter(|&&c| c != 0.0).count();
                prop_assert!(written <= 1);
                if inside {
                    prop_assert_eq!(field.get(x as usize, y as usize), Some(v.clamp(0.0, 1.0)));
                }
            }
        }
    }
}
