//! Random midpoint displacement over rectangular tiles.
//!
//! A tile's four corners are hashed from their absolute pixel coordinates,
//! so adjacent tiles share corner values. Each cell is split into four
//! children: the centre and the four edge midpoints are the average of the
//! adjacent corners plus a hashed offset proportional to the child size,
//! clamped to [0, 1]. Recursion stops once a cell is at most one pixel in
//! both directions, and the average of its corners is written to the field.

use heightfield_core::field::Field;

/// Edge midpoints are displaced by this much less than the centre.
pub const EDGE_DAMPING: f64 = 1.42;

/// Integer hash of a pixel position and seed, in [0, 1].
///
/// Coordinates are truncated to integers first, so every point inside one
/// pixel hashes identically.
pub fn lattice_hash(x: f64, y: f64, seed: i32) -> f64 {
    let mut k = (x as i32)
        .wrapping_mul(31)
        .wrapping_add((y as i32).wrapping_mul(101))
        .wrapping_add(seed.wrapping_mul(103));
    k ^= k.wrapping_shl(13);
    k = k
        .wrapping_mul(
            k.wrapping_mul(k)
                .wrapping_mul(15731)
                .wrapping_add(789_221),
        )
        .wrapping_add(1_376_312_589);
    f64::from(k & i32::MAX) / f64::from(i32::MAX)
}

#[inline]
fn clip(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// One cell of the subdivision: top-left corner, extent, and corner values
/// ordered top-left, top-right, bottom-right, bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corners: [f64; 4],
}

/// Midpoint displacement fractal with fixed tile size, seed, and roughness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlasmaField {
    seed: i32,
    tile_width: usize,
    tile_height: usize,
    strength: f64,
}

impl PlasmaField {
    /// Creates a plasma fractal. No validation happens here: tile shapes
    /// other than `tile_height = tile_width / 2^n` still fill, just not as
    /// an evenly subdivided fractal.
    pub fn new(seed: i32, tile_width: usize, tile_height: usize, strength: f64) -> Self {
        Self {
            seed,
            tile_width,
            tile_height,
            strength,
        }
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn tile_width(&self) -> usize {
        self.tile_width
    }

    pub fn tile_height(&self) -> usize {
        self.tile_height
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Hashed value at absolute pixel position `(x, y)`.
    pub fn hash(&self, x: f64, y: f64) -> f64 {
        lattice_hash(x, y, self.seed)
    }

    /// Offset for a child of extent `size` (`width + height`) at `(x, y)`.
    ///
    /// Bounded by `0.5 * size / (tile_width + tile_height) * |strength|`.
    pub fn displace(&self, size: f64, x: f64, y: f64) -> f64 {
        let max = size / (self.tile_width + self.tile_height) as f64 * self.strength;
        (self.hash(x, y) - 0.5) * max
    }

    /// The root cell of the tile at `(origin_x, origin_y)` with hashed corners.
    pub fn tile_cell(&self, origin_x: usize, origin_y: usize) -> GridCell {
        let (x0, y0) = (origin_x as f64, origin_y as f64);
        let (x1, y1) = (x0 + self.tile_width as f64, y0 + self.tile_height as f64);
        GridCell {
            x: x0,
            y: y0,
            width: self.tile_width as f64,
            height: self.tile_height as f64,
            corners: [
                self.hash(x0, y0),
                self.hash(x1, y0),
                self.hash(x1, y1),
                self.hash(x0, y1),
            ],
        }
    }

    /// Fills one tile whose top-left pixel is `(origin_x, origin_y)`.
    ///
    /// Pixels of the tile that fall outside `field` are skipped, and so is
    /// the subdivision of any cell lying wholly past the field's edges, so the
    /// cost follows the overlap with the field rather than the tile size.
    pub fn fill_tile(&self, field: &mut Field, origin_x: usize, origin_y: usize) {
        tracing::trace!(origin_x, origin_y, "filling plasma tile");
        self.subdivide(field, &self.tile_cell(origin_x, origin_y));
    }

    /// Tiles the whole field, starting at its origin.
    ///
    /// Returns the number of tiles filled.
    pub fn fill(&self, field: &mut Field) -> usize {
        if self.tile_width == 0 || self.tile_height == 0 {
            return 0;
        }
        let mut tiles = 0;
        for origin_x in (0..field.width()).step_by(self.tile_width) {
            for origin_y in (0..field.height()).step_by(self.tile_height) {
                self.fill_tile(field, origin_x, origin_y);
                tiles += 1;
            }
        }
        tiles
    }

    fn subdivide(&self, field: &mut Field, cell: &GridCell) {
        let GridCell {
            x,
            y,
            width,
            height,
            corners: [c1, c2, c3, c4],
        } = *cell;

        // Every write from this cell lands at or beyond (x, y).
        if x >= field.width() as f64 || y >= field.height() as f64 {
            return;
        }

        if width <= 1.0 && height <= 1.0 {
            let c = (c1 + c2 + c3 + c4) / 4.0;
            field.set_if_in_bounds(x.floor() as isize, y.floor() as isize, c);
            return;
        }

        let half_w = width / 2.0;
        let half_h = height / 2.0;
        let size = half_w + half_h;

        // The centre is hashed at (x + w/2, y + w/2); identical to the true
        // centre for square cells, and kept that way for non-square ones.
        let middle = clip((c1 + c2 + c3 + c4) / 4.0 + self.displace(size, x + half_w, y + half_w));
        let edge1 = clip((c1 + c2) / 2.0 + self.displace(size, x + half_w, y) / EDGE_DAMPING);
        let edge2 = clip((c2 + c3) / 2.0 + self.displace(size, x + width, y + half_h) / EDGE_DAMPING);
        let edge3 = clip((c3 + c4) / 2.0 + self.displace(size, x + half_w, y + height) / EDGE_DAMPING);
        let edge4 = clip((c4 + c1) / 2.0 + self.displace(size, x, y + half_h) / EDGE_DAMPING);

        let child = |x, y, corners| GridCell {
            x,
            y,
            width: half_w,
            height: half_h,
            corners,
        };
        self.subdivide(field, &child(x, y, [c1, edge1, middle, edge4]));
        self.subdivide(field, &child(x + half_w, y, [edge1, c2, edge2, middle]));
        self.subdivide(field, &child(x + half_w, y + half_h, [middle, edge2, c3, edge3]));
        self.subdivide(field, &child(x, y + half_h, [edge4, middle, edge3, c4]));
    }
}
