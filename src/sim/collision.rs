//! Axis-aligned box overlap and tile coverage
//!
//! Every actor is an axis-aligned rectangle anchored at its top-left corner.
//! Terrain queries work on the integer tiles a rectangle covers.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::Vector;
use crate::tile_of;

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vector,
    pub size: Vector,
}

impl Rect {
    pub fn new(pos: Vector, size: Vector) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.pos.y + self.size.y
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Tiles covered by this rectangle (floor of each edge, inclusive)
    pub fn tile_span(&self) -> TileSpan {
        let min = tile_of(self.pos);
        let max = tile_of(self.pos + self.size);
        TileSpan { min, max }
    }
}

/// Inclusive range of tile coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpan {
    /// Left column / top row
    pub min: IVec2,
    /// Right column / bottom row
    pub max: IVec2,
}

impl TileSpan {
    /// Covered cells, column by column (top to bottom within each column)
    pub fn cells(self) -> impl Iterator<Item = IVec2> {
        let TileSpan { min, max } = self;
        (min.x..=max.x).flat_map(move |x| (min.y..=max.y).map(move |y| IVec2::new(x, y)))
    }
}
