//! Static terrain grid
//!
//! Cells are indexed `[row][col]`. Each cell is empty or holds an obstacle.
//! Rows may have different lengths; missing cells count as empty.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::Vector;

/// Solid terrain kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Obstacle {
    /// Blocks movement
    Wall,
    /// Kills the player on contact
    Lava,
}

impl Obstacle {
    /// Fixed terrain symbol table: `x` is wall, `!` is lava
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'x' => Some(Obstacle::Wall),
            '!' => Some(Obstacle::Lava),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Obstacle::Wall => "wall",
            Obstacle::Lava => "lava",
        }
    }
}

impl fmt::Display for Obstacle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A terrain cell (`None` = empty)
pub type Cell = Option<Obstacle>;

/// Row-major terrain grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at column `x`, row `y`; anything off the grid is empty
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.get(x).copied().flatten()
    }

    /// First obstacle overlapped by the box at `pos` with `size`
    ///
    /// The left, right and top borders behave as walls and everything
    /// below the last row is lava. Inside the grid, covered tiles are
    /// scanned column by column, top to bottom, and the first solid one
    /// wins.
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle> {
        let span = Rect::new(pos, size).tile_span();
        let width = self.width() as i32;
        let height = self.height() as i32;

        if span.min.x < 0 || span.max.x > width || span.min.y < 0 {
            return Some(Obstacle::Wall);
        }
        if span.max.y >= height {
            return Some(Obstacle::Lava);
        }

        span.cells().find_map(|tile| self.cell(tile.x, tile.y))
    }
}
