//! The immutable walkability model: [`WalkGrid`].

use std::collections::HashSet;

use crate::geom::{Coord, Dir};

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Error building a [`WalkGrid`] from terrain data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The terrain had zero rows, or its first row had zero cells.
    #[error("terrain grid must have at least one row and one column")]
    Empty,
    /// A row's length disagreed with the first row's.
    #[error("terrain row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
}

// ---------------------------------------------------------------------------
// WalkGrid
// ---------------------------------------------------------------------------

/// A bounded 2D grid answering one question per cell: can it be walked on?
///
/// Built once from raw terrain codes plus the set of codes that count as
/// walkable, then never mutated, so it can be shared freely between threads.
/// Every lookup is total: out-of-bounds coordinates are simply unwalkable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkGrid {
    width: i32,
    height: i32,
    walkable: Vec<bool>,
}

impl WalkGrid {
    /// Build a grid from row-major terrain codes.
    ///
    /// A cell is walkable iff its code appears in `pathable`. Fails on empty
    /// input and on rows of unequal length; `terrain` is borrowed only for
    /// the duration of the call.
    pub fn from_terrain(terrain: &[Vec<i32>], pathable: &[i32]) -> Result<Self, GridError> {
        let height = terrain.len();
        let width = terrain.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }
        let pathable: HashSet<i32> = pathable.iter().copied().collect();
        let mut walkable = Vec::with_capacity(width * height);
        for (y, row) in terrain.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: y,
                    len: row.len(),
                    expected: width,
                });
            }
            walkable.extend(row.iter().map(|code| pathable.contains(code)));
        }
        Ok(Self {
            width: width as i32,
            height: height as i32,
            walkable,
        })
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.walkable.len()
    }

    /// Whether `c` lies inside the grid bounds.
    #[inline]
    pub fn in_bounds(&self, c: Coord) -> bool {
        c.x >= 0 && c.x < self.width && c.y >= 0 && c.y < self.height
    }

    /// Whether `c` is inside the grid and walkable.
    #[inline]
    pub fn is_walkable(&self, c: Coord) -> bool {
        self.in_bounds(c) && self.walkable[(c.y * self.width + c.x) as usize]
    }

    /// The eight neighbour candidates of `c`, in [`Dir`] table order.
    ///
    /// Purely positional: no bounds or walkability filtering happens here,
    /// callers filter with [`WalkGrid::is_walkable`]. Diagonal candidates are
    /// included even when both flanking cardinals are blocked (movement may
    /// cut corners).
    #[inline]
    pub fn neighbors(&self, c: Coord) -> [Coord; 8] {
        c.neighbors_8()
    }
}
