//! Direction fields: dense per-cell "next step toward a target" tables.

use std::collections::HashMap;

use rayon::prelude::*;

use wayfield_core::{Coord, Dir, WalkGrid};

/// A dense byte table holding, for every grid cell, the next step toward one
/// fixed target.
///
/// Byte `0` means "no direction": the cell cannot reach the target, or *is*
/// the target. Bytes 1–8 encode a [`Dir`]. A field is derived once from an
/// exact distance map and never mutated afterwards, so a single field can
/// serve any number of concurrent readers; per query it answers in O(path
/// length) with no search at all.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionField {
    target: Coord,
    width: i32,
    height: i32,
    cells: Vec<u8>,
    reachable: usize,
}

impl DirectionField {
    /// Derive the field for `target` from its flood-fill distance map.
    ///
    /// Each cell points at the neighbour with the strictly smallest
    /// distance-to-target; ties go to the earliest direction in
    /// [`Dir::ALL`]. Cells absent from `distances` (and the target itself)
    /// get byte `0`. Rows are independent, so they are derived in parallel.
    pub fn from_distances(
        grid: &WalkGrid,
        target: Coord,
        distances: &HashMap<Coord, f32>,
    ) -> Self {
        let width = grid.width();
        let height = grid.height();
        let rows: Vec<Vec<u8>> = (0..height)
            .into_par_iter()
            .map(|y| {
                (0..width)
                    .map(|x| Self::cell_byte(Coord::new(x, y), distances))
                    .collect()
            })
            .collect();
        Self {
            target,
            width,
            height,
            cells: rows.concat(),
            reachable: distances.len(),
        }
    }

    /// Encoded next step for one cell.
    fn cell_byte(c: Coord, distances: &HashMap<Coord, f32>) -> u8 {
        // Unreachable (or blocked) cells keep byte 0; so does the target,
        // whose own distance of zero no neighbour can beat.
        let Some(&own) = distances.get(&c) else {
            return 0;
        };
        let mut best_dist = own;
        let mut best: Option<Dir> = None;
        for d in Dir::ALL {
            if let Some(&nd) = distances.get(&c.step(d)) {
                if nd < best_dist {
                    best_dist = nd;
                    best = Some(d);
                }
            }
        }
        best.map_or(0, Dir::byte)
    }

    /// The fixed target this field routes toward.
    #[inline]
    pub fn target(&self) -> Coord {
        self.target
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

    /// Raw byte at `c`; out-of-bounds coordinates read as `0`.
    #[inline]
    pub fn byte_at(&self, c: Coord) -> u8 {
        if c.x < 0 || c.x >= self.width || c.y < 0 || c.y >= self.height {
            return 0;
        }
        self.cells[(c.y * self.width + c.x) as usize]
    }

    /// Decoded next step at `c`, or `None` where the field has no direction.
    #[inline]
    pub fn dir_at(&self, c: Coord) -> Option<Dir> {
        Dir::from_byte(self.byte_at(c))
    }

    /// Number of cells that can reach the target, the target included.
    /// Zero exactly when the target itself was unwalkable.
    #[inline]
    pub fn reachable_cells(&self) -> usize {
        self.reachable
    }

    /// Follow the field from `start` all the way to the target.
    ///
    /// Returns the full cell path (including both endpoints). `None` when
    /// the walk hits a cell with no direction, or when it somehow exceeds
    /// one step per grid cell; a correctly derived field cannot cycle, the
    /// bound turns that from an assumption into a guarantee.
    pub fn walk(&self, start: Coord) -> Option<Vec<Coord>> {
        let max_steps = (self.width as usize) * (self.height as usize);
        let mut path = vec![start];
        let mut cur = start;
        let mut steps = 0usize;
        while cur != self.target {
            cur = cur.step(self.dir_at(cur)?);
            path.push(cur);
            steps += 1;
            if steps > max_steps {
                return None;
            }
        }
        Some(path)
    }
}
