//! World-space ↔ grid-space conversion.

use std::fmt;

use crate::geom::Coord;

/// World units per grid tile.
pub const TILE_SCALE: f32 = 23.0;

/// A continuous position in world space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    /// Create a new world position.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The grid tile containing a world position.
///
/// Divides by `tile_scale` and floors, so negative world coordinates land in
/// the expected tile instead of folding onto the tile across the origin the
/// way truncation would. Positions exactly on a tile boundary belong to the
/// tile on the positive side.
#[inline]
pub fn world_to_grid(pos: WorldPos, tile_scale: f32) -> Coord {
    Coord::new(
        (pos.x / tile_scale).floor() as i32,
        (pos.y / tile_scale).floor() as i32,
    )
}

/// The world position at the centre of a grid tile.
///
/// Centring (rather than using the tile's corner) keeps
/// `world_to_grid(grid_to_world(c))` the identity for every tile.
#[inline]
pub fn grid_to_world(c: Coord, tile_scale: f32) -> WorldPos {
    WorldPos::new(
        (c.x as f32 + 0.5) * tile_scale,
        (c.y as f32 + 0.5) * tile_scale,
    )
}
