//! **wayfield-core** — Grid path planning (core types).
//!
//! This crate provides the foundational types used across the *wayfield*
//! planner: integer grid coordinates and step directions, the 8-way movement
//! cost model, the immutable walkability grid, and conversion between
//! continuous world space and grid space.

pub mod distance;
pub mod geom;
pub mod grid;
pub mod world;

pub use distance::{chebyshev, manhattan, octile, step_cost};
pub use geom::{Coord, Dir};
pub use grid::{GridError, WalkGrid};
pub use world::{TILE_SCALE, WorldPos, grid_to_world, world_to_grid};
