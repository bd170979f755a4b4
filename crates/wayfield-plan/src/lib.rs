//! Grid path planning with cached direction fields.
//!
//! This crate layers two complementary query paths over one immutable
//! walkability grid:
//!
//! - **A\*** budget-bounded shortest-path search ([`astar_path`])
//! - **Flood fill** exact whole-grid distance maps ([`flood_distances`])
//! - **Direction fields** dense next-step tables derived from a flood,
//!   answering repeated queries toward a fixed target in O(path length)
//!   ([`DirectionField`])
//! - **[`PathFinder`]** the facade: checks the concurrent field cache
//!   first, falls back to bounded A*, and can run either on worker threads
//!
//! A bounded search that gives up returns the same `None` as a genuinely
//! unreachable target; only a published field makes the negative answer
//! exact. Callers that keep asking about the same target are expected to
//! [`PathFinder::precalculate_field`] it once and let every later query hit
//! the table.

mod astar;
mod cache;
mod field;
mod finder;
mod flood;
mod heap;

pub use astar::{SearchBudget, astar_path, path_cost};
pub use cache::FieldCache;
pub use field::DirectionField;
pub use finder::{FieldBuild, PathFinder, PathTask, PlannerConfig};
pub use flood::flood_distances;
pub use heap::MinHeap;
