//! Exact distance maps via uniform-cost flood fill.

use std::collections::HashMap;

use wayfield_core::distance::step_cost;
use wayfield_core::{Coord, WalkGrid};

use crate::heap::MinHeap;

/// Exact distance-to-`target` for every cell that can reach it.
///
/// This is the same expansion as [`astar_path`](crate::astar_path) with a
/// zero heuristic, rooted at `target` and run until the frontier is empty,
/// so each entry is the true shortest-path cost. Unreachable cells are
/// absent from the map; an unwalkable target yields an empty map.
///
/// The map is the transient input of
/// [`DirectionField::from_distances`](crate::DirectionField::from_distances)
/// and is meant to be dropped right after, leaving one byte per cell
/// retained.
pub fn flood_distances(grid: &WalkGrid, target: Coord) -> HashMap<Coord, f32> {
    let mut dist: HashMap<Coord, f32> = HashMap::new();
    if !grid.is_walkable(target) {
        return dist;
    }

    let mut open = MinHeap::new();
    dist.insert(target, 0.0);
    open.push(0.0, target);

    while let Some((d, current)) = open.pop() {
        // A cheaper duplicate already settled this cell.
        if d > dist.get(&current).copied().unwrap_or(f32::INFINITY) {
            continue;
        }
        for n in grid.neighbors(current) {
            if !grid.is_walkable(n) {
                continue;
            }
            let nd = d + step_cost(current, n);
            if nd < dist.get(&n).copied().unwrap_or(f32::INFINITY) {
                dist.insert(n, nd);
                open.push(nd, n);
            }
        }
    }
    dist
}
