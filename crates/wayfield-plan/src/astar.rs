//! Budget-bounded A* search over a [`WalkGrid`].

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::{Duration, Instant};

use wayfield_core::distance::{octile, step_cost};
use wayfield_core::{Coord, WalkGrid};

use crate::heap::MinHeap;

// ---------------------------------------------------------------------------
// SearchBudget
// ---------------------------------------------------------------------------

/// Caps on how much work a single search may do.
///
/// Exhausting either cap makes the search report "no path found" rather than
/// an error: bounded searches are a liveness tool for per-tick callers, and
/// a budgeted miss is expected to be retried later or served from a cached
/// direction field instead.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchBudget {
    /// Maximum number of node expansions.
    pub max_iterations: usize,
    /// Maximum wall-clock time, checked periodically during the search.
    pub max_elapsed: Option<Duration>,
}

impl SearchBudget {
    /// No caps at all; the search runs to completion.
    pub const UNBOUNDED: Self = Self {
        max_iterations: usize::MAX,
        max_elapsed: None,
    };

    /// Cap only the number of node expansions.
    pub const fn iterations(n: usize) -> Self {
        Self {
            max_iterations: n,
            max_elapsed: None,
        }
    }
}

impl Default for SearchBudget {
    /// 50 000 expansions and 50 ms, whichever trips first.
    fn default() -> Self {
        Self {
            max_iterations: 50_000,
            max_elapsed: Some(Duration::from_millis(50)),
        }
    }
}

// ---------------------------------------------------------------------------
// astar_path
// ---------------------------------------------------------------------------

/// Per-cell search bookkeeping, allocated fresh for each call.
struct Node {
    g: f32,
    parent: Option<Coord>,
    closed: bool,
}

/// Compute the shortest path from `start` to `target` using A* with the
/// octile heuristic.
///
/// Returns the full path (including both endpoints), or `None` when either
/// endpoint is unwalkable, the target is unreachable, or `budget` runs out
/// first. Within budget the result is cost-optimal for the 1/√2 step model.
pub fn astar_path(
    grid: &WalkGrid,
    start: Coord,
    target: Coord,
    budget: SearchBudget,
) -> Option<Vec<Coord>> {
    if !grid.is_walkable(start) || !grid.is_walkable(target) {
        return None;
    }
    if start == target {
        return Some(vec![start]);
    }

    let started = Instant::now();
    let mut nodes: HashMap<Coord, Node> = HashMap::new();
    let mut open = MinHeap::new();

    nodes.insert(
        start,
        Node {
            g: 0.0,
            parent: None,
            closed: false,
        },
    );
    open.push(octile(start, target), start);

    let mut iterations = 0usize;

    let found = 'search: loop {
        let Some((_, current)) = open.pop() else {
            break 'search false;
        };

        // Skip stale entries: the cell was already expanded via a cheaper
        // duplicate that popped earlier.
        let current_g = match nodes.get_mut(&current) {
            Some(node) if !node.closed => {
                node.closed = true;
                node.g
            }
            _ => continue,
        };

        if current == target {
            break 'search true;
        }

        iterations += 1;
        if iterations > budget.max_iterations {
            log::debug!(
                "astar {start} -> {target}: iteration budget of {} exhausted",
                budget.max_iterations
            );
            break 'search false;
        }
        if let Some(cap) = budget.max_elapsed {
            // Amortise the clock read over a batch of expansions.
            if iterations & 0x3f == 0 && started.elapsed() > cap {
                log::debug!("astar {start} -> {target}: time budget of {cap:?} exhausted");
                break 'search false;
            }
        }

        for n in grid.neighbors(current) {
            if !grid.is_walkable(n) {
                continue;
            }
            let tentative = current_g + step_cost(current, n);
            match nodes.entry(n) {
                Entry::Occupied(mut e) => {
                    let node = e.get_mut();
                    if node.closed || tentative >= node.g {
                        continue;
                    }
                    node.g = tentative;
                    node.parent = Some(current);
                }
                Entry::Vacant(e) => {
                    e.insert(Node {
                        g: tentative,
                        parent: Some(current),
                        closed: false,
                    });
                }
            }
            open.push(tentative + octile(n, target), n);
        }
    };

    if !found {
        return None;
    }

    // Reconstruct by walking parent links back from the target.
    let mut path = Vec::new();
    let mut cur = Some(target);
    while let Some(c) = cur {
        path.push(c);
        cur = nodes.get(&c).and_then(|n| n.parent);
    }
    path.reverse();
    Some(path)
}

/// Total cost of a path under the 1/√2 step model.
#[inline]
pub fn path_cost(path: &[Coord]) -> f32 {
    path.windows(2).map(|w| step_cost(w[0], w[1])).sum()
}
