//! The planner facade: one grid, bounded searches, cached fields.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use wayfield_core::{Coord, GridError, WalkGrid};

use crate::astar::{SearchBudget, astar_path};
use crate::cache::FieldCache;
use crate::field::DirectionField;

// ---------------------------------------------------------------------------
// PlannerConfig
// ---------------------------------------------------------------------------

/// Tuning knobs for a [`PathFinder`].
#[derive(Clone, Copy, Debug)]
pub struct PlannerConfig {
    /// Budget applied by [`PathFinder::find_path`] and its background
    /// variant.
    pub budget: SearchBudget,
    /// How many direction fields the cache retains before evicting.
    pub field_capacity: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            budget: SearchBudget::default(),
            field_capacity: FieldCache::DEFAULT_CAPACITY,
        }
    }
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

struct Inner {
    grid: WalkGrid,
    cache: FieldCache,
    budget: SearchBudget,
}

/// Grid path planner combining budget-bounded A* with cached direction
/// fields.
///
/// Queries check the field cache first: a published field answers in O(path
/// length) and its verdict is exact, including "unreachable". Everything
/// else falls back to a bounded A*. Cloning is cheap and clones share the
/// same grid and cache, so a clone can be moved onto a worker thread while
/// the original keeps serving per-tick queries.
#[derive(Clone)]
pub struct PathFinder {
    inner: Arc<Inner>,
}

impl PathFinder {
    /// Build a planner from row-major terrain codes and the set of codes
    /// that count as walkable.
    pub fn new(terrain: &[Vec<i32>], pathable: &[i32]) -> Result<Self, GridError> {
        Self::with_config(terrain, pathable, PlannerConfig::default())
    }

    /// Like [`PathFinder::new`] with explicit tuning.
    pub fn with_config(
        terrain: &[Vec<i32>],
        pathable: &[i32],
        config: PlannerConfig,
    ) -> Result<Self, GridError> {
        Ok(Self::from_grid(
            WalkGrid::from_terrain(terrain, pathable)?,
            config,
        ))
    }

    /// Build a planner around an existing grid.
    pub fn from_grid(grid: WalkGrid, config: PlannerConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                grid,
                cache: FieldCache::new(config.field_capacity),
                budget: config.budget,
            }),
        }
    }

    /// The walkability grid this planner plans over.
    pub fn grid(&self) -> &WalkGrid {
        &self.inner.grid
    }

    // --- path queries ---

    /// Shortest path from `start` to `target` under the configured budget.
    ///
    /// Served from the direction field for `target` when one is published;
    /// otherwise a bounded A* runs. `None` means an unwalkable endpoint, a
    /// genuinely unreachable target, or an exhausted budget; only a field
    /// answer makes the "unreachable" reading definitive.
    pub fn find_path(&self, start: Coord, target: Coord) -> Option<Vec<Coord>> {
        self.find_path_with(start, target, self.inner.budget)
    }

    /// [`PathFinder::find_path`] with an explicit budget for this one call.
    pub fn find_path_with(
        &self,
        start: Coord,
        target: Coord,
        budget: SearchBudget,
    ) -> Option<Vec<Coord>> {
        let grid = &self.inner.grid;
        if !grid.is_walkable(start) || !grid.is_walkable(target) {
            return None;
        }
        if start == target {
            return Some(vec![start]);
        }
        if let Some(field) = self.inner.cache.try_get(target) {
            // The field is exact for this immutable grid, so its verdict is
            // final either way; no search needed.
            return field.walk(start);
        }
        astar_path(grid, start, target, budget)
    }

    /// Run [`PathFinder::find_path`] on a worker thread.
    ///
    /// The returned handle can be polled each tick or waited on; dropping
    /// it detaches the query.
    pub fn spawn_find_path(&self, start: Coord, target: Coord) -> PathTask {
        let finder = self.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(finder.find_path(start, target));
        });
        PathTask { rx }
    }

    // --- direction fields ---

    /// Build (or wait for) the direction field for `target`, blocking until
    /// it is published. Idempotent: concurrent calls share one build.
    pub fn ensure_field(&self, target: Coord) -> Arc<DirectionField> {
        self.inner.cache.ensure(&self.inner.grid, target)
    }

    /// Kick off a background build of the field for `target`.
    ///
    /// Useful for targets known to attract many queries; once the build
    /// publishes, [`PathFinder::find_path`] answers for that target without
    /// searching.
    pub fn precalculate_field(&self, target: Coord) -> FieldBuild {
        let finder = self.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(finder.ensure_field(target));
        });
        FieldBuild { rx }
    }

    /// Whether a published field for `target` exists right now.
    pub fn has_field(&self, target: Coord) -> bool {
        self.inner.cache.has(target)
    }

    /// Path from `start` via the published field for `target`, or `None`
    /// when no field is published or the field has no route from `start`.
    ///
    /// Never searches and never blocks on a build in flight.
    pub fn field_path(&self, start: Coord, target: Coord) -> Option<Vec<Coord>> {
        self.inner.cache.try_get(target)?.walk(start)
    }

    /// Drop every cached field. Builds in flight are detached, not
    /// cancelled.
    pub fn clear_cache(&self) {
        self.inner.cache.clear();
    }

    /// Number of cache entries, counting builds still in flight.
    pub fn cached_fields(&self) -> usize {
        self.inner.cache.len()
    }
}

// ---------------------------------------------------------------------------
// Task handles
// ---------------------------------------------------------------------------

/// Handle to a path query running on a worker thread.
pub struct PathTask {
    rx: Receiver<Option<Vec<Coord>>>,
}

impl PathTask {
    /// The query result, once. `None` while the query is still running;
    /// after the result has been taken, later polls read as still running.
    pub fn try_result(&self) -> Option<Option<Vec<Coord>>> {
        self.rx.try_recv().ok()
    }

    /// Block until the query finishes. A lost worker reads as "no path".
    pub fn wait(self) -> Option<Vec<Coord>> {
        self.rx.recv().unwrap_or(None)
    }
}

/// Handle to a direction-field build running on a worker thread.
pub struct FieldBuild {
    rx: Receiver<Arc<DirectionField>>,
}

impl FieldBuild {
    /// The built field, once it has published; `None` while still building.
    pub fn try_field(&self) -> Option<Arc<DirectionField>> {
        self.rx.try_recv().ok()
    }

    /// Block until the build publishes. `None` only if the worker was lost.
    pub fn wait(self) -> Option<Arc<DirectionField>> {
        self.rx.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astar::path_cost;
    use std::time::Duration;
    use wayfield_core::distance::DIAGONAL_COST;

    const EPS: f32 = 1e-4;

    fn terrain_from(rows: &[&str]) -> Vec<Vec<i32>> {
        rows.iter()
            .map(|r| r.chars().map(|c| if c == '#' { 1 } else { 0 }).collect())
            .collect()
    }

    fn walled_finder() -> PathFinder {
        let terrain = terrain_from(&[
            ".....", //
            "..#..",
            "..#..",
            "..#..",
            ".....",
        ]);
        PathFinder::new(&terrain, &[0]).unwrap()
    }

    #[test]
    fn rejects_bad_terrain() {
        assert!(matches!(PathFinder::new(&[], &[0]), Err(GridError::Empty)));
        let ragged = vec![vec![0, 0], vec![0]];
        assert!(matches!(
            PathFinder::new(&ragged, &[0]),
            Err(GridError::Ragged { .. })
        ));
    }

    #[test]
    fn finds_paths_without_any_field() {
        let finder = walled_finder();
        let path = finder
            .find_path(Coord::new(0, 2), Coord::new(4, 2))
            .unwrap();
        assert_eq!(path.first(), Some(&Coord::new(0, 2)));
        assert_eq!(path.last(), Some(&Coord::new(4, 2)));
        assert!((path_cost(&path) - 4.0 * DIAGONAL_COST).abs() < EPS);
        assert!(!finder.has_field(Coord::new(4, 2)));
        assert_eq!(finder.cached_fields(), 0);
    }

    #[test]
    fn cached_field_serves_queries() {
        let finder = walled_finder();
        let target = Coord::new(4, 2);
        finder.ensure_field(target);
        assert!(finder.has_field(target));
        let path = finder.find_path(Coord::new(0, 2), target).unwrap();
        assert_eq!(path.last(), Some(&target));
        assert!((path_cost(&path) - 4.0 * DIAGONAL_COST).abs() < EPS);
        // The pure field lookup agrees.
        assert_eq!(finder.field_path(Coord::new(0, 2), target), Some(path));
    }

    #[test]
    fn field_verdict_on_unreachable_is_definitive() {
        let terrain = terrain_from(&[
            "..#..", //
            "..#..",
            "..#..",
        ]);
        let finder = PathFinder::new(&terrain, &[0]).unwrap();
        let target = Coord::new(4, 1);
        finder.ensure_field(target);
        assert!(finder.find_path(Coord::new(0, 1), target).is_none());
        assert!(finder.field_path(Coord::new(0, 1), target).is_none());
        // Reachable side still routes.
        assert!(finder.find_path(Coord::new(3, 0), target).is_some());
    }

    #[test]
    fn field_path_requires_a_published_field() {
        let finder = walled_finder();
        assert!(
            finder
                .field_path(Coord::new(0, 2), Coord::new(4, 2))
                .is_none()
        );
    }

    #[test]
    fn start_equals_target_short_circuits() {
        let finder = walled_finder();
        let c = Coord::new(0, 0);
        assert_eq!(finder.find_path(c, c), Some(vec![c]));
    }

    #[test]
    fn configured_budget_applies_and_can_be_overridden() {
        let mut terrain = terrain_from(&[
            "........", //
            "########",
            "........",
            "........",
        ]);
        terrain[1][7] = 0; // one gap at the far end of the wall
        let config = PlannerConfig {
            budget: SearchBudget::iterations(2),
            ..PlannerConfig::default()
        };
        let finder = PathFinder::with_config(&terrain, &[0], config).unwrap();
        let start = Coord::new(0, 0);
        let target = Coord::new(0, 3);
        assert!(finder.find_path(start, target).is_none());
        let path = finder
            .find_path_with(start, target, SearchBudget::UNBOUNDED)
            .unwrap();
        assert_eq!(path.last(), Some(&target));
    }

    #[test]
    fn spawned_queries_deliver_results() {
        let finder = walled_finder();
        let start = Coord::new(0, 2);
        let target = Coord::new(4, 2);
        let task = finder.spawn_find_path(start, target);
        let path = task.wait().expect("background query found no path");
        assert_eq!(path.last(), Some(&target));

        let task = finder.spawn_find_path(start, target);
        let mut polled = None;
        for _ in 0..200 {
            if let Some(r) = task.try_result() {
                polled = Some(r);
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }
        let polled = polled.expect("query never finished");
        assert_eq!(polled.and_then(|p| p.last().copied()), Some(target));
    }

    #[test]
    fn precalculated_fields_publish_in_the_background() {
        let finder = walled_finder();
        let target = Coord::new(4, 2);
        let build = finder.precalculate_field(target);
        let field = build.wait().expect("build worker lost");
        assert_eq!(field.target(), target);
        assert!(finder.has_field(target));
        assert_eq!(finder.cached_fields(), 1);
        // An ensure after the fact reuses the published build.
        assert!(Arc::ptr_eq(&field, &finder.ensure_field(target)));
    }

    #[test]
    fn clear_cache_forces_fresh_builds() {
        let finder = walled_finder();
        let target = Coord::new(4, 2);
        let first = finder.ensure_field(target);
        finder.clear_cache();
        assert_eq!(finder.cached_fields(), 0);
        assert!(!finder.has_field(target));
        let second = finder.ensure_field(target);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn clones_share_grid_and_cache() {
        let finder = walled_finder();
        let clone = finder.clone();
        let target = Coord::new(4, 2);
        clone.ensure_field(target);
        assert!(finder.has_field(target));
        let handle = {
            let worker = finder.clone();
            thread::spawn(move || worker.find_path(Coord::new(0, 2), target))
        };
        assert!(handle.join().unwrap().is_some());
    }
}
