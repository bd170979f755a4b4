//! A concurrent, bounded cache of direction fields, keyed by target.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Condvar, Mutex, RwLock};

use wayfield_core::{Coord, WalkGrid};

use crate::field::DirectionField;
use crate::flood::flood_distances;

// ---------------------------------------------------------------------------
// Promise
// ---------------------------------------------------------------------------

/// Publish-once slot for a field build in flight.
///
/// Exactly one thread (the builder) fulfils it; any number of threads may
/// wait on it or poll it. Once fulfilled the value never changes.
struct Promise {
    slot: Mutex<Option<Arc<DirectionField>>>,
    ready: Condvar,
}

impl Promise {
    fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            ready: Condvar::new(),
        }
    }

    fn fulfil(&self, field: Arc<DirectionField>) {
        let mut slot = self.slot.lock();
        *slot = Some(field);
        self.ready.notify_all();
    }

    fn wait(&self) -> Arc<DirectionField> {
        let mut slot = self.slot.lock();
        loop {
            if let Some(field) = slot.as_ref() {
                return Arc::clone(field);
            }
            self.ready.wait(&mut slot);
        }
    }

    fn poll(&self) -> Option<Arc<DirectionField>> {
        self.slot.lock().clone()
    }
}

// ---------------------------------------------------------------------------
// FieldCache
// ---------------------------------------------------------------------------

/// Cache state behind one lock: the entries plus their recency order.
struct CacheInner {
    slots: HashMap<Coord, Arc<Promise>>,
    /// Targets from least to most recently ensured.
    order: VecDeque<Coord>,
}

impl CacheInner {
    fn touch(&mut self, target: Coord) {
        if let Some(pos) = self.order.iter().position(|&t| t == target) {
            self.order.remove(pos);
        }
        self.order.push_back(target);
    }
}

/// A bounded map from target coordinate to its direction field, safe to
/// share across threads.
///
/// The first caller to ask for a target becomes its builder; everyone else
/// asking for the same target blocks on the entry's promise until the
/// single build publishes. Published fields are immutable and handed out as
/// cheap [`Arc`] clones. Beyond `capacity` entries, the least recently
/// ensured target is evicted.
pub struct FieldCache {
    inner: RwLock<CacheInner>,
    capacity: usize,
}

impl FieldCache {
    /// Default number of retained fields.
    pub const DEFAULT_CAPACITY: usize = 32;

    /// Create a cache holding at most `capacity` fields (minimum one).
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(CacheInner {
                slots: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: capacity.max(1),
        }
    }

    /// Return the field for `target`, building it if nobody has yet.
    ///
    /// Exactly one build runs per entry no matter how many threads call
    /// this concurrently; losers block until the winner publishes. The
    /// distance map built along the way is discarded here, so the retained
    /// cost per target is one byte per grid cell.
    pub fn ensure(&self, grid: &WalkGrid, target: Coord) -> Arc<DirectionField> {
        let (promise, is_builder) = {
            let mut inner = self.inner.write();
            match inner.slots.get(&target) {
                Some(p) => {
                    let p = Arc::clone(p);
                    inner.touch(target);
                    (p, false)
                }
                None => {
                    let p = Arc::new(Promise::new());
                    inner.slots.insert(target, Arc::clone(&p));
                    inner.order.push_back(target);
                    if inner.slots.len() > self.capacity {
                        if let Some(old) = inner.order.pop_front() {
                            inner.slots.remove(&old);
                        }
                    }
                    (p, true)
                }
            }
        };

        if !is_builder {
            return promise.wait();
        }

        let started = Instant::now();
        let distances = flood_distances(grid, target);
        let field = Arc::new(DirectionField::from_distances(grid, target, &distances));
        log::debug!(
            "direction field for {target} built in {:?} ({} reachable cells)",
            started.elapsed(),
            distances.len(),
        );
        promise.fulfil(Arc::clone(&field));
        field
    }

    /// The published field for `target`, if any. Never blocks on a build in
    /// flight; an entry still building reads as absent.
    pub fn try_get(&self, target: Coord) -> Option<Arc<DirectionField>> {
        let inner = self.inner.read();
        inner.slots.get(&target).and_then(|p| p.poll())
    }

    /// Whether a published field for `target` exists right now.
    pub fn has(&self, target: Coord) -> bool {
        self.try_get(target).is_some()
    }

    /// Number of entries, counting builds still in flight.
    pub fn len(&self) -> usize {
        self.inner.read().slots.len()
    }

    /// Whether the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    ///
    /// Builds in flight are detached, not cancelled: their waiters still get
    /// the field through the shared [`Promise`], the cache just forgets it.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.slots.clear();
        inner.order.clear();
    }
}

impl Default for FieldCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
