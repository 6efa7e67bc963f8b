//! # Shared Best Tracker
//!
//! The `SharedBestTracker` holds the single best record of a run. All
//! cross-climber synchronization lives here: publishing compares and maybe
//! overwrites under one mutex, and snapshots copy the record out under the
//! same mutex, so a reader never sees a half-written record.
//!
//! Climbers never hold the lock while evaluating or sampling. The critical
//! section is a comparison and a copy of `D` floats.
//!
//! ```rust
//! use hillclimb::position::Position;
//! use hillclimb::tracker::SharedBestTracker;
//!
//! let tracker = SharedBestTracker::<2>::new();
//! assert!(tracker.snapshot().is_none());
//!
//! assert!(tracker.try_publish(Position::new([1.0, 1.0]), 2.0));
//! assert!(!tracker.try_publish(Position::new([3.0, 0.0]), 9.0));
//! assert_eq!(tracker.snapshot().unwrap().fitness, 2.0);
//! ```

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::objective::is_improvement;
use crate::position::{BestRecord, Position};

type Observer<const D: usize> = Box<dyn Fn(&BestRecord<D>) + Send + Sync>;

struct TrackerState<const D: usize> {
    best: Option<BestRecord<D>>,
    publishes: u64,
}

/// The run-wide best `(position, fitness)` pair.
pub struct SharedBestTracker<const D: usize> {
    state: Mutex<TrackerState<D>>,
    observer: Option<Observer<D>>,
}

impl<const D: usize> SharedBestTracker<D> {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TrackerState {
                best: None,
                publishes: 0,
            }),
            observer: None,
        }
    }

    /// Creates an empty tracker that calls `observer` with every new best.
    ///
    /// The observer runs inside the critical section, so successive calls see
    /// strictly decreasing fitness. Keep it short.
    pub fn with_observer<F>(observer: F) -> Self
    where
        F: Fn(&BestRecord<D>) + Send + Sync + 'static,
    {
        Self {
            observer: Some(Box::new(observer)),
            ..Self::new()
        }
    }

    /// Stores `(position, fitness)` if it strictly improves on the current best.
    ///
    /// Returns `true` if the record was replaced. NaN fitness is never stored.
    pub fn try_publish(&self, position: Position<D>, fitness: f64) -> bool {
        let mut state = self.lock();

        let improved = match &state.best {
            Some(best) => is_improvement(fitness, best.fitness),
            None => !fitness.is_nan(),
        };
        if !improved {
            return false;
        }

        let record = BestRecord::new(position, fitness);
        state.best = Some(record);
        state.publishes += 1;
        info!(fitness, publishes = state.publishes, "new global best");

        if let Some(observer) = &self.observer {
            observer(&record);
        }
        true
    }

    /// Returns a copy of the current best, or `None` before the first publish.
    pub fn snapshot(&self) -> Option<BestRecord<D>> {
        self.lock().best
    }

    /// Number of times the best record has been replaced.
    pub fn publish_count(&self) -> u64 {
        self.lock().publishes
    }

    // The record is only assigned whole, so a panic elsewhere cannot leave it
    // torn and a poisoned lock is still safe to read.
    fn lock(&self) -> MutexGuard<'_, TrackerState<D>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<const D: usize> Default for SharedBestTracker<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> fmt::Debug for SharedBestTracker<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("SharedBestTracker")
            .field("best", &state.best)
            .field("publishes", &state.publishes)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
