//! # Search Control
//!
//! `SearchControl` is the state every climber of a run shares: the
//! cancellation flag and the best-record tracker. It is created once per run
//! and handed to each climber behind an `Arc`.
//!
//! Stopping is cooperative. `request_stop` only raises a flag; each climber
//! notices it before its next batch of neighbors, and the launcher waits for
//! every climber to finish.
//!
//! ```rust
//! use hillclimb::control::SearchControl;
//!
//! let control = SearchControl::<2>::new();
//! assert!(control.request_status().is_none());
//!
//! control.request_stop();
//! control.request_stop();
//! assert!(control.is_cancelled());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::position::BestRecord;
use crate::tracker::SharedBestTracker;

#[derive(Debug, Default)]
pub struct SearchControl<const D: usize> {
    cancelled: AtomicBool,
    tracker: SharedBestTracker<D>,
}

impl<const D: usize> SearchControl<D> {
    /// Creates an uncancelled control with an empty tracker.
    pub fn new() -> Self {
        Self::with_tracker(SharedBestTracker::new())
    }

    /// Creates a control around an existing tracker, for example one with an
    /// observer attached.
    pub fn with_tracker(tracker: SharedBestTracker<D>) -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            tracker,
        }
    }

    /// Asks every climber to stop. Calling it again has no further effect.
    pub fn request_stop(&self) {
        if !self.cancelled.swap(true, Ordering::AcqRel) {
            info!("stop requested");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Returns the current best without disturbing the run.
    pub fn request_status(&self) -> Option<BestRecord<D>> {
        let best = self.tracker.snapshot();
        debug!(fitness = best.map(|b| b.fitness), "status requested");
        best
    }

    pub fn tracker(&self) -> &SharedBestTracker<D> {
        &self.tracker
    }
}
