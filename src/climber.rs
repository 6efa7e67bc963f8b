//! # Climber
//!
//! A `Climber` is one independent stochastic hill climber. It runs a small
//! state machine until the run is cancelled:
//!
//! - **Restart**: sample a start uniformly in `[-bound, bound]^D` and evaluate it.
//! - **Searching**: evaluate a batch of four neighbors, each the current
//!   position plus an offset drawn uniformly from `[-radius, radius]^D`. A
//!   neighbor that strictly improves on the current fitness replaces the
//!   current position immediately, so later neighbors in the same batch are
//!   generated around it and must beat it. If the position is still inside
//!   the bound after the batch it is offered to the shared tracker and the
//!   search continues; otherwise the climber restarts.
//! - **Terminated**: entered once cancellation is observed, at the latest
//!   before the next batch.
//!
//! A climber owns its sampler and only touches shared state to publish and
//! to check the cancellation flag.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::{NEIGHBORS, PERTURBATION_FRACTION};
use crate::control::SearchControl;
use crate::objective::{is_improvement, Objective};
use crate::position::Position;
use crate::rng::PositionSampler;

/// Where a climber is in its restart/search cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClimberState<const D: usize> {
    /// About to sample a fresh start.
    Restart,
    /// Exploring around `position`, whose fitness is `fitness`.
    Searching { position: Position<D>, fitness: f64 },
    /// Stopped after observing cancellation.
    Terminated,
}

/// What one climber did over its lifetime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClimberReport {
    /// Index of the climber within its run.
    pub worker: usize,
    /// Number of fresh starts sampled, including the first.
    pub starts: u64,
    /// Number of neighbor batches evaluated.
    pub batches: u64,
    /// Number of objective evaluations, starts included.
    pub evaluations: u64,
    /// Lowest in-bound fitness this climber offered to the tracker.
    pub best_fitness: Option<f64>,
}

pub struct Climber<O, S, const D: usize> {
    worker: usize,
    objective: O,
    sampler: S,
    control: Arc<SearchControl<D>>,
    bound: f64,
    radius: f64,
    state: ClimberState<D>,
    report: ClimberReport,
}

impl<O, S, const D: usize> Climber<O, S, D>
where
    O: Objective<D>,
    S: PositionSampler<D>,
{
    /// Creates a climber in the `Restart` state.
    ///
    /// # Arguments
    ///
    /// * `worker` - Index of this climber within its run, carried into logs and
    ///   the report.
    /// * `objective` - The function to minimize. Its `bound()` must be finite
    ///   and positive; see [`check_bound`](crate::objective::check_bound).
    /// * `sampler` - Source of starts and neighbor offsets, owned by this climber.
    /// * `control` - Cancellation flag and best tracker shared with the run.
    ///
    /// # Returns
    ///
    /// A climber that has not sampled anything yet. Drive it with
    /// [`step`](Self::step) or [`run`](Self::run).
    pub fn new(worker: usize, objective: O, sampler: S, control: Arc<SearchControl<D>>) -> Self {
        let bound = objective.bound();
        Self {
            worker,
            objective,
            sampler,
            control,
            bound,
            radius: bound * PERTURBATION_FRACTION,
            state: ClimberState::Restart,
            report: ClimberReport {
                worker,
                ..ClimberReport::default()
            },
        }
    }

    /// The state reached by the last transition.
    pub fn state(&self) -> &ClimberState<D> {
        &self.state
    }

    pub fn report(&self) -> &ClimberReport {
        &self.report
    }

    /// Performs one state transition and returns the new state.
    pub fn step(&mut self) -> &ClimberState<D> {
        if self.control.is_cancelled() {
            if self.state != ClimberState::Terminated {
                debug!(worker = self.worker, "climber observed cancellation");
            }
            self.state = ClimberState::Terminated;
            return &self.state;
        }

        let current = self.state;
        self.state = match current {
            ClimberState::Restart => self.restart(),
            ClimberState::Searching { position, fitness } => self.search(position, fitness),
            ClimberState::Terminated => ClimberState::Terminated,
        };
        &self.state
    }

    /// Steps until cancelled and returns the lifetime report.
    pub fn run(mut self) -> ClimberReport {
        debug!(worker = self.worker, bound = self.bound, "climber started");

        while *self.step() != ClimberState::Terminated {}

        debug!(
            worker = self.worker,
            starts = self.report.starts,
            batches = self.report.batches,
            "climber terminated"
        );
        self.report
    }

    fn restart(&mut self) -> ClimberState<D> {
        let position = self.sampler.sample(-self.bound, self.bound);
        let fitness = self.objective.evaluate(&position);
        self.report.starts += 1;
        self.report.evaluations += 1;

        trace!(worker = self.worker, fitness, "sampled start");
        ClimberState::Searching { position, fitness }
    }

    fn search(&mut self, mut position: Position<D>, mut fitness: f64) -> ClimberState<D> {
        for _ in 0..NEIGHBORS {
            let offset = self.sampler.sample(-self.radius, self.radius);
            let candidate = position.translate(&offset);
            let candidate_fitness = self.objective.evaluate(&candidate);
            self.report.evaluations += 1;

            if is_improvement(candidate_fitness, fitness) {
                position = candidate;
                fitness = candidate_fitness;
            }
        }
        self.report.batches += 1;
        trace!(worker = self.worker, batch = self.report.batches, fitness, "batch evaluated");

        if !position.within(self.bound) {
            debug!(worker = self.worker, starts = self.report.starts, "left the bound, restarting");
            return ClimberState::Restart;
        }

        self.control.tracker().try_publish(position, fitness);
        let improved_local = match self.report.best_fitness {
            Some(best) => is_improvement(fitness, best),
            None => !fitness.is_nan(),
        };
        if improved_local {
            self.report.best_fitness = Some(fitness);
        }

        ClimberState::Searching { position, fitness }
    }
}
