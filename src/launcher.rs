//! # ClimbLauncher
//!
//! Runs a configured number of climbers in parallel until the shared
//! [`SearchControl`] is cancelled.
//!
//! Climbers run on a dedicated `rayon` thread pool with exactly one thread
//! per climber, inside a `scope`; the scope returning is the signal that
//! every climber has terminated.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use std::time::Duration;
//!
//! use hillclimb::benchmark::BenchmarkFunction;
//! use hillclimb::config::RunConfiguration;
//! use hillclimb::control::SearchControl;
//! use hillclimb::launcher::ClimbLauncher;
//!
//! let config = RunConfiguration::<2>::new(2, BenchmarkFunction::Sphere).unwrap();
//! let handle = ClimbLauncher::new(config)
//!     .launch(Arc::new(SearchControl::new()))
//!     .unwrap();
//!
//! thread::sleep(Duration::from_millis(50));
//! handle.stop();
//!
//! let summary = handle.join().unwrap();
//! assert_eq!(summary.workers.len(), 2);
//! assert!(summary.best.is_some());
//! ```

use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rayon::ThreadPoolBuilder;
use tracing::info;

use crate::benchmark::BenchmarkFunction;
use crate::climber::{Climber, ClimberReport};
use crate::config::RunConfiguration;
use crate::control::SearchControl;
use crate::error::{ClimbError, Result, ResultExt};
use crate::objective::{check_bound, Objective};
use crate::position::BestRecord;
use crate::rng::{time_seed, RandomNumberGenerator};

/// The outcome of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary<const D: usize> {
    /// The best record at the moment the last climber stopped.
    pub best: Option<BestRecord<D>>,
    /// One report per climber, ordered by worker index.
    pub workers: Vec<ClimberReport>,
    /// Base seed every climber's generator was derived from.
    pub seed: u64,
    /// Wall-clock time from launch until every climber stopped.
    pub elapsed: Duration,
}

impl<const D: usize> RunSummary<D> {
    /// Objective evaluations across all climbers.
    pub fn total_evaluations(&self) -> u64 {
        self.workers.iter().map(|w| w.evaluations).sum()
    }

    /// The lowest fitness any single climber offered to the tracker.
    pub fn best_worker_fitness(&self) -> Option<f64> {
        self.workers
            .iter()
            .filter_map(|w| w.best_fitness)
            .min_by(f64::total_cmp)
    }
}

/// Starts and joins the climbers of one run.
#[derive(Debug, Clone)]
pub struct ClimbLauncher<O, const D: usize> {
    config: RunConfiguration<D>,
    objective: O,
}

impl<const D: usize> ClimbLauncher<BenchmarkFunction, D> {
    /// Creates a launcher for the configured benchmark function.
    pub fn new(config: RunConfiguration<D>) -> Self {
        Self {
            objective: config.function(),
            config,
        }
    }
}

impl<O, const D: usize> ClimbLauncher<O, D>
where
    O: Objective<D>,
{
    /// Creates a launcher that minimizes a custom objective.
    ///
    /// The search domain comes from `objective.bound()`; the function named in
    /// `config` is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ClimbError::InvalidBound` if the objective's bound is not
    /// finite and positive.
    pub fn with_objective(config: RunConfiguration<D>, objective: O) -> Result<Self> {
        check_bound(objective.bound())?;
        Ok(Self { config, objective })
    }

    pub fn config(&self) -> &RunConfiguration<D> {
        &self.config
    }

    /// Runs every climber until `control` is cancelled, then returns the summary.
    ///
    /// This blocks the calling thread. Cancel from another thread or a signal
    /// handler.
    ///
    /// # Arguments
    ///
    /// * `control` - Cancellation flag and best tracker shared by every climber.
    ///   Status requests made on it while the run is going see live results.
    ///
    /// # Returns
    ///
    /// A `RunSummary` with the final best record, one report per climber
    /// ordered by worker index, the base seed and the elapsed time.
    ///
    /// # Errors
    ///
    /// Returns an error if the climber thread pool cannot be created.
    pub fn run(&self, control: &Arc<SearchControl<D>>) -> Result<RunSummary<D>> {
        let worker_count = self.config.worker_count();
        let seed = self.config.seed().unwrap_or_else(time_seed);
        let started = Instant::now();

        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|index| format!("climber-{}", index))
            .build()
            .context("Failed to build climber thread pool")?;

        info!(
            workers = worker_count,
            dimensions = D,
            bound = self.objective.bound(),
            seed,
            "starting run"
        );

        let (sender, receiver) = mpsc::channel();
        pool.scope(|scope| {
            for worker in 0..worker_count {
                let sender = sender.clone();
                let control = Arc::clone(control);
                let objective = &self.objective;
                scope.spawn(move |_| {
                    let sampler = RandomNumberGenerator::for_worker(seed, worker);
                    let report = Climber::new(worker, objective, sampler, control).run();
                    // the receiver outlives the scope
                    let _ = sender.send(report);
                });
            }
        });
        drop(sender);

        let mut workers: Vec<ClimberReport> = receiver.into_iter().collect();
        workers.sort_by_key(|report| report.worker);

        let summary = RunSummary {
            best: control.tracker().snapshot(),
            workers,
            seed,
            elapsed: started.elapsed(),
        };
        info!(
            fitness = summary.best.map(|b| b.fitness),
            evaluations = summary.total_evaluations(),
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "run finished"
        );
        Ok(summary)
    }
}

impl<O, const D: usize> ClimbLauncher<O, D>
where
    O: Objective<D> + 'static,
{
    /// Starts the run on a background thread and returns a handle to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the background thread cannot be spawned.
    pub fn launch(self, control: Arc<SearchControl<D>>) -> Result<RunHandle<D>> {
        let run_control = Arc::clone(&control);
        let thread = thread::Builder::new()
            .name("climb-launcher".to_string())
            .spawn(move || self.run(&run_control))?;

        Ok(RunHandle { control, thread })
    }
}

/// A run in progress on a background thread.
#[derive(Debug)]
pub struct RunHandle<const D: usize> {
    control: Arc<SearchControl<D>>,
    thread: JoinHandle<Result<RunSummary<D>>>,
}

impl<const D: usize> RunHandle<D> {
    /// Asks every climber to stop. Does not wait.
    pub fn stop(&self) {
        self.control.request_stop();
    }

    /// The current best, while the run continues.
    pub fn status(&self) -> Option<BestRecord<D>> {
        self.control.request_status()
    }

    pub fn control(&self) -> &Arc<SearchControl<D>> {
        &self.control
    }

    /// Waits for every climber to terminate and returns the summary.
    ///
    /// Call [`stop`](Self::stop) first, or this waits forever.
    pub fn join(self) -> Result<RunSummary<D>> {
        self.thread
            .join()
            .map_err(|_| ClimbError::Other("climb launcher thread panicked".to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn test_summary_aggregates_workers() {
        let summary = RunSummary::<2> {
            best: Some(BestRecord::new(Position::new([0.0, 0.1]), 0.01)),
            workers: vec![
                ClimberReport {
                    worker: 0,
                    evaluations: 10,
                    best_fitness: Some(0.5),
                    ..ClimberReport::default()
                },
                ClimberReport {
                    worker: 1,
                    evaluations: 32,
                    best_fitness: Some(0.01),
                    ..ClimberReport::default()
                },
                ClimberReport {
                    worker: 2,
                    ..ClimberReport::default()
                },
            ],
            seed: 1,
            elapsed: Duration::from_millis(3),
        };

        assert_eq!(summary.total_evaluations(), 42);
        assert_eq!(summary.best_worker_fitness(), Some(0.01));
    }

    #[test]
    fn test_run_returns_after_stop() {
        let config = RunConfiguration::<2>::new(3, BenchmarkFunction::SumSquares)
            .unwrap()
            .with_seed(17);
        let control = Arc::new(SearchControl::new());

        let stopper = {
            let control = Arc::clone(&control);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(30));
                control.request_stop();
            })
        };

        let summary = ClimbLauncher::new(config).run(&control).unwrap();
        stopper.join().unwrap();

        assert_eq!(summary.seed, 17);
        let workers: Vec<usize> = summary.workers.iter().map(|w| w.worker).collect();
        assert_eq!(workers, vec![0, 1, 2]);
        assert_eq!(summary.best, control.request_status());
    }

    /// 1-D objective with a configurable bound.
    struct Flat(f64);

    impl Objective<1> for Flat {
        fn evaluate(&self, position: &Position<1>) -> f64 {
            position[0].abs()
        }

        fn bound(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_custom_objective_bound_is_validated() {
        let config = RunConfiguration::<1>::new(2, BenchmarkFunction::Sphere).unwrap();

        for bad in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            match ClimbLauncher::with_objective(config, Flat(bad)) {
                Err(ClimbError::InvalidBound(_)) => {}
                other => panic!("Expected InvalidBound for {}, got {:?}", bad, other.map(|_| ())),
            }
        }

        let launcher = ClimbLauncher::with_objective(config.with_seed(3), Flat(2.0)).unwrap();
        let control = Arc::new(SearchControl::new());
        control.request_stop();
        let summary = launcher.run(&control).unwrap();
        assert_eq!(summary.workers.len(), 2);
    }

    #[test]
    fn test_stopped_before_launch() {
        let config = RunConfiguration::<3>::new(4, BenchmarkFunction::Rastrigin).unwrap();
        let control = Arc::new(SearchControl::new());
        control.request_stop();

        let summary = ClimbLauncher::new(config).run(&control).unwrap();

        assert!(summary.best.is_none());
        assert_eq!(summary.total_evaluations(), 0);
        assert_eq!(summary.workers.len(), 4);
    }
}
