use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use hillclimb::{
    benchmark::BenchmarkFunction,
    climber::Climber,
    config::RunConfiguration,
    control::SearchControl,
    launcher::{ClimbLauncher, RunSummary},
    objective::Objective,
    position::{BestRecord, Position},
    rng::RandomNumberGenerator,
    tracker::SharedBestTracker,
};

/// f(x) = -(x0 + x1 + ...), so every climber runs straight for a corner.
struct Escaping;

impl<const D: usize> Objective<D> for Escaping {
    fn evaluate(&self, position: &Position<D>) -> f64 {
        -position.components().iter().sum::<f64>()
    }

    fn bound(&self) -> f64 {
        1.0
    }
}

fn run_for<O, const D: usize>(
    launcher: ClimbLauncher<O, D>,
    control: Arc<SearchControl<D>>,
    duration: Duration,
) -> RunSummary<D>
where
    O: Objective<D> + 'static,
{
    let handle = launcher.launch(control).unwrap();
    thread::sleep(duration);
    handle.stop();
    handle.join().unwrap()
}

fn recording_control<const D: usize>() -> (Arc<SearchControl<D>>, Arc<Mutex<Vec<BestRecord<D>>>>) {
    let published = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&published);
    let tracker = SharedBestTracker::with_observer(move |record| {
        sink.lock().unwrap().push(*record);
    });
    (Arc::new(SearchControl::with_tracker(tracker)), published)
}

#[test]
fn test_single_climber_converges_on_sphere() {
    let config = RunConfiguration::<2>::from_args("1", "5").unwrap().with_seed(12345);
    assert_eq!(config.bound(), 5.12);

    let summary = run_for(
        ClimbLauncher::new(config),
        Arc::new(SearchControl::new()),
        Duration::from_millis(300),
    );

    let best = summary.best.unwrap();
    assert!(best.fitness < 1e-3, "best fitness {}", best.fitness);
    for &c in best.position.components() {
        assert!(c.abs() < 0.05, "component {}", c);
    }
    assert!(summary.total_evaluations() > 1000);
}

#[test]
fn test_snapshots_never_regress() {
    let config = RunConfiguration::<2>::new(4, BenchmarkFunction::Rastrigin).unwrap();
    let handle = ClimbLauncher::new(config)
        .launch(Arc::new(SearchControl::new()))
        .unwrap();

    let mut previous = f64::INFINITY;
    for _ in 0..200 {
        if let Some(best) = handle.status() {
            assert!(best.fitness <= previous, "{} after {}", best.fitness, previous);
            previous = best.fitness;
        }
        thread::sleep(Duration::from_micros(500));
    }

    handle.stop();
    let summary = handle.join().unwrap();
    assert!(summary.best.unwrap().fitness <= previous);
}

#[test]
fn test_published_positions_stay_in_bounds() {
    let (control, published) = recording_control::<2>();
    let config = RunConfiguration::<2>::new(8, BenchmarkFunction::EggHolder).unwrap();
    run_for(ClimbLauncher::new(config), control, Duration::from_millis(100));

    let published = published.lock().unwrap();
    assert!(!published.is_empty());
    assert!(published.iter().all(|r| r.position.within(512.0)));
    assert!(published.windows(2).all(|w| w[1].fitness < w[0].fitness));
}

#[test]
fn test_escaping_objective_never_publishes_outside() {
    let (control, published) = recording_control::<3>();
    let config = RunConfiguration::<3>::new(4, BenchmarkFunction::Sphere).unwrap();
    let summary = run_for(
        ClimbLauncher::with_objective(config, Escaping).unwrap(),
        control,
        Duration::from_millis(100),
    );

    assert!(summary.workers.iter().any(|w| w.starts > 1));
    let published = published.lock().unwrap();
    assert!(published.iter().all(|r| r.position.within(1.0)));
    if let Some(best) = summary.best {
        assert!(best.fitness >= -3.0);
    }
}

#[test]
fn test_no_lost_updates_for_any_worker_count() {
    for workers in 1..=8 {
        let config = RunConfiguration::<2>::new(workers, BenchmarkFunction::Sphere).unwrap();
        let summary = run_for(
            ClimbLauncher::new(config),
            Arc::new(SearchControl::new()),
            Duration::from_millis(40),
        );

        assert_eq!(summary.workers.len(), workers);
        let best = summary.best.expect("a best record after running");
        let best_worker = summary.best_worker_fitness().unwrap();
        assert_eq!(best.fitness, best_worker, "{} workers", workers);
        assert_eq!(
            best.fitness,
            BenchmarkFunction::Sphere.evaluate(&best.position),
            "torn record with {} workers",
            workers
        );
    }
}

#[test]
fn test_status_is_idempotent() {
    let config = RunConfiguration::<2>::new(2, BenchmarkFunction::Griewank).unwrap();
    let handle = ClimbLauncher::new(config)
        .launch(Arc::new(SearchControl::new()))
        .unwrap();
    thread::sleep(Duration::from_millis(30));
    handle.stop();

    let control = Arc::clone(handle.control());
    let summary = handle.join().unwrap();

    let first = control.request_status();
    let second = control.request_status();
    assert_eq!(first, second);
    assert_eq!(first, summary.best);
    assert!(control.is_cancelled());
}

fn seeded_climber(
    seed: u64,
    worker: usize,
) -> (
    Climber<BenchmarkFunction, RandomNumberGenerator, 2>,
    Arc<SearchControl<2>>,
) {
    let control = Arc::new(SearchControl::new());
    let sampler = RandomNumberGenerator::for_worker(seed, worker);
    let climber = Climber::new(worker, BenchmarkFunction::SumSquares, sampler, Arc::clone(&control));
    (climber, control)
}

#[test]
fn test_seeded_climber_is_reproducible() {
    let (mut first, first_control) = seeded_climber(77, 0);
    let (mut second, second_control) = seeded_climber(77, 0);

    for _ in 0..500 {
        assert_eq!(first.step(), second.step());
    }

    assert_eq!(first.report(), second.report());
    assert!(first.report().evaluations > 500);
    assert!(first_control.request_status().is_some());
    assert_eq!(first_control.request_status(), second_control.request_status());
}

#[test]
fn test_worker_index_changes_the_path() {
    let (mut first, first_control) = seeded_climber(77, 0);
    let (mut other, other_control) = seeded_climber(77, 1);

    for _ in 0..500 {
        first.step();
        other.step();
    }

    assert_ne!(first_control.request_status(), other_control.request_status());
}
