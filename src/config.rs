//! # RunConfiguration
//!
//! The `RunConfiguration` struct holds everything fixed for the lifetime of a
//! run: how many climbers, which benchmark function (and so which bound), and
//! an optional seed. It is validated once, before any climber starts.
//!
//! ## Example
//!
//! ```rust
//! use hillclimb::benchmark::BenchmarkFunction;
//! use hillclimb::config::RunConfiguration;
//!
//! let config = RunConfiguration::<2>::builder()
//!     .worker_count(4)
//!     .function(BenchmarkFunction::Rastrigin)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.bound(), 5.12);
//! assert!((config.perturbation_radius() - 0.512).abs() < 1e-12);
//!
//! // The command line hands over the raw positional values.
//! let from_cli = RunConfiguration::<2>::from_args("9", "5");
//! assert_eq!(from_cli.unwrap_err().to_string(), "Too many climbers.");
//! ```

use crate::benchmark::BenchmarkFunction;
use crate::error::{ClimbError, Result};

/// Fewest climbers a run may use.
pub const MIN_CLIMBERS: usize = 1;
/// Most climbers a run may use.
pub const MAX_CLIMBERS: usize = 8;
/// Neighbors evaluated per search batch.
pub const NEIGHBORS: usize = 4;
/// Perturbation radius as a fraction of the bound.
pub const PERTURBATION_FRACTION: f64 = 0.10;

/// Validated, immutable settings for one run in `D` dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfiguration<const D: usize> {
    worker_count: usize,
    function: BenchmarkFunction,
    seed: Option<u64>,
}

impl<const D: usize> RunConfiguration<D> {
    /// Creates a configuration after validating the worker count.
    ///
    /// # Errors
    ///
    /// Returns `TooFewClimbers` or `TooManyClimbers` when `worker_count` is
    /// outside `MIN_CLIMBERS..=MAX_CLIMBERS`.
    pub fn new(worker_count: usize, function: BenchmarkFunction) -> Result<Self> {
        Self::builder()
            .worker_count(worker_count)
            .function(function)
            .build()
    }

    /// Parses and validates the two positional command-line values.
    ///
    /// # Arguments
    ///
    /// * `workers` - Raw climber count, expected in `1..=8`.
    /// * `function` - Raw benchmark function id, expected in `1..=8`.
    ///
    /// # Returns
    ///
    /// A configuration without a seed. The climber count is checked before the
    /// function id, so `("12", "0")` reports too many climbers.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if either value is not an integer.
    /// - `TooFewClimbers`/`TooManyClimbers` for a worker count outside 1..=8.
    /// - `InvalidFunctionType` for a function id outside 1..=8.
    pub fn from_args(workers: &str, function: &str) -> Result<Self> {
        let workers = parse_integer("climber count", workers)?;
        let function = parse_integer("function type", function)?;

        let worker_count = check_worker_count(workers)?;
        let function = BenchmarkFunction::from_id(function)?;

        Ok(Self {
            worker_count,
            function,
            seed: None,
        })
    }

    pub fn builder() -> RunConfigurationBuilder<D> {
        RunConfigurationBuilder::default()
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn function(&self) -> BenchmarkFunction {
        self.function
    }

    /// The configured seed, if the run should be reproducible.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Number of dimensions searched.
    pub fn dimensions(&self) -> usize {
        D
    }

    /// Half-width of the search domain, taken from the function.
    pub fn bound(&self) -> f64 {
        self.function.bound()
    }

    /// Half-width of the neighbor perturbation, 10% of the bound.
    pub fn perturbation_radius(&self) -> f64 {
        self.bound() * PERTURBATION_FRACTION
    }

    pub fn neighbors(&self) -> usize {
        NEIGHBORS
    }

    /// Returns a copy of this configuration with `seed` fixed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Builder for `RunConfiguration`.
///
/// Defaults to one climber on the Egg Holder function with a clock seed.
#[derive(Debug, Clone)]
pub struct RunConfigurationBuilder<const D: usize> {
    worker_count: Option<usize>,
    function: Option<BenchmarkFunction>,
    seed: Option<u64>,
}

impl<const D: usize> Default for RunConfigurationBuilder<D> {
    fn default() -> Self {
        Self {
            worker_count: None,
            function: None,
            seed: None,
        }
    }
}

impl<const D: usize> RunConfigurationBuilder<D> {
    /// Sets the number of climbers.
    pub fn worker_count(mut self, value: usize) -> Self {
        self.worker_count = Some(value);
        self
    }

    /// Sets the benchmark function.
    pub fn function(mut self, value: BenchmarkFunction) -> Self {
        self.function = Some(value);
        self
    }

    /// Sets the base seed for every climber's generator.
    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Validates and builds the `RunConfiguration`.
    pub fn build(self) -> Result<RunConfiguration<D>> {
        let requested = self.worker_count.unwrap_or(MIN_CLIMBERS);
        let worker_count =
            check_worker_count(i64::try_from(requested).unwrap_or(i64::MAX))?;

        Ok(RunConfiguration {
            worker_count,
            function: self.function.unwrap_or(BenchmarkFunction::EggHolder),
            seed: self.seed,
        })
    }
}

fn parse_integer(name: &'static str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ClimbError::InvalidArgument {
            name,
            value: raw.to_string(),
        })
}

fn check_worker_count(requested: i64) -> Result<usize> {
    if requested > MAX_CLIMBERS as i64 {
        return Err(ClimbError::TooManyClimbers(requested));
    }
    if requested < MIN_CLIMBERS as i64 {
        return Err(ClimbError::TooFewClimbers(requested));
    }
    Ok(requested as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args_valid() {
        let config = RunConfiguration::<2>::from_args("3", "4").unwrap();
        assert_eq!(config.worker_count(), 3);
        assert_eq!(config.function(), BenchmarkFunction::Griewank);
        assert_eq!(config.bound(), 600.0);
        assert!((config.perturbation_radius() - 60.0).abs() < 1e-12);
        assert_eq!(config.seed(), None);
        assert_eq!(config.neighbors(), 4);
        assert_eq!(config.dimensions(), 2);
    }

    #[test]
    fn test_worker_count_limits() {
        assert!(RunConfiguration::<2>::from_args("1", "5").is_ok());
        assert!(RunConfiguration::<2>::from_args("8", "5").is_ok());

        match RunConfiguration::<2>::from_args("9", "5") {
            Err(ClimbError::TooManyClimbers(9)) => {}
            other => panic!("Expected TooManyClimbers, got {:?}", other),
        }
        match RunConfiguration::<2>::from_args("0", "5") {
            Err(ClimbError::TooFewClimbers(0)) => {}
            other => panic!("Expected TooFewClimbers, got {:?}", other),
        }
        match RunConfiguration::<2>::from_args("-3", "5") {
            Err(ClimbError::TooFewClimbers(-3)) => {}
            other => panic!("Expected TooFewClimbers, got {:?}", other),
        }
    }

    #[test]
    fn test_function_id_limits() {
        for raw in ["0", "9"] {
            let err = RunConfiguration::<2>::from_args("1", raw).unwrap_err();
            assert_eq!(err.to_string(), "Invalid function type.");
        }
    }

    #[test]
    fn test_climbers_checked_before_function() {
        let err = RunConfiguration::<2>::from_args("12", "0").unwrap_err();
        assert!(matches!(err, ClimbError::TooManyClimbers(12)));
    }

    #[test]
    fn test_non_integer_arguments() {
        let err = RunConfiguration::<2>::from_args("two", "5").unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(err, ClimbError::InvalidArgument { name: "climber count", .. }));

        let err = RunConfiguration::<2>::from_args("2", "5.5").unwrap_err();
        assert!(matches!(err, ClimbError::InvalidArgument { name: "function type", .. }));
    }

    #[test]
    fn test_builder_defaults_and_validation() {
        let config = RunConfiguration::<3>::builder().build().unwrap();
        assert_eq!(config.worker_count(), 1);
        assert_eq!(config.function(), BenchmarkFunction::EggHolder);

        let err = RunConfiguration::<3>::builder().worker_count(0).build();
        assert!(matches!(err, Err(ClimbError::TooFewClimbers(0))));

        let err = RunConfiguration::<3>::new(usize::MAX, BenchmarkFunction::Sphere);
        assert!(matches!(err, Err(ClimbError::TooManyClimbers(_))));
    }

    #[test]
    fn test_with_seed() {
        let config = RunConfiguration::<2>::new(2, BenchmarkFunction::Sphere)
            .unwrap()
            .with_seed(5);
        assert_eq!(config.seed(), Some(5));
    }
}
