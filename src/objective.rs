//! # Objective Trait
//!
//! The `Objective` trait is the seam between the climbers and whatever they
//! minimize. The eight built-in [`BenchmarkFunction`](crate::benchmark::BenchmarkFunction)s
//! implement it, and so can any custom function:
//!
//! ```rust
//! use hillclimb::objective::Objective;
//! use hillclimb::position::Position;
//!
//! struct Shifted;
//!
//! impl<const D: usize> Objective<D> for Shifted {
//!     fn evaluate(&self, position: &Position<D>) -> f64 {
//!         position.components().iter().map(|x| (x - 1.0).powi(2)).sum()
//!     }
//!
//!     fn bound(&self) -> f64 {
//!         4.0
//!     }
//! }
//!
//! assert_eq!(Objective::<2>::evaluate(&Shifted, &Position::new([1.0, 1.0])), 0.0);
//! ```

use crate::error::{ClimbError, Result};
use crate::position::Position;

/// A function to minimize over the hyper-cube `[-bound, bound]^D`.
pub trait Objective<const D: usize>: Send + Sync {
    /// Returns the fitness of `position`. Lower is better.
    fn evaluate(&self, position: &Position<D>) -> f64;

    /// Half-width of the symmetric search domain.
    fn bound(&self) -> f64;
}

impl<const D: usize, O: Objective<D> + ?Sized> Objective<D> for &O {
    fn evaluate(&self, position: &Position<D>) -> f64 {
        (**self).evaluate(position)
    }

    fn bound(&self) -> f64 {
        (**self).bound()
    }
}

/// Decides whether `candidate` strictly improves on `current`.
///
/// A NaN candidate is never an improvement. Any other candidate improves on a
/// NaN current; otherwise the comparison is a strict `<`, so ties are not
/// improvements.
pub fn is_improvement(candidate: f64, current: f64) -> bool {
    if candidate.is_nan() {
        return false;
    }
    current.is_nan() || candidate < current
}

/// Checks that `bound` can span a search domain.
///
/// # Arguments
///
/// * `bound` - The half-width reported by an objective.
///
/// # Returns
///
/// The same bound, if it is finite and strictly positive.
///
/// # Errors
///
/// Returns `ClimbError::InvalidBound` for zero, negative, NaN or infinite
/// bounds. Sampling a start in `[-bound, bound]` is undefined for those.
pub fn check_bound(bound: f64) -> Result<f64> {
    if bound.is_finite() && bound > 0.0 {
        Ok(bound)
    } else {
        Err(ClimbError::InvalidBound(bound))
    }
}
