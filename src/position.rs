//! # Positions and Records
//!
//! A [`Position`] is a point in the `D`-dimensional search space. It is a
//! small `Copy` value; moving through the space always produces a fresh
//! position rather than mutating one in place.
//!
//! A [`BestRecord`] pairs a position with its fitness and renders itself the
//! way the command line reports results:
//!
//! ```rust
//! use hillclimb::position::{BestRecord, Position};
//!
//! let record = BestRecord::new(Position::new([1.5, -2.0]), 6.25);
//! assert_eq!(record.to_string(), "f(1.5, -2) = 6.25");
//! ```

use std::fmt;
use std::ops::Index;

/// A point in the search space with `D` real components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position<const D: usize> {
    components: [f64; D],
}

impl<const D: usize> Position<D> {
    /// Creates a position from its components.
    pub fn new(components: [f64; D]) -> Self {
        Self { components }
    }

    /// The all-zero position.
    pub fn origin() -> Self {
        Self {
            components: [0.0; D],
        }
    }

    /// Returns the components as a slice.
    pub fn components(&self) -> &[f64; D] {
        &self.components
    }

    /// Returns a new position offset componentwise by `offset`.
    pub fn translate(&self, offset: &Position<D>) -> Self {
        let mut components = self.components;
        for (c, o) in components.iter_mut().zip(offset.components.iter()) {
            *c += o;
        }
        Self { components }
    }

    /// Returns `true` if every component lies in `[-bound, bound]`.
    ///
    /// A NaN component is never within bounds.
    pub fn within(&self, bound: f64) -> bool {
        self.components
            .iter()
            .all(|c| (-bound..=bound).contains(c))
    }
}

impl<const D: usize> Default for Position<D> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<const D: usize> From<[f64; D]> for Position<D> {
    fn from(components: [f64; D]) -> Self {
        Self::new(components)
    }
}

impl<const D: usize> Index<usize> for Position<D> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.components[index]
    }
}

impl<const D: usize> fmt::Display for Position<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<const D: usize> serde::Serialize for Position<D> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeTuple;

        let mut tuple = serializer.serialize_tuple(D)?;
        for c in &self.components {
            tuple.serialize_element(c)?;
        }
        tuple.end()
    }
}

/// The best point found so far, together with its fitness.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BestRecord<const D: usize> {
    /// Where the fitness was measured.
    pub position: Position<D>,
    /// The fitness at `position`. Lower is better.
    pub fitness: f64,
}

impl<const D: usize> BestRecord<D> {
    pub fn new(position: Position<D>, fitness: f64) -> Self {
        Self { position, fitness }
    }
}

impl<const D: usize> fmt::Display for BestRecord<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f({}) = {}", self.position, self.fitness)
    }
}
