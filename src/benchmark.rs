//! # Benchmark Functions
//!
//! Eight classic minimization test functions. Each one is a single table
//! entry carrying its command-line id, its name, its canonical domain bound
//! and its evaluation, so selecting a function by id always selects the
//! matching bound.
//!
//! | id | function                | bound |
//! |----|-------------------------|-------|
//! | 1  | Egg Holder              | 512   |
//! | 2  | Schwefel                | 500   |
//! | 3  | Rastrigin               | 5.12  |
//! | 4  | Griewank                | 600   |
//! | 5  | Sphere                  | 5.12  |
//! | 6  | Dixon-Price             | 10    |
//! | 7  | Sum Squares             | 10    |
//! | 8  | Sum of Different Powers | 1     |
//!
//! ```rust
//! use hillclimb::benchmark::BenchmarkFunction;
//! use hillclimb::position::Position;
//!
//! let sphere = BenchmarkFunction::from_id(5).unwrap();
//! assert_eq!(sphere.bound(), 5.12);
//! assert_eq!(sphere.evaluate(&Position::new([3.0, 4.0])), 25.0);
//! ```

use std::f64::consts::PI;
use std::fmt;

use crate::error::{ClimbError, Result};
use crate::objective::Objective;
use crate::position::{BestRecord, Position};

/// The selectable benchmark functions, in command-line id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BenchmarkFunction {
    EggHolder,
    Schwefel,
    Rastrigin,
    Griewank,
    Sphere,
    DixonPrice,
    SumSquares,
    SumOfDifferentPowers,
}

struct Entry {
    name: &'static str,
    bound: f64,
    evaluate: fn(&[f64]) -> f64,
}

// Indexed by `id - 1`.
static ENTRIES: [Entry; 8] = [
    Entry {
        name: "Egg Holder",
        bound: 512.0,
        evaluate: egg_holder,
    },
    Entry {
        name: "Schwefel",
        bound: 500.0,
        evaluate: schwefel,
    },
    Entry {
        name: "Rastrigin",
        bound: 5.12,
        evaluate: rastrigin,
    },
    Entry {
        name: "Griewank",
        bound: 600.0,
        evaluate: griewank,
    },
    Entry {
        name: "Sphere",
        bound: 5.12,
        evaluate: sphere,
    },
    Entry {
        name: "Dixon-Price",
        bound: 10.0,
        evaluate: dixon_price,
    },
    Entry {
        name: "Sum Squares",
        bound: 10.0,
        evaluate: sum_squares,
    },
    Entry {
        name: "Sum of Different Powers",
        bound: 1.0,
        evaluate: sum_of_different_powers,
    },
];

impl BenchmarkFunction {
    /// All functions, in id order.
    pub const ALL: [BenchmarkFunction; 8] = [
        BenchmarkFunction::EggHolder,
        BenchmarkFunction::Schwefel,
        BenchmarkFunction::Rastrigin,
        BenchmarkFunction::Griewank,
        BenchmarkFunction::Sphere,
        BenchmarkFunction::DixonPrice,
        BenchmarkFunction::SumSquares,
        BenchmarkFunction::SumOfDifferentPowers,
    ];

    /// Looks up a function by its command-line id (1 through 8).
    ///
    /// # Errors
    ///
    /// Returns `ClimbError::InvalidFunctionType` for any other id.
    pub fn from_id(id: i64) -> Result<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|id| id.checked_sub(1))
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(ClimbError::InvalidFunctionType(id))
    }

    /// The command-line id of this function.
    pub fn id(self) -> u8 {
        self as u8 + 1
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Half-width of the canonical domain, identical in every dimension.
    pub fn bound(self) -> f64 {
        self.entry().bound
    }

    /// Evaluates the function at `position`. Lower is better.
    pub fn evaluate<const D: usize>(self, position: &Position<D>) -> f64 {
        (self.entry().evaluate)(position.components())
    }

    /// The published global minimum in `D` dimensions, where one is known.
    ///
    /// Egg Holder only has a published optimum for `D = 2`.
    pub fn global_minimum<const D: usize>(self) -> Option<BestRecord<D>> {
        let position = match self {
            BenchmarkFunction::EggHolder => {
                let mut components = [0.0; D];
                let [x0, x1] = &mut components[..] else {
                    return None;
                };
                *x0 = 512.0;
                *x1 = 404.2319;
                return Some(BestRecord::new(Position::new(components), -959.6407));
            }
            BenchmarkFunction::Schwefel => Position::new([420.9687; D]),
            BenchmarkFunction::DixonPrice => {
                let mut components = [0.0; D];
                for (i, c) in components.iter_mut().enumerate() {
                    let p = 2f64.powi(i as i32 + 1);
                    *c = 2f64.powf(-(p - 2.0) / p);
                }
                Position::new(components)
            }
            BenchmarkFunction::Rastrigin
            | BenchmarkFunction::Griewank
            | BenchmarkFunction::Sphere
            | BenchmarkFunction::SumSquares
            | BenchmarkFunction::SumOfDifferentPowers => Position::origin(),
        };
        Some(BestRecord::new(position, 0.0))
    }

    fn entry(self) -> &'static Entry {
        &ENTRIES[self as usize]
    }
}

impl fmt::Display for BenchmarkFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Implemented for every `D`. Calling `.bound()` or `.evaluate()` through a
// `&BenchmarkFunction` resolves to this trait before the inherent methods and
// leaves `D` ambiguous; copy the value out first (`|&f| f.bound()`).
impl<const D: usize> Objective<D> for BenchmarkFunction {
    fn evaluate(&self, position: &Position<D>) -> f64 {
        BenchmarkFunction::evaluate(*self, position)
    }

    fn bound(&self) -> f64 {
        BenchmarkFunction::bound(*self)
    }
}

fn egg_holder(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|pair| {
            let (a, b) = (pair[0], pair[1]);
            -(b + 47.0) * (a / 2.0 + b + 47.0).abs().sqrt().sin()
                - a * (a - b - 47.0).abs().sqrt().sin()
        })
        .sum()
}

fn schwefel(x: &[f64]) -> f64 {
    418.9829 * x.len() as f64 - x.iter().map(|xi| xi * xi.abs().sqrt().sin()).sum::<f64>()
}

fn rastrigin(x: &[f64]) -> f64 {
    10.0 * x.len() as f64
        + x.iter()
            .map(|xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
            .sum::<f64>()
}

fn griewank(x: &[f64]) -> f64 {
    let sum: f64 = x.iter().map(|xi| xi * xi / 4000.0).sum();
    let product: f64 = x
        .iter()
        .enumerate()
        .map(|(i, xi)| (xi / ((i + 1) as f64).sqrt()).cos())
        .product();
    sum - product + 1.0
}

fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|xi| xi * xi).sum()
}

fn dixon_price(x: &[f64]) -> f64 {
    let Some(first) = x.first() else {
        return 0.0;
    };
    let head = (first - 1.0).powi(2);
    let tail: f64 = x
        .windows(2)
        .enumerate()
        .map(|(i, pair)| (i + 2) as f64 * (2.0 * pair[1] * pair[1] - pair[0]).powi(2))
        .sum();
    head + tail
}

fn sum_squares(x: &[f64]) -> f64 {
    x.iter()
        .enumerate()
        .map(|(i, xi)| (i + 1) as f64 * xi * xi)
        .sum()
}

fn sum_of_different_powers(x: &[f64]) -> f64 {
    x.iter()
        .enumerate()
        .map(|(i, xi)| xi.abs().powi(i as i32 + 1))
        .sum()
}
