//! # Error Types
//!
//! This module defines the error type for the hill climbing library. Every
//! failure the library can report is a configuration problem detected before
//! any climber starts, plus a small amount of process plumbing used by the
//! binary (signal registration).
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use hillclimb::error::{ClimbError, Result};
//!
//! fn pick_function(id: u32) -> Result<u32> {
//!     if (1..=8).contains(&id) {
//!         Ok(id)
//!     } else {
//!         Err(ClimbError::InvalidFunctionType(id.into()))
//!     }
//! }
//!
//! assert!(pick_function(9).is_err());
//! ```
//!
//! Using the `ResultExt` trait to add context to errors:
//!
//! ```rust
//! use hillclimb::error::{Result, ResultExt};
//!
//! fn parse_count(raw: &str) -> Result<u64> {
//!     raw.parse::<u64>().context("Failed to parse count")
//! }
//!
//! assert!(parse_count("four").is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while configuring or driving a run.
///
/// The `Display` text of the configuration variants is the message shown to
/// the user on the command line.
#[derive(Error, Debug)]
pub enum ClimbError {
    /// The command line did not carry exactly two positional values.
    #[error("Expected two arguments.")]
    ArgumentCount,

    /// More climbers were requested than the run supports.
    #[error("Too many climbers.")]
    TooManyClimbers(i64),

    /// Fewer than one climber was requested.
    #[error("Too few climbers.")]
    TooFewClimbers(i64),

    /// The benchmark function id is outside 1..=8.
    #[error("Invalid function type.")]
    InvalidFunctionType(i64),

    /// A custom objective's bound is not a finite positive number.
    #[error("Invalid bound: {0} (must be finite and positive).")]
    InvalidBound(f64),

    /// A positional value could not be read as an integer.
    #[error("Invalid {name}: '{value}' is not an integer.")]
    InvalidArgument { name: &'static str, value: String },

    /// Error that occurs when an I/O operation fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

impl ClimbError {
    /// Returns `true` for errors raised while validating a run configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ClimbError::ArgumentCount
                | ClimbError::TooManyClimbers(_)
                | ClimbError::TooFewClimbers(_)
                | ClimbError::InvalidFunctionType(_)
                | ClimbError::InvalidBound(_)
                | ClimbError::InvalidArgument { .. }
        )
    }
}

/// A specialized Result type for hill climbing operations.
pub type Result<T> = std::result::Result<T, ClimbError>;

/// Extension trait for Result to add context to errors.
///
/// This trait provides a convenient way to add context to errors when
/// converting from one error type to `ClimbError`.
pub trait ResultExt<T, E> {
    /// Adds context to an error, converting it to `ClimbError::Other`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| ClimbError::Other(format!("{}: {}", context, e)))
    }
}
