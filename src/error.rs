//! Crate-level error type for the evaluation layer.
//!
//! The numerical modules keep their own small `Copy` enums
//! ([`SpecialError`], [`StatsError`], [`OptimError`]); everything that takes a
//! [`Point`](crate::sample::Point) or [`Sample`](crate::sample::Sample) returns
//! this [`Error`], which wraps them.

use thiserror::Error;

use crate::optim::OptimError;
use crate::special::SpecialError;
use crate::stats::StatsError;

/// Error type for evaluators, copulas and persistence.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An argument violates the domain of the operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A point or sample has the wrong dimension.
    #[error("invalid dimension: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Declared input dimension.
        expected: usize,
        /// Dimension of the argument.
        got: usize,
    },

    /// One row of a batch failed; the batch produced no output.
    #[error("row {row}: {source}")]
    InvalidRow {
        /// Index of the first failing row, in input order.
        row: usize,
        /// Cause.
        #[source]
        source: Box<Error>,
    },

    /// A special function failed to converge or left its domain.
    #[error("special function: {0}")]
    Special(#[from] SpecialError),

    /// A distribution parameter is out of range.
    #[error("distribution: {0}")]
    Stats(#[from] StatsError),

    /// The root finder behind a quantile failed.
    #[error("root finding: {0}")]
    Root(#[from] OptimError),

    /// A persisted record does not match the component's schema.
    #[error("persisted state: {0}")]
    Persist(String),
}

impl Error {
    /// True for the argument-error family: bad arguments, wrong dimensions,
    /// failing batch rows and out-of-range parameters.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Error::InvalidArgument(_) | Error::DimensionMismatch { .. } | Error::Stats(_) => true,
            Error::InvalidRow { source, .. } => source.is_invalid_argument(),
            Error::Special(e) => *e == SpecialError::DomainError,
            Error::Root(_) | Error::Persist(_) => false,
        }
    }
}

/// Result alias for the evaluation layer.
pub type Result<T> = std::result::Result<T, Error>;
