//! Scalar root finding.
//!
//! [`brent`] is the bracketed solver behind every iterative quantile in
//! [`crate::distfunc`]: bisection safety with secant / inverse quadratic
//! interpolation speed, and a tolerance that scales with the root so that
//! quantiles far in the tails are resolved to relative precision.

mod root;

#[cfg(test)]
mod tests;

pub use root::{brent, RootSettings};

/// Errors from root finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimError {
    /// Maximum number of iterations exceeded.
    MaxIterations,
    /// Bracket endpoints do not have opposite signs.
    BracketInvalid,
    /// A computed value was NaN or infinity.
    NotFinite,
}

impl core::fmt::Display for OptimError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OptimError::MaxIterations => write!(f, "maximum iterations exceeded"),
            OptimError::BracketInvalid => write!(f, "bracket endpoints must have opposite signs"),
            OptimError::NotFinite => write!(f, "computed value is NaN or infinity"),
        }
    }
}

impl std::error::Error for OptimError {}

/// Result of a scalar root-finding algorithm.
#[derive(Debug, Clone, Copy)]
pub struct RootResult<T> {
    /// Approximate root.
    pub x: T,
    /// Function value at the root: `f(x)`.
    pub fx: T,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Number of function evaluations.
    pub evals: usize,
}
