//! Parametric continuous distributions.
//!
//! Each distribution validates its parameters at construction (and in every
//! setter), then evaluates through the scalar functions in
//! [`crate::distfunc`]. The [`ContinuousDistribution`] trait is object safe so
//! that copulas and composed distributions can hold heterogeneous marginals.
//!
//! | Distribution | Parameters | Support |
//! |---|---|---|
//! | [`Normal`] | mean μ, std dev σ | (−∞, ∞) |
//! | [`StudentT`] | degrees of freedom ν, location μ, scale σ | (−∞, ∞) |
//! | [`Pareto`] | scale β, shape α, location γ | [γ + β, ∞) |
//!
//! # Example
//!
//! ```
//! use uqkit::stats::{ContinuousDistribution, StudentT};
//!
//! let t = StudentT::new(10.0_f64).unwrap();
//! assert!((t.cdf(0.0) - 0.5).abs() < 1e-15);
//! assert!((t.variance() - 10.0 / 8.0).abs() < 1e-14);
//! ```

mod normal;
mod pareto;
mod student_t;


pub use normal::Normal;
pub use pareto::Pareto;
pub use student_t::StudentT;

use rand::RngCore;

/// Errors from distribution construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatsError {
    /// A parameter is out of its valid range.
    InvalidParameter,
}

impl core::fmt::Display for StatsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StatsError::InvalidParameter => {
                write!(f, "distribution parameter out of valid range")
            }
        }
    }
}

impl std::error::Error for StatsError {}

/// Trait for continuous probability distributions.
pub trait ContinuousDistribution<T> {
    /// Probability density function.
    fn pdf(&self, x: T) -> T;
    /// Natural log of the probability density function.
    fn ln_pdf(&self, x: T) -> T;
    /// Cumulative distribution function P(X ≤ x).
    fn cdf(&self, x: T) -> T;
    /// Survival function P(X > x), computed without subtracting from one.
    fn complementary_cdf(&self, x: T) -> T;
    /// Quantile function (inverse CDF). Returns x such that P(X ≤ x) = p.
    ///
    /// `p = 0` and `p = 1` map to the ends of the support; other values
    /// outside `(0, 1)` give NaN.
    fn quantile(&self, p: T) -> T;
    /// Expected value E\[X\]; NaN or infinity where it does not exist.
    fn mean(&self) -> T;
    /// Variance Var(X); NaN or infinity where it does not exist.
    fn variance(&self) -> T;
    /// Draw one value from the given generator.
    fn realization(&self, rng: &mut dyn RngCore) -> T;
}
