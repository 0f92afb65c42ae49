use rand::RngCore;

use crate::FloatScalar;
use crate::distfunc::{dnormal, pnormal, qnormal, rnormal};
use super::{ContinuousDistribution, StatsError};

/// Normal (Gaussian) distribution N(μ, σ²).
///
/// # Example
///
/// ```
/// use uqkit::stats::{Normal, ContinuousDistribution};
///
/// let n = Normal::new(0.0_f64, 1.0).unwrap();
/// assert!((n.cdf(0.0) - 0.5).abs() < 1e-14);
/// assert!((n.quantile(0.975) - 1.959963984540054).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Normal<T> {
    mu: T,
    sigma: T,
}

impl<T: FloatScalar> Normal<T> {
    /// Create a normal distribution with mean `mu` and standard deviation `sigma`.
    ///
    /// Requires `sigma > 0` and a finite `mu`.
    pub fn new(mu: T, sigma: T) -> Result<Self, StatsError> {
        if !(sigma > T::zero()) || !sigma.is_finite() || !mu.is_finite() {
            return Err(StatsError::InvalidParameter);
        }
        Ok(Self { mu, sigma })
    }

    /// Standard normal N(0, 1).
    pub fn standard() -> Self {
        Self { mu: T::zero(), sigma: T::one() }
    }

    /// Mean μ.
    pub fn mu(&self) -> T {
        self.mu
    }

    /// Standard deviation σ.
    pub fn sigma(&self) -> T {
        self.sigma
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for Normal<T> {
    fn pdf(&self, x: T) -> T {
        dnormal((x - self.mu) / self.sigma) / self.sigma
    }

    fn ln_pdf(&self, x: T) -> T {
        let two = T::lit(2.0);
        let z = (x - self.mu) / self.sigma;
        -self.sigma.ln() - T::lit(0.918_938_533_204_672_8) - z * z / two
    }

    fn cdf(&self, x: T) -> T {
        pnormal((x - self.mu) / self.sigma, false)
    }

    fn complementary_cdf(&self, x: T) -> T {
        pnormal((x - self.mu) / self.sigma, true)
    }

    fn quantile(&self, p: T) -> T {
        if p == T::zero() {
            return T::neg_infinity();
        }
        if p == T::one() {
            return T::infinity();
        }
        qnormal(p, false).map_or(T::nan(), |z| self.mu + self.sigma * z)
    }

    fn mean(&self) -> T {
        self.mu
    }

    fn variance(&self) -> T {
        self.sigma * self.sigma
    }

    fn realization(&self, rng: &mut dyn RngCore) -> T {
        self.mu + self.sigma * rnormal::<T, _>(rng)
    }
}
