use rand::RngCore;

use crate::FloatScalar;
use crate::distfunc::{dstudent, pstudent, qstudent, rstudent};
use super::{ContinuousDistribution, StatsError};

/// Student's t-distribution with ν degrees of freedom, location μ and scale σ.
///
/// # Example
///
/// ```
/// use uqkit::stats::{StudentT, ContinuousDistribution};
///
/// let t = StudentT::new(10.0_f64).unwrap();
/// assert!((t.mean()).abs() < 1e-14);
/// assert!((t.variance() - 10.0/8.0).abs() < 1e-14);
///
/// let shifted = StudentT::with_location_scale(3.0_f64, 1.0, 2.0).unwrap();
/// assert!((shifted.cdf(1.0) - 0.5).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StudentT<T> {
    nu: T, // ν > 0
    mu: T,
    sigma: T, // σ > 0
}

impl<T: FloatScalar> StudentT<T> {
    /// Standard Student's t-distribution with `nu` degrees of freedom. Requires `nu > 0`.
    pub fn new(nu: T) -> Result<Self, StatsError> {
        Self::with_location_scale(nu, T::zero(), T::one())
    }

    /// Location-scale Student's t-distribution. Requires `nu > 0` and `sigma > 0`.
    pub fn with_location_scale(nu: T, mu: T, sigma: T) -> Result<Self, StatsError> {
        if !(nu > T::zero()) || !(sigma > T::zero()) || !sigma.is_finite() || !mu.is_finite() {
            return Err(StatsError::InvalidParameter);
        }
        Ok(Self { nu, mu, sigma })
    }

    /// Degrees of freedom ν.
    pub fn nu(&self) -> T {
        self.nu
    }

    /// Change ν, keeping the distribution unchanged on failure.
    pub fn set_nu(&mut self, nu: T) -> Result<(), StatsError> {
        if !(nu > T::zero()) {
            return Err(StatsError::InvalidParameter);
        }
        self.nu = nu;
        Ok(())
    }

    /// Location μ.
    pub fn mu(&self) -> T {
        self.mu
    }

    /// Scale σ.
    pub fn sigma(&self) -> T {
        self.sigma
    }

    fn standardize(&self, x: T) -> T {
        (x - self.mu) / self.sigma
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for StudentT<T> {
    fn pdf(&self, x: T) -> T {
        dstudent(self.nu, self.standardize(x)) / self.sigma
    }

    fn ln_pdf(&self, x: T) -> T {
        self.pdf(x).ln()
    }

    fn cdf(&self, x: T) -> T {
        pstudent(self.nu, self.standardize(x), false)
    }

    fn complementary_cdf(&self, x: T) -> T {
        pstudent(self.nu, self.standardize(x), true)
    }

    fn quantile(&self, p: T) -> T {
        if p == T::zero() {
            return T::neg_infinity();
        }
        if p == T::one() {
            return T::infinity();
        }
        qstudent(self.nu, p, false).map_or(T::nan(), |t| self.mu + self.sigma * t)
    }

    fn mean(&self) -> T {
        if self.nu > T::one() {
            self.mu
        } else {
            T::nan()
        }
    }

    fn variance(&self) -> T {
        let one = T::one();
        let two = one + one;
        if self.nu > two {
            self.sigma * self.sigma * self.nu / (self.nu - two)
        } else if self.nu > one {
            T::infinity()
        } else {
            T::nan()
        }
    }

    fn realization(&self, rng: &mut dyn RngCore) -> T {
        self.mu + self.sigma * rstudent(self.nu, rng)
    }
}
