use rand::RngCore;

use crate::FloatScalar;
use crate::distfunc::{dpareto, ppareto, qpareto, rpareto};
use super::{ContinuousDistribution, StatsError};

/// Pareto distribution with scale β, shape α and location γ.
///
/// P(X > x) = ((x − γ)/β)^(−α) for x ≥ γ + β.
///
/// # Example
///
/// ```
/// use uqkit::stats::{ContinuousDistribution, Pareto};
///
/// let p = Pareto::new(1.0_f64, 3.0, 0.0).unwrap();
/// assert!((p.mean() - 1.5).abs() < 1e-15);
/// assert!((p.complementary_cdf(2.0) - 0.125).abs() < 1e-16);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Pareto<T> {
    scale: T, // β > 0
    shape: T, // α > 0
    location: T,
}

impl<T: FloatScalar> Pareto<T> {
    /// Requires `scale > 0`, `shape > 0` and a finite `location`.
    pub fn new(scale: T, shape: T, location: T) -> Result<Self, StatsError> {
        let mut p = Self { scale: T::one(), shape: T::one(), location: T::zero() };
        p.set_parameters(scale, shape, location)?;
        Ok(p)
    }

    /// Replace all three parameters at once; on failure nothing changes.
    pub fn set_parameters(&mut self, scale: T, shape: T, location: T) -> Result<(), StatsError> {
        let ok = scale > T::zero() && scale.is_finite() && shape > T::zero() && location.is_finite();
        if !ok {
            return Err(StatsError::InvalidParameter);
        }
        self.scale = scale;
        self.shape = shape;
        self.location = location;
        Ok(())
    }

    /// Scale β.
    pub fn scale(&self) -> T {
        self.scale
    }

    /// Shape α.
    pub fn shape(&self) -> T {
        self.shape
    }

    /// Location γ.
    pub fn location(&self) -> T {
        self.location
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for Pareto<T> {
    fn pdf(&self, x: T) -> T {
        dpareto(x, self.scale, self.shape, self.location)
    }

    fn ln_pdf(&self, x: T) -> T {
        self.pdf(x).ln()
    }

    fn cdf(&self, x: T) -> T {
        ppareto(x, self.scale, self.shape, self.location, false)
    }

    fn complementary_cdf(&self, x: T) -> T {
        ppareto(x, self.scale, self.shape, self.location, true)
    }

    fn quantile(&self, p: T) -> T {
        if p == T::zero() {
            return self.location + self.scale;
        }
        if p == T::one() {
            return T::infinity();
        }
        qpareto(p, self.scale, self.shape, self.location, false).unwrap_or(T::nan())
    }

    fn mean(&self) -> T {
        let one = T::one();
        if self.shape > one {
            self.location + self.shape * self.scale / (self.shape - one)
        } else {
            T::infinity()
        }
    }

    fn variance(&self) -> T {
        let one = T::one();
        let two = one + one;
        if self.shape > two {
            let am1 = self.shape - one;
            self.scale * self.scale * self.shape / (am1 * am1 * (self.shape - two))
        } else {
            T::infinity()
        }
    }

    fn realization(&self, rng: &mut dyn RngCore) -> T {
        rpareto(self.scale, self.shape, self.location, rng)
    }
}
