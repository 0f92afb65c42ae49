//! Copulas and composed multivariate distributions.
//!
//! A [`Copula`] is a distribution on the unit hypercube with uniform
//! marginals. [`ComposedDistribution`] joins shared marginal distributions
//! with a copula by Sklar's theorem: `F(x) = C(F₁(x₁), …, F_d(x_d))`.
//!
//! | Copula | Parameters | Dimension |
//! |---|---|---|
//! | [`MarshallOlkin`] | α, β ∈ \[0, 1\] | 2 |
//! | [`IndependentCopula`] | none | any |
//!
//! Batch CDFs go through the same row-parallel dispatch as the point
//! transforms; batch sampling draws each fixed-size chunk of rows from its own
//! seeded sub-stream, see [`crate::random`].
//!
//! ```
//! use uqkit::copula::{Copula, MarshallOlkin};
//!
//! let c = MarshallOlkin::new(0.5, 0.25).unwrap();
//! assert_eq!(c.cdf(&[1.0, 1.0]).unwrap(), 1.0);
//! assert_eq!(c.cdf(&[0.3, 0.0]).unwrap(), 0.0);
//! assert!((c.kendall_tau()[(0, 1)] - 0.2).abs() < 1e-15);
//! ```

mod composed;
mod independent;
mod marshall_olkin;


pub use composed::{ComposedDistribution, Marginal};
pub use independent::IndependentCopula;
pub use marshall_olkin::MarshallOlkin;

use core::ops::Index;

use rand::RngCore;

use crate::error::{Error, Result};
use crate::function::batch::map_rows;
use crate::random::fill_rows;
use crate::sample::{Point, Sample};

/// A copula: a joint distribution on \[0, 1\]^d with uniform marginals.
pub trait Copula: Send + Sync {
    /// Class name, e.g. `MarshallOlkinCopula`.
    fn class_name(&self) -> &'static str;

    /// Number of components.
    fn dimension(&self) -> usize;

    /// C(u). Components outside \[0, 1\] are clamped; `u` has the copula's
    /// dimension.
    fn compute_cdf(&self, u: &[f64]) -> f64;

    /// Write one realization into `out`, which has the copula's dimension.
    fn realization_into(&self, rng: &mut dyn RngCore, out: &mut [f64]);

    /// True if the copula is the independent (product) copula.
    fn has_independent_copula(&self) -> bool;

    /// Kendall's tau matrix.
    fn kendall_tau(&self) -> CorrelationMatrix;

    /// Spearman's rho matrix.
    fn spearman_correlation(&self) -> CorrelationMatrix;

    /// Parameter vector.
    fn parameter(&self) -> Vec<f64>;

    /// C(u) after checking the dimension.
    fn cdf(&self, u: &[f64]) -> Result<f64> {
        check_dimension(self.dimension(), u.len())?;
        Ok(self.compute_cdf(u))
    }

    /// C at every row of `u`, in row order.
    fn cdf_sample(&self, u: &Sample) -> Result<Vec<f64>> {
        let out = map_rows(u, self.dimension(), 1, |x, y| {
            y[0] = self.compute_cdf(x);
            Ok(())
        })?;
        Ok(out.into_vec())
    }

    /// One realization drawn from `rng`.
    fn realization(&self, rng: &mut dyn RngCore) -> Point {
        let mut p = Point::zeros(self.dimension());
        self.realization_into(rng, &mut p);
        p
    }

    /// `size` realizations, reproducible from `seed` regardless of the
    /// number of worker threads.
    fn sample(&self, size: usize, seed: u64) -> Sample {
        fill_rows(size, self.dimension(), seed, |rng, row| self.realization_into(rng, row))
    }
}

pub(crate) fn check_dimension(expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(Error::DimensionMismatch { expected, got });
    }
    Ok(())
}

/// Symmetric matrix with unit diagonal, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    dimension: usize,
    data: Vec<f64>,
}

impl CorrelationMatrix {
    /// Identity of the given dimension.
    pub fn identity(dimension: usize) -> Self {
        let mut data = vec![0.0; dimension * dimension];
        for i in 0..dimension {
            data[i * dimension + i] = 1.0;
        }
        Self { dimension, data }
    }

    /// 2×2 matrix with off-diagonal `rho`.
    pub fn pair(rho: f64) -> Self {
        Self {
            dimension: 2,
            data: vec![1.0, rho, rho, 1.0],
        }
    }

    /// Number of rows (and columns).
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

impl Index<(usize, usize)> for CorrelationMatrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(i < self.dimension && j < self.dimension, "index ({i}, {j}) out of range");
        &self.data[i * self.dimension + j]
    }
}
