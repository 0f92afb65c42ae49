use core::fmt;
use std::sync::Arc;

use rand::RngCore;

use crate::error::{Error, Result};
use crate::function::batch::map_rows;
use crate::random::fill_rows;
use crate::sample::{Point, Sample};
use crate::stats::ContinuousDistribution;

use super::{Copula, check_dimension};

/// A shared univariate marginal.
pub type Marginal = Arc<dyn ContinuousDistribution<f64> + Send + Sync>;

/// Joint distribution built from marginals and a copula.
///
/// Marginals and copula are shared (`Arc`), so several composed
/// distributions can reuse one fitted marginal without copying it.
///
/// ```
/// use std::sync::Arc;
/// use uqkit::copula::{ComposedDistribution, Marginal, MarshallOlkin};
/// use uqkit::stats::{Normal, Pareto};
///
/// let marginals: Vec<Marginal> = vec![
///     Arc::new(Normal::<f64>::standard()),
///     Arc::new(Pareto::new(1.0_f64, 3.0, 0.0).unwrap()),
/// ];
/// let copula = Arc::new(MarshallOlkin::new(0.4, 0.6).unwrap());
/// let d = ComposedDistribution::new(marginals, copula).unwrap();
///
/// let s = d.sample(1000, 7);
/// assert_eq!(s.dimension(), 2);
/// assert!(s.rows().all(|x| x[1] >= 1.0));
/// ```
#[derive(Clone)]
pub struct ComposedDistribution {
    marginals: Vec<Marginal>,
    copula: Arc<dyn Copula>,
}

impl ComposedDistribution {
    /// Join `marginals` with `copula`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the number of marginals differs from the copula
    /// dimension.
    pub fn new(marginals: Vec<Marginal>, copula: Arc<dyn Copula>) -> Result<Self> {
        if marginals.len() != copula.dimension() {
            return Err(Error::InvalidArgument(format!(
                "{} marginals given for a copula of dimension {}",
                marginals.len(),
                copula.dimension()
            )));
        }
        Ok(Self { marginals, copula })
    }

    /// Number of components.
    pub fn dimension(&self) -> usize {
        self.marginals.len()
    }

    /// Marginal `i`.
    pub fn marginal(&self, i: usize) -> &Marginal {
        &self.marginals[i]
    }

    /// The dependence structure.
    pub fn copula(&self) -> &Arc<dyn Copula> {
        &self.copula
    }

    /// True if the components are independent.
    pub fn has_independent_copula(&self) -> bool {
        self.copula.has_independent_copula()
    }

    fn compute_cdf(&self, x: &[f64]) -> f64 {
        let u: Vec<f64> = self.marginals.iter().zip(x).map(|(m, &xi)| m.cdf(xi)).collect();
        self.copula.compute_cdf(&u)
    }

    fn fill_realization(&self, rng: &mut dyn RngCore, out: &mut [f64]) {
        self.copula.realization_into(rng, out);
        for (m, v) in self.marginals.iter().zip(out.iter_mut()) {
            *v = m.quantile(*v);
        }
    }

    /// Joint CDF at `x`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` for a point of the wrong dimension.
    pub fn cdf(&self, x: &Point) -> Result<f64> {
        check_dimension(self.dimension(), x.dimension())?;
        Ok(self.compute_cdf(x))
    }

    /// Joint CDF at every row of `x`, in row order.
    pub fn cdf_sample(&self, x: &Sample) -> Result<Vec<f64>> {
        let out = map_rows(x, self.dimension(), 1, |xi, y| {
            y[0] = self.compute_cdf(xi);
            Ok(())
        })?;
        Ok(out.into_vec())
    }

    /// One realization: a copula draw pushed through the marginal quantiles.
    pub fn realization(&self, rng: &mut dyn RngCore) -> Point {
        let mut p = Point::zeros(self.dimension());
        self.fill_realization(rng, &mut p);
        p
    }

    /// `size` realizations, reproducible from `seed`.
    pub fn sample(&self, size: usize, seed: u64) -> Sample {
        fill_rows(size, self.dimension(), seed, |rng, row| self.fill_realization(rng, row))
    }

    /// Vector of marginal means.
    pub fn mean(&self) -> Point {
        self.marginals.iter().map(|m| m.mean()).collect::<Vec<_>>().into()
    }
}

impl fmt::Debug for ComposedDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposedDistribution")
            .field("dimension", &self.dimension())
            .field("copula", &self.copula.class_name())
            .field("copula_parameter", &self.copula.parameter())
            .finish()
    }
}
