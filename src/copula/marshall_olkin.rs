use core::fmt;
use std::sync::OnceLock;

use rand::{Rng, RngCore};
use rand_distr::Open01;

use crate::error::{Error, Result};
use crate::persist::{Persist, Record};

use super::{Copula, CorrelationMatrix};

/// Marshall-Olkin copula with shape parameters α, β ∈ \[0, 1\].
///
/// `C(u, v) = u^(1−α)·v` if `u^α ≥ v^β`, else `u·v^(1−β)`, i.e.
/// `min(u·v^(1−β), u^(1−α)·v)`. α = 0 or β = 0 gives the product copula,
/// α = β = 1 the comonotone one.
///
/// Kendall's tau and Spearman's rho are computed on first use and cached; the
/// setters drop the cache.
#[derive(Debug, Clone)]
pub struct MarshallOlkin {
    alpha: f64,
    beta: f64,
    kendall: OnceLock<f64>,
    spearman: OnceLock<f64>,
}

impl Default for MarshallOlkin {
    fn default() -> Self {
        Self::from_valid(0.5, 0.5)
    }
}

fn check_shape(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidArgument(format!(
            "Marshall-Olkin {name} must lie in [0, 1], got {value}"
        )));
    }
    Ok(())
}

impl MarshallOlkin {
    /// Copula with parameters `alpha` and `beta`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless both lie in \[0, 1\].
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        check_shape("alpha", alpha)?;
        check_shape("beta", beta)?;
        Ok(Self::from_valid(alpha, beta))
    }

    fn from_valid(alpha: f64, beta: f64) -> Self {
        Self {
            alpha,
            beta,
            kendall: OnceLock::new(),
            spearman: OnceLock::new(),
        }
    }

    /// α.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// β.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Change α and drop the cached dependence measures.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless `alpha` lies in \[0, 1\] (NaN included); nothing
    /// changes in that case.
    pub fn set_alpha(&mut self, alpha: f64) -> Result<()> {
        check_shape("alpha", alpha)?;
        self.alpha = alpha;
        self.invalidate();
        Ok(())
    }

    /// Change β and drop the cached dependence measures.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless `beta` lies in \[0, 1\] (NaN included); nothing
    /// changes in that case.
    pub fn set_beta(&mut self, beta: f64) -> Result<()> {
        check_shape("beta", beta)?;
        self.beta = beta;
        self.invalidate();
        Ok(())
    }

    /// Set `[alpha, beta]` at once.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a vector that is not of length 2 or holds an
    /// out-of-range value; nothing changes in that case.
    pub fn set_parameter(&mut self, parameter: &[f64]) -> Result<()> {
        let &[alpha, beta] = parameter else {
            return Err(Error::InvalidArgument(format!(
                "Marshall-Olkin copula takes 2 parameters, got {}",
                parameter.len()
            )));
        };
        check_shape("alpha", alpha)?;
        check_shape("beta", beta)?;
        self.alpha = alpha;
        self.beta = beta;
        self.invalidate();
        Ok(())
    }

    /// Names of the parameters, in [`Copula::parameter`] order.
    pub fn parameter_description(&self) -> [&'static str; 2] {
        ["alpha", "beta"]
    }

    /// Debug form.
    pub fn repr(&self) -> String {
        format!(
            "class={} dimension=2 alpha={} beta={}",
            Self::CLASS_NAME,
            self.alpha,
            self.beta
        )
    }

    fn invalidate(&mut self) {
        self.kendall = OnceLock::new();
        self.spearman = OnceLock::new();
    }

    fn tau(&self) -> f64 {
        *self.kendall.get_or_init(|| {
            let (a, b) = (self.alpha, self.beta);
            let den = a + b - a * b;
            if den == 0.0 { 0.0 } else { a * b / den }
        })
    }

    fn rho(&self) -> f64 {
        *self.spearman.get_or_init(|| {
            let (a, b) = (self.alpha, self.beta);
            let den = 2.0 * a + 2.0 * b - a * b;
            if den == 0.0 { 0.0 } else { 3.0 * a * b / den }
        })
    }
}

impl Copula for MarshallOlkin {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn dimension(&self) -> usize {
        2
    }

    fn compute_cdf(&self, u: &[f64]) -> f64 {
        let x = u[0].clamp(0.0, 1.0);
        let y = u[1].clamp(0.0, 1.0);
        if x == 0.0 || y == 0.0 {
            return 0.0;
        }
        if x.powf(self.alpha) >= y.powf(self.beta) {
            x.powf(1.0 - self.alpha) * y
        } else {
            x * y.powf(1.0 - self.beta)
        }
    }

    fn realization_into(&self, rng: &mut dyn RngCore, out: &mut [f64]) {
        let u1: f64 = rng.sample(Open01);
        let u2: f64 = rng.sample(Open01);
        let u3: f64 = rng.sample(Open01);
        // u^(1/0) = 0 on (0, 1), so α or β at 0 or 1 need no special case.
        out[0] = u1.powf(1.0 / (1.0 - self.alpha)).max(u3.powf(1.0 / self.alpha));
        out[1] = u2.powf(1.0 / (1.0 - self.beta)).max(u3.powf(1.0 / self.beta));
    }

    fn has_independent_copula(&self) -> bool {
        self.alpha == 0.0 || self.beta == 0.0
    }

    fn kendall_tau(&self) -> CorrelationMatrix {
        CorrelationMatrix::pair(self.tau())
    }

    fn spearman_correlation(&self) -> CorrelationMatrix {
        CorrelationMatrix::pair(self.rho())
    }

    fn parameter(&self) -> Vec<f64> {
        vec![self.alpha, self.beta]
    }
}

impl PartialEq for MarshallOlkin {
    fn eq(&self, other: &Self) -> bool {
        self.alpha == other.alpha && self.beta == other.beta
    }
}

impl fmt::Display for MarshallOlkin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MarshallOlkinCopula(alpha = {}, beta = {})", self.alpha, self.beta)
    }
}

impl Persist for MarshallOlkin {
    const CLASS_NAME: &'static str = "MarshallOlkinCopula";
    const SCHEMA_VERSION: u32 = 1;
    const FIELDS: &'static [&'static str] = &["alpha_", "beta_"];

    fn save(&self) -> Record {
        Record::new(Self::CLASS_NAME, Self::SCHEMA_VERSION)
            .with("alpha_", vec![self.alpha])
            .with("beta_", vec![self.beta])
    }

    fn load(record: &Record) -> Result<Self> {
        record.expect::<Self>()?;
        Self::new(record.scalar("alpha_")?, record.scalar("beta_")?)
    }
}
