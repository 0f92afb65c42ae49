use core::fmt;

use rand::{Rng, RngCore};
use rand_distr::Open01;

use crate::error::{Error, Result};
use crate::persist::{Persist, Record};

use super::{Copula, CorrelationMatrix};

/// Product copula `C(u) = ∏ uᵢ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndependentCopula {
    dimension: usize,
}

impl IndependentCopula {
    /// Independent copula of the given dimension (at least 1).
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::InvalidArgument("a copula needs at least one component".into()));
        }
        Ok(Self { dimension })
    }
}

impl Copula for IndependentCopula {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn compute_cdf(&self, u: &[f64]) -> f64 {
        u.iter().map(|v| v.clamp(0.0, 1.0)).product()
    }

    fn realization_into(&self, rng: &mut dyn RngCore, out: &mut [f64]) {
        for v in out.iter_mut() {
            *v = rng.sample(Open01);
        }
    }

    fn has_independent_copula(&self) -> bool {
        true
    }

    fn kendall_tau(&self) -> CorrelationMatrix {
        CorrelationMatrix::identity(self.dimension)
    }

    fn spearman_correlation(&self) -> CorrelationMatrix {
        CorrelationMatrix::identity(self.dimension)
    }

    fn parameter(&self) -> Vec<f64> {
        Vec::new()
    }
}

impl fmt::Display for IndependentCopula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndependentCopula(dimension = {})", self.dimension)
    }
}

impl Persist for IndependentCopula {
    const CLASS_NAME: &'static str = "IndependentCopula";
    const SCHEMA_VERSION: u32 = 1;
    const FIELDS: &'static [&'static str] = &["dimension_"];

    fn save(&self) -> Record {
        Record::new(Self::CLASS_NAME, Self::SCHEMA_VERSION).with("dimension_", vec![self.dimension as f64])
    }

    fn load(record: &Record) -> Result<Self> {
        record.expect::<Self>()?;
        let d = record.scalar("dimension_")?;
        if !(d >= 1.0 && d.fract() == 0.0 && d <= u32::MAX as f64) {
            return Err(Error::Persist(format!("{}: bad dimension {d}", record.class)));
        }
        Self::new(d as usize)
    }
}
