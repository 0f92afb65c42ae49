//! Scalar distribution evaluators.
//!
//! Free functions in the `p*` (CDF), `q*` (quantile), `d*` (density) and `r*`
//! (random variate) families. Each picks among closed forms, series, the
//! incomplete beta function and root finding according to the parameter
//! magnitude; see the individual functions for the regime boundaries.
//!
//! Conventions shared by every family:
//!
//! - `tail = true` asks for the survival function `1 − CDF` (for `p*`) or the
//!   argument whose survival probability is `p` (for `q*`). The complement is
//!   computed directly, never by subtraction, so tiny tail probabilities keep
//!   their relative precision.
//! - `p*`, `d*` and `r*` return NaN for invalid shape parameters; `q*` reject
//!   probabilities outside `(0, 1)` with [`Error::InvalidArgument`].
//! - `r*` draw from the generator they are handed; there is no hidden global
//!   random state.
//!
//! ```
//! use uqkit::distfunc::{pstudent, qstudent};
//!
//! let p = pstudent(3.5_f64, -2.0, false);
//! let q = pstudent(3.5_f64, -2.0, true);
//! assert!((p + q - 1.0).abs() < 1e-15);
//!
//! let x = qstudent(3.5_f64, p, false).unwrap();
//! assert!((x + 2.0).abs() < 1e-10);
//! ```
//!
//! [`Error::InvalidArgument`]: crate::Error::InvalidArgument

mod normal;
mod pareto;
mod student;

#[cfg(test)]
mod tests;

pub use normal::{dnormal, pnormal, qnormal, rnormal};
pub use pareto::{dpareto, ppareto, qpareto, rpareto};
pub use student::{dstudent, pstudent, qstudent, rstudent};

use crate::FloatScalar;
use crate::error::{Error, Result};

/// Reject probabilities outside the open unit interval.
pub(crate) fn check_probability<T: FloatScalar>(p: T) -> Result<()> {
    if p > T::zero() && p < T::one() {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "probability must lie in (0, 1), got {p:?}"
        )))
    }
}
