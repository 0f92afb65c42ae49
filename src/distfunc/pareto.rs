use rand::Rng;
use rand_distr::Open01;

use crate::FloatScalar;
use crate::error::Result;

use super::check_probability;

fn valid<T: FloatScalar>(scale: T, shape: T, location: T) -> bool {
    scale > T::zero() && shape > T::zero() && location.is_finite() && scale.is_finite()
}

/// `ln((x − location)/scale)` for x above the support's lower bound, taken
/// through `ln_1p` close to the bound.
fn log_ratio<T: FloatScalar>(x: T, scale: T, location: T) -> T {
    let excess = (x - location - scale) / scale;
    if excess < T::one() {
        excess.ln_1p()
    } else {
        ((x - location) / scale).ln()
    }
}

/// Pareto CDF with the given `scale` (β > 0), `shape` (α > 0) and `location`
/// (γ), or the survival function when `tail` is set.
///
/// The support is `x ≥ γ + β`, where the CDF is `1 − ((x − γ)/β)^(−α)`. Both
/// sides are computed from `α·ln((x − γ)/β)` with `exp` for the survival
/// function and `−expm1` for the CDF, so neither loses precision to
/// subtraction.
///
/// Returns NaN for invalid parameters.
///
/// ```
/// use uqkit::distfunc::ppareto;
///
/// // β = 1, α = 2, γ = 0: P(X > 10) = 1/100
/// assert!((ppareto(10.0_f64, 1.0, 2.0, 0.0, true) - 0.01).abs() < 1e-16);
/// assert_eq!(ppareto(0.5_f64, 1.0, 2.0, 0.0, false), 0.0);
/// ```
pub fn ppareto<T: FloatScalar>(x: T, scale: T, shape: T, location: T, tail: bool) -> T {
    if !valid(scale, shape, location) || x.is_nan() {
        return T::nan();
    }
    if x <= location + scale {
        return if tail { T::one() } else { T::zero() };
    }
    if x.is_infinite() {
        return if tail { T::zero() } else { T::one() };
    }
    let exponent = -shape * log_ratio(x, scale, location);
    if tail { exponent.exp() } else { -exponent.exp_m1() }
}

/// Pareto density `α/β · ((x − γ)/β)^(−α−1)` on `x ≥ γ + β`, zero below.
pub fn dpareto<T: FloatScalar>(x: T, scale: T, shape: T, location: T) -> T {
    if !valid(scale, shape, location) || x.is_nan() {
        return T::nan();
    }
    if x < location + scale {
        return T::zero();
    }
    let ln_ratio = log_ratio(x, scale, location);
    shape / scale * (-(shape + T::one()) * ln_ratio).exp()
}

/// Pareto quantile: `γ + β·(1 − p)^(−1/α)`, or `γ + β·p^(−1/α)` when `tail`
/// is set.
///
/// # Errors
///
/// `InvalidArgument` for invalid parameters or `p` outside `(0, 1)`.
///
/// ```
/// use uqkit::distfunc::qpareto;
///
/// assert!((qpareto(0.75_f64, 1.0, 2.0, 0.0, false).unwrap() - 2.0).abs() < 1e-15);
/// assert!((qpareto(1e-10_f64, 3.0, 1.0, 1.0, true).unwrap() - 3e10 - 1.0).abs() < 1e-3);
/// ```
pub fn qpareto<T: FloatScalar>(p: T, scale: T, shape: T, location: T, tail: bool) -> Result<T> {
    if !valid(scale, shape, location) {
        return Err(crate::Error::InvalidArgument(format!(
            "pareto parameters must satisfy scale > 0 and shape > 0, got scale={scale:?} shape={shape:?}"
        )));
    }
    check_probability(p)?;
    // ln of the survival probability
    let ln_survival = if tail { p.ln() } else { (-p).ln_1p() };
    Ok(location + scale * (-ln_survival / shape).exp())
}

/// One Pareto variate by inversion of the survival function.
///
/// Returns NaN for invalid parameters.
pub fn rpareto<T: FloatScalar, R: Rng + ?Sized>(scale: T, shape: T, location: T, rng: &mut R) -> T {
    if !valid(scale, shape, location) {
        return T::nan();
    }
    let u: f64 = rng.sample(Open01);
    location + scale * (-T::lit(u).ln() / shape).exp()
}
