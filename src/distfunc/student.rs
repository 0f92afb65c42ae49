use core::f64::consts::{FRAC_1_PI, PI};

use rand::Rng;
use rand_distr::{ChiSquared, Distribution, StandardNormal};

use crate::FloatScalar;
use crate::config::{STUDENT_ASYMPTOTIC_NU, STUDENT_SMALL_INTEGER_NU_MAX};
use crate::error::Result;
use crate::optim::{RootSettings, brent};
use crate::special::{betainc_pair, erfc, lbeta, lgamma};

use super::{check_probability, qnormal};

/// Student-t CDF with `nu` degrees of freedom, or its complement when `tail`
/// is set.
///
/// The upper tail P(T > a), a ≥ 0, is evaluated directly and the lower tail
/// and the CDF are obtained by symmetry, so `pstudent(nu, x, true)` equals
/// `pstudent(nu, -x, false)` bit for bit and both stay accurate far into the
/// tails. Regimes:
///
/// - integer `nu` up to 7: closed-form trigonometric sums (Abramowitz and
///   Stegun 26.7.3/26.7.4), switched to the complementary series once
///   `t² ≥ ν` so the tail is summed rather than obtained by cancellation;
/// - `nu` above 1e5: Hill's normal-deviate transformation (CACM 395)
///   followed by `erfc`;
/// - otherwise: ½·I_{ν/(ν+t²)}(ν/2, ½) through the incomplete beta function.
///
/// Returns NaN when `nu` is not positive or an argument is NaN.
///
/// ```
/// use uqkit::distfunc::pstudent;
///
/// assert_eq!(pstudent(4.0_f64, 0.0, false), 0.5);
/// // Cauchy: F(1) = 3/4
/// assert!((pstudent(1.0_f64, 1.0, false) - 0.75).abs() < 1e-15);
/// // P(T > 10) for ν = 3
/// let q = pstudent(3.0_f64, 10.0, true);
/// assert!((q / 1.064199529207075e-3 - 1.0).abs() < 1e-13);
/// ```
pub fn pstudent<T: FloatScalar>(nu: T, x: T, tail: bool) -> T {
    if !(nu > T::zero()) || x.is_nan() {
        return T::nan();
    }
    // P(T > x) = P(T < -x)
    let x = if tail { -x } else { x };
    if x < T::zero() {
        upper_tail(nu, -x)
    } else {
        T::one() - upper_tail(nu, x)
    }
}

/// Student-t density.
///
/// Computed as `exp(−ln B(ν/2, ½) − ½ ln ν − (ν+1)/2 · ln(1 + x²/ν))`, which
/// stays accurate for large `nu` where the ratio of gamma functions would
/// cancel.
pub fn dstudent<T: FloatScalar>(nu: T, x: T) -> T {
    if !(nu > T::zero()) || x.is_nan() {
        return T::nan();
    }
    let half = T::lit(0.5);
    if nu.is_infinite() {
        return super::dnormal(x);
    }
    // ln(1 + x²/ν), without squaring a huge x
    let q = x.abs() / nu.sqrt();
    let ln_kernel = if q > T::one() {
        T::lit(2.0) * q.ln() + (q * q).recip().ln_1p()
    } else {
        (q * q).ln_1p()
    };
    let ln_pdf = -lbeta(half * nu, half) - half * nu.ln() - half * (nu + T::one()) * ln_kernel;
    ln_pdf.exp()
}

/// Student-t quantile: the `x` with `pstudent(nu, x, tail) == p`.
///
/// `nu = 1` and `nu = 2` are inverted in closed form. Other values start from
/// Hill's approximation (CACM 396), or the Cornish-Fisher expansion for
/// `nu > 1e5`, and refine it with Brent's method on the relative residual of
/// the upper tail, so the result is accurate relative to its own magnitude
/// even for probabilities near the underflow threshold.
///
/// # Errors
///
/// `InvalidArgument` if `nu` is not positive or `p` is outside `(0, 1)`;
/// `Root` if the refinement does not converge.
///
/// ```
/// use uqkit::distfunc::qstudent;
///
/// // Cauchy: Q(3/4) = 1
/// assert!((qstudent(1.0_f64, 0.75, false).unwrap() - 1.0).abs() < 1e-15);
/// let t = qstudent(10.0_f64, 0.975, false).unwrap();
/// assert!((t - 2.2281388519862742).abs() < 1e-12);
/// assert_eq!(qstudent(5.0_f64, 0.9, true).unwrap(), -qstudent(5.0_f64, 0.9, false).unwrap());
/// ```
pub fn qstudent<T: FloatScalar>(nu: T, p: T, tail: bool) -> Result<T> {
    if !(nu > T::zero()) {
        return Err(crate::Error::InvalidArgument(format!(
            "degrees of freedom must be positive, got {nu:?}"
        )));
    }
    check_probability(p)?;

    let half = T::lit(0.5);
    // Solve on the smaller tail; `1 - p` is exact for p >= 1/2.
    let (r, positive) = if p < half {
        (p, tail)
    } else {
        (T::one() - p, !tail)
    };
    let a = upper_quantile(nu, r)?;
    Ok(if positive { a } else { -a })
}

/// One Student-t variate, `Z·√(ν/V)` with Z standard normal and V χ²(ν).
///
/// Returns NaN when `nu` is not positive.
pub fn rstudent<T: FloatScalar, R: Rng + ?Sized>(nu: T, rng: &mut R) -> T {
    let nu = nu.as_f64();
    if !(nu > 0.0) {
        return T::nan();
    }
    let Ok(chi2) = ChiSquared::new(nu) else {
        return T::nan();
    };
    let z: f64 = rng.sample(StandardNormal);
    let v = chi2.sample(rng);
    T::lit(z * (nu / v).sqrt())
}

// ---------------------------------------------------------------------------
// Upper tail
// ---------------------------------------------------------------------------

/// P(T > a) for a ≥ 0.
fn upper_tail<T: FloatScalar>(nu: T, a: T) -> T {
    let half = T::lit(0.5);
    if a == T::zero() {
        return half;
    }
    if a.is_infinite() {
        return T::zero();
    }
    if nu.is_infinite() {
        return super::pnormal(a, true);
    }
    if nu == nu.floor() && nu <= T::lit(STUDENT_SMALL_INTEGER_NU_MAX as f64) {
        // nu is a small positive integer here
        return small_integer_upper(nu.to_u32().unwrap_or(1), nu, a);
    }
    if nu > T::lit(STUDENT_ASYMPTOTIC_NU) {
        return hill_upper(nu, a);
    }
    let root = nu.sqrt();
    if root < a * T::epsilon().sqrt() {
        return far_upper(nu, a);
    }
    let (c, s) = split(nu, a);
    match betainc_pair(half * nu, half, c, s) {
        Ok((ic, _)) => half * ic,
        Err(e) => {
            log::warn!("student upper tail at nu={nu:?}, t={a:?}: {e}");
            T::nan()
        }
    }
}

/// `(ν/(ν+a²), a²/(ν+a²))`, each without overflow or cancellation.
fn split<T: FloatScalar>(nu: T, a: T) -> (T, T) {
    let one = T::one();
    let root = nu.sqrt();
    if a > root {
        let r = root / a;
        let r2 = r * r;
        (r2 / (one + r2), one / (one + r2))
    } else {
        let q = a / root;
        let q2 = q * q;
        (one / (one + q2), q2 / (one + q2))
    }
}

/// Leading term of ½·I_c(ν/2, ½) once c = ν/(ν+a²) is below machine epsilon.
///
/// `c` itself would underflow long before the tail does for small ν, so the
/// whole expression ½·c^(ν/2)·(1−c)^(½) / ((ν/2)·B(ν/2, ½)) is formed in log
/// space from ln(√ν/a). The neglected series terms are O(c).
fn far_upper<T: FloatScalar>(nu: T, a: T) -> T {
    let half = T::lit(0.5);
    let r = nu.sqrt() / a;
    let ln_1p_r2 = (r * r).ln_1p();
    let ln_c = T::lit(2.0) * (nu.sqrt().ln() - a.ln()) - ln_1p_r2;
    let h = half * nu;
    half * (h * ln_c - half * ln_1p_r2 - h.ln() - lbeta(h, half)).exp()
}

/// Closed forms for integer ν ≤ 7.
///
/// With sinθ = a/√(ν+a²), cosθ = √(ν/(ν+a²)) and c = cos²θ, the CDF is a
/// finite sum in powers of c. Below t² = ν the finite sum is used as is;
/// beyond, the remainder of the corresponding infinite series (ratio < c ≤ ½)
/// gives the tail without subtraction.
fn small_integer_upper<T: FloatScalar>(n: u32, nu: T, a: T) -> T {
    let one = T::one();
    let half = T::lit(0.5);
    let (c, s) = split(nu, a);
    let sin_t = s.sqrt();
    let cos_t = c.sqrt();

    match n {
        1 => return one.atan2(a) * T::lit(FRAC_1_PI),
        2 => return half * c / (one + sin_t),
        _ => {}
    }

    let even = n % 2 == 0;
    // Number of terms in the finite sum.
    let m = if even { n / 2 } else { (n - 1) / 2 };

    // k-th term ratio: c(2k-1)/(2k) for even ν, c(2k)/(2k+1) for odd ν.
    let ratio = |k: u32| -> T {
        let k = T::lit(f64::from(k));
        let two_k = T::lit(2.0) * k;
        if even {
            c * (two_k - one) / two_k
        } else {
            c * two_k / (two_k + one)
        }
    };

    if c >= half {
        let mut term = one;
        let mut sum = one;
        for k in 1..m {
            term = term * ratio(k);
            sum = sum + term;
        }
        if even {
            half * (one - sin_t * sum)
        } else {
            let theta = sin_t.atan2(cos_t);
            half - (theta + sin_t * cos_t * sum) * T::lit(FRAC_1_PI)
        }
    } else {
        let mut term = one;
        for k in 1..=m {
            term = term * ratio(k);
        }
        let mut sum = term;
        let mut k = m;
        loop {
            k += 1;
            term = term * ratio(k);
            sum = sum + term;
            if term <= T::epsilon() * sum {
                break;
            }
        }
        if even {
            half * sin_t * sum
        } else {
            sin_t * cos_t * sum * T::lit(FRAC_1_PI)
        }
    }
}

/// Hill's transformation of t into an approximately standard normal deviate,
/// accurate for large ν.
fn hill_upper<T: FloatScalar>(nu: T, a: T) -> T {
    let half = T::lit(0.5);
    let an = nu - half;
    let b = T::lit(48.0) * an * an;
    let y = an * (a * a / nu).ln_1p();
    if !y.is_finite() {
        return T::zero();
    }
    let z = (((((T::lit(-0.4) * y - T::lit(3.3)) * y - T::lit(24.0)) * y - T::lit(85.5))
        / (T::lit(0.8) * y * y + T::lit(100.0) + b)
        + y
        + T::lit(3.0))
        / b
        + T::one())
        * y.sqrt();
    half * erfc(z / T::lit(core::f64::consts::SQRT_2))
}

// ---------------------------------------------------------------------------
// Quantile
// ---------------------------------------------------------------------------

/// The a ≥ 0 with P(T > a) = r, for 0 < r ≤ ½.
fn upper_quantile<T: FloatScalar>(nu: T, r: T) -> Result<T> {
    let one = T::one();
    let two = T::lit(2.0);
    let half = T::lit(0.5);
    if r == half {
        return Ok(T::zero());
    }
    if nu == one {
        return Ok((T::lit(PI) * r).tan().recip());
    }
    if nu == two {
        return Ok((one - two * r) / (two * r * (one - r)).sqrt());
    }
    if nu.is_infinite() {
        return qnormal(r, true);
    }

    let seed = if nu > T::lit(STUDENT_ASYMPTOTIC_NU) {
        cornish_fisher_seed(nu, r)?
    } else if nu >= one {
        hill_seed(nu, r)?
    } else {
        power_tail_seed(nu, r)
    };
    let seed = if seed.is_finite() && seed > T::zero() { seed } else { one };
    log::trace!("qstudent nu={nu:?} r={r:?} seed={seed:?}");

    // Decreasing in a, positive at 0, -1 once the tail underflows.
    let f = |a: T| upper_tail(nu, a) / r - one;

    let (mut lo, mut hi) = (seed, seed);
    if f(seed) > T::zero() {
        loop {
            hi = hi * two;
            if !hi.is_finite() {
                return Err(crate::optim::OptimError::NotFinite.into());
            }
            if f(hi) <= T::zero() {
                break;
            }
            lo = hi;
        }
    } else {
        loop {
            lo = lo * half;
            if lo < T::min_positive_value() {
                lo = T::zero();
                break;
            }
            if f(lo) >= T::zero() {
                break;
            }
            hi = lo;
        }
    }

    let root = brent(f, lo, hi, &RootSettings::relative()).inspect_err(|e| {
        log::warn!("qstudent nu={nu:?} r={r:?}: refinement on [{lo:?}, {hi:?}] failed: {e}");
    })?;
    Ok(root.x)
}

/// Hill's starting value for the upper-tail quantile (CACM 396), valid for
/// ν ≥ 1.
fn hill_seed<T: FloatScalar>(nu: T, r: T) -> Result<T> {
    let one = T::one();
    let lit = T::lit;
    let n = nu;
    // Two-sided probability.
    let p = lit(2.0) * r;

    let a = one / (n - lit(0.5));
    let b = lit(48.0) / (a * a);
    let mut c = ((lit(20700.0) * a / b - lit(98.0)) * a - lit(16.0)) * a + lit(96.36);
    let d = ((lit(94.5) / (b + c) - lit(3.0)) / b + one) * (a * lit(PI / 2.0)).sqrt() * n;
    let mut y = (d * p).powf(lit(2.0) / n);

    if y > lit(0.05) + a {
        let x = qnormal(r, true)?;
        y = x * x;
        if n < lit(5.0) {
            c = c + lit(0.3) * (n - lit(4.5)) * (x + lit(0.6));
        }
        c = (((lit(0.05) * d * x - lit(5.0)) * x - lit(7.0)) * x - lit(2.0)) * x + b + c;
        y = (((((lit(0.4) * y + lit(6.3)) * y + lit(36.0)) * y + lit(94.5)) / c - y - lit(3.0)) / b + one) * x;
        y = (a * y * y).exp_m1();
    } else {
        y = ((one / (((n + lit(6.0)) / (n * y) - lit(0.089) * d - lit(0.822)) * (n + lit(2.0)) * lit(3.0))
            + lit(0.5) / (n + lit(4.0)))
            * y
            - one)
            * (n + one)
            / (n + lit(2.0))
            + one / y;
    }
    Ok((n * y).sqrt())
}

/// Cornish-Fisher expansion of the Student quantile around the normal one.
fn cornish_fisher_seed<T: FloatScalar>(nu: T, r: T) -> Result<T> {
    let lit = T::lit;
    let z = qnormal(r, true)?;
    let z2 = z * z;
    let g1 = (z2 + T::one()) * z / lit(4.0);
    let g2 = ((lit(5.0) * z2 + lit(16.0)) * z2 + lit(3.0)) * z / lit(96.0);
    let g3 = (((lit(3.0) * z2 + lit(19.0)) * z2 + lit(17.0)) * z2 - lit(15.0)) * z / lit(384.0);
    Ok(z + g1 / nu + g2 / (nu * nu) + g3 / (nu * nu * nu))
}

/// Starting value from the power-law tail P(T > a) ≈ K·a^(−ν), used for ν < 1
/// where Hill's approximation does not apply.
fn power_tail_seed<T: FloatScalar>(nu: T, r: T) -> T {
    let half = T::lit(0.5);
    let ln_density_const = lgamma(half * (nu + T::one())) - lgamma(half * nu) - half * (nu * T::lit(PI)).ln();
    let ln_k = ln_density_const + half * (nu - T::one()) * nu.ln();
    ((ln_k - r.ln()) / nu).exp()
}
