use crate::FloatScalar;

use super::{OptimError, RootResult};

/// Settings for [`brent`].
///
/// The step tolerance at the current iterate `b` is
/// `2·ε·|b| + x_tol/2 + x_rtol·|b|`.
#[derive(Debug, Clone, Copy)]
pub struct RootSettings<T> {
    /// Absolute tolerance on the bracket half-width.
    pub x_tol: T,
    /// Relative tolerance on the bracket half-width.
    pub x_rtol: T,
    /// Stop as soon as `|f(x)| <= f_tol`.
    pub f_tol: T,
    /// Maximum number of iterations.
    pub max_iter: usize,
}

impl Default for RootSettings<f64> {
    fn default() -> Self {
        Self {
            x_tol: 1e-12,
            x_rtol: 0.0,
            f_tol: 1e-12,
            max_iter: 100,
        }
    }
}

impl Default for RootSettings<f32> {
    fn default() -> Self {
        Self {
            x_tol: 1e-6,
            x_rtol: 0.0,
            f_tol: 1e-6,
            max_iter: 100,
        }
    }
}

impl<T: FloatScalar> RootSettings<T> {
    /// Settings that resolve the root to a few ulps relative to its size and
    /// ignore the function-value test.
    pub fn relative() -> Self {
        Self {
            x_tol: T::min_positive_value(),
            x_rtol: T::lit(4.0) * T::epsilon(),
            f_tol: T::zero(),
            max_iter: 200,
        }
    }
}

/// Brent's method for bracketed root finding.
///
/// Each step tries inverse quadratic interpolation (or the secant step when
/// only two distinct points are known) and falls back to bisection whenever
/// the interpolated step would not shrink the bracket fast enough, so
/// convergence is guaranteed and superlinear near a simple root.
///
/// # Errors
///
/// [`OptimError::BracketInvalid`] if `f(a)` and `f(b)` share a sign,
/// [`OptimError::NotFinite`] if `f` returns NaN or infinity,
/// [`OptimError::MaxIterations`] if the tolerance is not met in time.
///
/// ```
/// use uqkit::optim::{brent, RootSettings};
///
/// let r = brent(|x| x * x - 2.0, 0.0, 2.0, &RootSettings::default()).unwrap();
/// assert!((r.x - core::f64::consts::SQRT_2).abs() < 1e-12);
/// ```
pub fn brent<T: FloatScalar>(
    mut f: impl FnMut(T) -> T,
    a: T,
    b: T,
    settings: &RootSettings<T>,
) -> Result<RootResult<T>, OptimError> {
    let zero = T::zero();
    let half = T::lit(0.5);
    let two = T::lit(2.0);
    let three = T::lit(3.0);

    let (mut a, mut b) = (a, b);
    let mut fa = f(a);
    let mut fb = f(b);
    let mut evals = 2;

    if !fa.is_finite() || !fb.is_finite() {
        return Err(OptimError::NotFinite);
    }
    if fa == zero {
        return Ok(RootResult { x: a, fx: fa, iterations: 0, evals });
    }
    if fb == zero {
        return Ok(RootResult { x: b, fx: fb, iterations: 0, evals });
    }
    if (fa > zero) == (fb > zero) {
        return Err(OptimError::BracketInvalid);
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iter in 0..settings.max_iter {
        if (fb > zero) == (fc > zero) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = two * T::epsilon() * b.abs() + half * settings.x_tol + settings.x_rtol * b.abs();
        let xm = half * (c - b);
        if xm.abs() <= tol || fb == zero || fb.abs() <= settings.f_tol {
            return Ok(RootResult { x: b, fx: fb, iterations: iter, evals });
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (two * xm * s, T::one() - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (two * xm * q * (q - r) - (b - a) * (r - T::one())),
                    (q - T::one()) * (r - T::one()) * (s - T::one()),
                )
            };
            if p > zero {
                q = -q;
            }
            p = p.abs();
            let bound = (three * xm * q - (tol * q).abs()).min((e * q).abs());
            if two * p < bound {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        b = if d.abs() > tol { b + d } else { b + tol.copysign(xm) };
        fb = f(b);
        evals += 1;
        if !fb.is_finite() {
            return Err(OptimError::NotFinite);
        }
    }

    Err(OptimError::MaxIterations)
}
