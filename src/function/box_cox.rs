use core::fmt;

use crate::config::BOX_COX_TAYLOR_THRESHOLD;
use crate::error::{Error, Result};
use crate::persist::{Persist, Record};
use crate::sample::Point;

use super::{Evaluation, EvaluationState, InverseBoxCox, check_box_cox_parameters};

/// Box-Cox transform, componentwise `y = (x^λ − 1)/λ + s` for `x > 0`.
///
/// This is the exact inverse of [`InverseBoxCox`] with the same `λ` and `s`.
/// It is evaluated as `expm1(λ·ln x)/λ`, and as `ln x·(1 + ½λ·ln x)` once
/// `|λ·ln x| < 1e-8`.
///
/// ```
/// use uqkit::function::{BoxCox, Evaluation};
/// use uqkit::sample::Point;
///
/// let f = BoxCox::with_shift(Point::from([0.5]), Point::from([1.0])).unwrap();
/// let y = f.evaluate(&Point::from([4.0])).unwrap();
/// assert!((y[0] - 3.0).abs() < 1e-15);
/// let back = f.inverse().evaluate(&y).unwrap();
/// assert!((back[0] - 4.0).abs() < 1e-14);
/// ```
#[derive(Debug, Clone)]
pub struct BoxCox {
    lambda: Point,
    shift: Point,
    state: EvaluationState,
}

impl BoxCox {
    /// Box-Cox transform with exponents `lambda` and zero shift.
    pub fn new(lambda: Point) -> Result<Self> {
        let shift = Point::zeros(lambda.dimension());
        Self::with_shift(lambda, shift)
    }

    /// Box-Cox transform with exponents `lambda` and output shift `shift`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the two vectors differ in dimension, are empty or
    /// hold non-finite values.
    pub fn with_shift(lambda: Point, shift: Point) -> Result<Self> {
        check_box_cox_parameters(&lambda, &shift)?;
        Ok(Self::from_parts(lambda, shift))
    }

    pub(super) fn from_parts(lambda: Point, shift: Point) -> Self {
        let dimension = lambda.dimension();
        Self {
            lambda,
            shift,
            state: EvaluationState::new(dimension, dimension),
        }
    }

    /// Exponents λ.
    pub fn lambda(&self) -> &Point {
        &self.lambda
    }

    /// Shift s.
    pub fn shift(&self) -> &Point {
        &self.shift
    }

    /// Rename the instance.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.state.set_name(name);
    }

    /// Diagonal of the Jacobian at `x`.
    pub fn gradient(&self, x: &Point) -> Result<Point> {
        if x.dimension() != self.input_dimension() {
            return Err(Error::DimensionMismatch {
                expected: self.input_dimension(),
                got: x.dimension(),
            });
        }
        let mut g = Point::zeros(x.dimension());
        for (j, gj) in g.iter_mut().enumerate() {
            let lambda = self.lambda[j];
            let ln_x = log_positive(x[j])?;
            *gj = if (lambda * ln_x).abs() < BOX_COX_TAYLOR_THRESHOLD {
                (1.0 + lambda * ln_x) / x[j]
            } else {
                ((lambda - 1.0) * ln_x).exp()
            };
        }
        Ok(g)
    }

    /// The inverse transform.
    pub fn inverse(&self) -> InverseBoxCox {
        let mut f = InverseBoxCox::from_parts(self.lambda.clone(), self.shift.clone());
        f.set_name(self.name());
        f
    }
}

fn log_positive(x: f64) -> Result<f64> {
    if !(x > 0.0) {
        return Err(Error::InvalidArgument(format!(
            "cannot apply the Box-Cox transform to the non-positive value {x}"
        )));
    }
    Ok(x.ln())
}

impl Evaluation for BoxCox {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn input_dimension(&self) -> usize {
        self.lambda.dimension()
    }

    fn output_dimension(&self) -> usize {
        self.lambda.dimension()
    }

    fn compute(&self, x: &[f64], y: &mut [f64]) -> Result<()> {
        for (j, yj) in y.iter_mut().enumerate() {
            let lambda = self.lambda[j];
            let ln_x = log_positive(x[j])?;
            let t = lambda * ln_x;
            let v = if t.abs() < BOX_COX_TAYLOR_THRESHOLD {
                ln_x * (1.0 + 0.5 * t)
            } else {
                t.exp_m1() / lambda
            };
            *yj = v + self.shift[j];
        }
        Ok(())
    }

    fn state(&self) -> &EvaluationState {
        &self.state
    }

    fn repr(&self) -> String {
        format!(
            "class={} name={} dimension={} lambda={} shift={}",
            self.class_name(),
            self.name(),
            self.input_dimension(),
            self.lambda,
            self.shift
        )
    }
}

impl fmt::Display for BoxCox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoxCox(lambda={}, shift={})", self.lambda, self.shift)
    }
}

impl PartialEq for BoxCox {
    fn eq(&self, other: &Self) -> bool {
        self.lambda == other.lambda && self.shift == other.shift
    }
}

impl Persist for BoxCox {
    const CLASS_NAME: &'static str = "BoxCoxEvaluation";
    const SCHEMA_VERSION: u32 = 1;
    const FIELDS: &'static [&'static str] = &["lambda_", "shift_"];

    fn save(&self) -> Record {
        Record::new(Self::CLASS_NAME, Self::SCHEMA_VERSION)
            .with("lambda_", self.lambda.as_slice())
            .with("shift_", self.shift.as_slice())
    }

    fn load(record: &Record) -> Result<Self> {
        record.expect::<Self>()?;
        Self::with_shift(Point::from(record.get("lambda_")?), Point::from(record.get("shift_")?))
    }
}
