use core::fmt;

use crate::config::BOX_COX_TAYLOR_THRESHOLD;
use crate::error::{Error, Result};
use crate::persist::{Persist, Record};
use crate::sample::Point;

use super::{BoxCox, Evaluation, EvaluationState, check_box_cox_parameters};

/// Inverse Box-Cox transform, componentwise
/// `y = (λ(x − s) + 1)^(1/λ)`.
///
/// Close to λ = 0, where the power is ill-conditioned, the first-order
/// expansion `exp(x')·(1 − ½λx'²)` with `x' = x − s` is used instead as soon
/// as `|λx'²| < 1e-8`. A non-positive base `λx' + 1` is an argument error for
/// single points and batches alike.
///
/// ```
/// use uqkit::function::{Evaluation, InverseBoxCox};
/// use uqkit::sample::Point;
///
/// let f = InverseBoxCox::new(Point::from([2.0])).unwrap();
/// assert!(f.evaluate(&Point::from([-1.0])).is_err());
/// assert_eq!(f.calls_number(), 0);
/// assert_eq!(f.to_string(), "InverseBoxCox(lambda=[2], shift=[0])");
/// ```
#[derive(Debug, Clone)]
pub struct InverseBoxCox {
    lambda: Point,
    shift: Point,
    state: EvaluationState,
}

impl InverseBoxCox {
    /// Inverse transform with exponents `lambda` and zero shift.
    pub fn new(lambda: Point) -> Result<Self> {
        let shift = Point::zeros(lambda.dimension());
        Self::with_shift(lambda, shift)
    }

    /// Inverse transform with exponents `lambda` and shift `shift`.
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

    /// Diagonal of the Jacobian at `x`; the transform is componentwise.
    ///
    /// # Errors
    ///
    /// As [`Evaluation::evaluate`]. Gradient calls are not counted.
    pub fn gradient(&self, x: &Point) -> Result<Point> {
        if x.dimension() != self.input_dimension() {
            return Err(Error::DimensionMismatch {
                expected: self.input_dimension(),
                got: x.dimension(),
            });
        }
        let mut g = Point::zeros(x.dimension());
        for (j, gj) in g.iter_mut().enumerate() {
            *gj = derivative(self.lambda[j], x[j] - self.shift[j])?;
        }
        Ok(g)
    }

    /// The forward transform this one undoes.
    pub fn inverse(&self) -> BoxCox {
        let mut f = BoxCox::from_parts(self.lambda.clone(), self.shift.clone());
        f.set_name(self.name());
        f
    }
}

/// `(λx + 1)^(1/λ)` with the near-zero expansion.
fn component(lambda: f64, x: f64) -> Result<f64> {
    let lx2 = lambda * x * x;
    if lx2.abs() < BOX_COX_TAYLOR_THRESHOLD {
        return Ok(x.exp() * (1.0 - 0.5 * lx2));
    }
    let base = lambda * x + 1.0;
    if !(base > 0.0) {
        return Err(non_positive_base(lambda, x, base));
    }
    Ok(base.powf(1.0 / lambda))
}

/// d/dx of [`component`], on the same two branches.
fn derivative(lambda: f64, x: f64) -> Result<f64> {
    if (lambda * x * x).abs() < BOX_COX_TAYLOR_THRESHOLD {
        return Ok(x.exp() * (1.0 - lambda * x * (1.0 + 0.5 * x)));
    }
    let base = lambda * x + 1.0;
    if !(base > 0.0) {
        return Err(non_positive_base(lambda, x, base));
    }
    Ok(base.powf(1.0 / lambda - 1.0))
}

fn non_positive_base(lambda: f64, x: f64, base: f64) -> Error {
    Error::InvalidArgument(format!(
        "cannot apply the inverse Box-Cox transform: lambda*(x-shift)+1 = {base} for lambda={lambda}, x-shift={x}"
    ))
}

impl Evaluation for InverseBoxCox {
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
            *yj = component(self.lambda[j], x[j] - self.shift[j])?;
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

impl fmt::Display for InverseBoxCox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InverseBoxCox(lambda={}, shift={})", self.lambda, self.shift)
    }
}

/// Equal parameters; name, counter and history are ignored.
impl PartialEq for InverseBoxCox {
    fn eq(&self, other: &Self) -> bool {
        self.lambda == other.lambda && self.shift == other.shift
    }
}

impl Persist for InverseBoxCox {
    const CLASS_NAME: &'static str = "InverseBoxCoxEvaluation";
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
