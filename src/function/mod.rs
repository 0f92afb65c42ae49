//! Point transforms evaluated on points and samples.
//!
//! An [`Evaluation`] supplies a pure row kernel ([`Evaluation::compute`]) and
//! an [`EvaluationState`] holding its name, call counter and history. The
//! provided methods add the shared discipline on top:
//!
//! - the input dimension is checked before any work is done;
//! - [`Evaluation::evaluate_sample`] fans rows out through [`batch::map_rows`],
//!   keeps input order and fails the whole batch at the first failing row;
//! - the counter and history are updated once per call, after success, so a
//!   failing call leaves them untouched.
//!
//! | Evaluation | Map |
//! |---|---|
//! | [`InverseBoxCox`] | `(λ(x − s) + 1)^(1/λ)` |
//! | [`BoxCox`] | `(x^λ − 1)/λ + s` |
//!
//! ```
//! use uqkit::function::{Evaluation, InverseBoxCox};
//! use uqkit::sample::{Point, Sample};
//!
//! let f = InverseBoxCox::new(Point::from([0.5, 2.0])).unwrap();
//! let y = f.evaluate(&Point::from([1.0, 1.0])).unwrap();
//! assert!((y[0] - 2.25).abs() < 1e-15);
//! assert!((y[1] - 3.0_f64.sqrt()).abs() < 1e-15);
//!
//! let s = Sample::from_rows(2, vec![1.0, 1.0, 0.0, 0.0]).unwrap();
//! let out = f.evaluate_sample(&s).unwrap();
//! assert_eq!(out.row(0), y.as_slice());
//! assert_eq!(f.calls_number(), 3);
//! ```

pub mod batch;
mod box_cox;
mod history;
mod inverse_box_cox;

#[cfg(test)]
mod tests;

pub use box_cox::BoxCox;
pub use history::{History, HistoryStrategy};
pub use inverse_box_cox::InverseBoxCox;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};
use crate::sample::{Point, Sample};

/// Instance name given to evaluations that were not named explicitly.
pub const DEFAULT_NAME: &str = "Unnamed";

/// Name, call counter and history shared by every evaluation.
///
/// The counter is a relaxed atomic: it is diagnostic, not a synchronisation
/// point. The history sits behind a mutex that is only taken when recording
/// is enabled.
#[derive(Debug)]
pub struct EvaluationState {
    name: String,
    calls: AtomicUsize,
    recording: AtomicBool,
    history: Mutex<History>,
}

impl EvaluationState {
    /// Fresh state: zero calls, history disabled.
    pub fn new(input_dimension: usize, output_dimension: usize) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            calls: AtomicUsize::new(0),
            recording: AtomicBool::new(false),
            history: Mutex::new(History::new(HistoryStrategy::Null, input_dimension, output_dimension)),
        }
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the instance.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Number of points evaluated so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Select what the history keeps. Clears anything recorded so far.
    pub fn set_history_strategy(&self, strategy: HistoryStrategy) {
        let mut h = self.lock_history();
        h.set_strategy(strategy);
        self.recording.store(strategy != HistoryStrategy::Null, Ordering::Release);
    }

    /// Snapshot of the recorded inputs and outputs.
    pub fn history(&self) -> History {
        self.lock_history().clone()
    }

    /// Drop recorded rows, keeping the strategy.
    pub fn clear_history(&self) {
        self.lock_history().clear();
    }

    fn lock_history(&self) -> MutexGuard<'_, History> {
        // A panic while appending leaves at worst a partial record.
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Account for one successfully evaluated point.
    pub(crate) fn record_point(&self, input: &[f64], output: &[f64]) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.recording.load(Ordering::Acquire) {
            self.lock_history().record_point(input, output);
        }
    }

    /// Account for a successfully evaluated batch.
    pub(crate) fn record_sample(&self, input: &Sample, output: &Sample) {
        self.calls.fetch_add(input.size(), Ordering::Relaxed);
        if self.recording.load(Ordering::Acquire) {
            self.lock_history().record_sample(input, output);
        }
    }
}

impl Clone for EvaluationState {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            calls: AtomicUsize::new(self.calls()),
            recording: AtomicBool::new(self.recording.load(Ordering::Acquire)),
            history: Mutex::new(self.history()),
        }
    }
}

/// A map from points of one dimension to points of another.
pub trait Evaluation: Send + Sync {
    /// Class name used in [`repr`](Self::repr) and persisted records.
    fn class_name(&self) -> &'static str;

    /// Dimension of the points this evaluation accepts.
    fn input_dimension(&self) -> usize;

    /// Dimension of the points it produces.
    fn output_dimension(&self) -> usize;

    /// Evaluate one row into `y` with no side effects.
    ///
    /// `x` and `y` already have the declared dimensions.
    fn compute(&self, x: &[f64], y: &mut [f64]) -> Result<()>;

    /// Name, counter and history.
    fn state(&self) -> &EvaluationState;

    /// Instance name.
    fn name(&self) -> &str {
        self.state().name()
    }

    /// Number of points evaluated so far, single and batch calls combined.
    fn calls_number(&self) -> usize {
        self.state().calls()
    }

    /// Evaluate one point.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` for a point of the wrong dimension, otherwise
    /// whatever the kernel reports.
    fn evaluate(&self, x: &Point) -> Result<Point> {
        if x.dimension() != self.input_dimension() {
            return Err(Error::DimensionMismatch {
                expected: self.input_dimension(),
                got: x.dimension(),
            });
        }
        let mut y = Point::zeros(self.output_dimension());
        self.compute(x, &mut y)?;
        self.state().record_point(x, &y);
        Ok(y)
    }

    /// Evaluate every row of a sample.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` before any row runs; `InvalidRow` naming the
    /// first failing row in input order.
    fn evaluate_sample(&self, x: &Sample) -> Result<Sample> {
        let y = batch::map_rows(x, self.input_dimension(), self.output_dimension(), |xi, yi| {
            self.compute(xi, yi)
        })?;
        self.state().record_sample(x, &y);
        Ok(y)
    }

    /// Debug form with class, name and dimensions.
    fn repr(&self) -> String {
        format!(
            "class={} name={} inputDimension={} outputDimension={}",
            self.class_name(),
            self.name(),
            self.input_dimension(),
            self.output_dimension()
        )
    }
}

/// Validate a `(lambda, shift)` pair shared by the Box-Cox evaluations.
fn check_box_cox_parameters(lambda: &Point, shift: &Point) -> Result<()> {
    if lambda.dimension() == 0 {
        return Err(Error::InvalidArgument("the exponent vector must not be empty".into()));
    }
    if lambda.dimension() != shift.dimension() {
        return Err(Error::InvalidArgument(format!(
            "the exponent vector has dimension {} but the shift has dimension {}",
            lambda.dimension(),
            shift.dimension()
        )));
    }
    if lambda.iter().chain(shift.iter()).any(|v| !v.is_finite()) {
        return Err(Error::InvalidArgument(format!(
            "Box-Cox parameters must be finite, got lambda={lambda} shift={shift}"
        )));
    }
    Ok(())
}
