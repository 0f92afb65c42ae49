//! # uqkit
//!
//! Numerical core for uncertainty quantification: special functions,
//! scalar distribution evaluators, parametric distributions, point transforms
//! with call accounting, and copulas. Every component that carries
//! parameters can be saved and restored through [`persist`].
//!
//! ## Quick start
//!
//! ```
//! use uqkit::distfunc::{pstudent, qstudent};
//! use uqkit::function::{Evaluation, InverseBoxCox};
//! use uqkit::sample::{Point, Sample};
//!
//! // Student tail probability and its inverse
//! let p = pstudent(5.0_f64, 2.0, true);
//! let t = qstudent(5.0_f64, p, true).unwrap();
//! assert!((t - 2.0).abs() < 1e-10);
//!
//! // Inverse Box-Cox on a batch, rows evaluated in parallel
//! let f = InverseBoxCox::new(Point::from([0.5])).unwrap();
//! let y = f.evaluate_sample(&Sample::from_rows(1, vec![0.0, 2.0]).unwrap()).unwrap();
//! assert_eq!(y.as_slice(), &[1.0, 4.0]);
//! assert_eq!(f.calls_number(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`special`]: gamma, beta, incomplete beta/gamma and error functions,
//!   generic over [`FloatScalar`].
//! - [`distfunc`]: `p*`/`q*`/`d*`/`r*` evaluators for the Normal, Student
//!   and Pareto families. Tail probabilities are computed directly.
//! - [`stats`]: distribution objects behind the object-safe
//!   [`stats::ContinuousDistribution`] trait.
//! - [`optim`]: Brent root finding used by the quantiles.
//! - [`sample`]: [`Point`] and row-major [`Sample`].
//! - [`function`]: the [`function::Evaluation`] trait (dimension checks, call
//!   counter, history) with the Box-Cox transforms and
//!   [`function::batch::map_rows`] for row-parallel dispatch.
//! - [`copula`]: Marshall-Olkin and independent copulas and composed
//!   distributions.
//! - [`random`]: seeded per-chunk random streams for reproducible batches.
//! - [`persist`]: explicit save/load of parameters.
//! - [`config`]: algorithm branch thresholds.
//!
//! ## Errors
//!
//! The numerical modules return small `Copy` enums ([`special::SpecialError`],
//! [`stats::StatsError`], [`optim::OptimError`]); the evaluation layer returns
//! [`Error`], which wraps them.
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade: `debug!`
//! for batch dispatch, `trace!` for quantile seeds, `warn!` when an inner
//! series fails to converge. Install any logger to see them.
//!
//! ## Cargo features
//!
//! | Feature    | Default | Description |
//! |------------|---------|-------------|
//! | `parallel` | yes     | Row-parallel batches and sampling via `rayon` |
//! | `serde`    | no      | `Serialize`/`Deserialize` for [`Point`], [`Sample`] and [`persist::Record`] |

pub mod config;
pub mod copula;
pub mod distfunc;
pub mod error;
pub mod function;
pub mod optim;
pub mod persist;
pub mod random;
pub mod sample;
pub mod special;
pub mod stats;
pub mod traits;

pub use error::{Error, Result};
pub use sample::{Point, Sample};
pub use traits::FloatScalar;
