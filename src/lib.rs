#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Mutate-and-select evolutionary optimizer for black-box parameter search.
//!
//! You supply a target function, a scoring function for its result (higher
//! is better) and a mutation operator. The [`Optimizer`] keeps a population
//! of candidate argument sets. Each step mutates every candidate, evaluates
//! parents and offspring, and keeps the best `nr_survivors`.
//!
//! # Getting Started
//!
//! Find `x` such that `2x = [3, 4]`:
//!
//! ```
//! use core::convert::Infallible;
//!
//! use evo_optimizer::prelude::*;
//!
//! struct VectorFinder {
//!     goal: Vec<f64>,
//! }
//!
//! impl Problem for VectorFinder {
//!     type Value = Vec<f64>;
//!     type Output = Vec<f64>;
//!     type Error = Infallible;
//!
//!     fn mutate(
//!         &self,
//!         mut candidate: Candidate<Vec<f64>>,
//!         rng: &mut Rng,
//!         offspring: &mut Offspring<Vec<f64>>,
//!     ) -> Result<(), Infallible> {
//!         for x in &mut candidate.args[0] {
//!             *x += (rng.f64() - 0.5) * 2.0;
//!         }
//!         offspring.submit(candidate);
//!         Ok(())
//!     }
//!
//!     fn score(&self, result: &Vec<f64>) -> Result<f64, Infallible> {
//!         Ok(-result
//!             .iter()
//!             .zip(&self.goal)
//!             .map(|(r, g)| (r - g).powi(2))
//!             .sum::<f64>())
//!     }
//! }
//!
//! let double = |args: &[Vec<f64>], _: &Kwargs<Vec<f64>>| {
//!     Ok::<_, Infallible>(args[0].iter().map(|x| 2.0 * x).collect::<Vec<f64>>())
//! };
//! let finder = VectorFinder { goal: vec![3.0, 4.0] };
//!
//! let mut optimizer = Optimizer::builder(double, finder).seed(42).build();
//! optimizer.submit_args(vec![vec![0.0, 0.0]]);
//! optimizer.submit_args(vec![vec![-4.0, -2.0]]);
//! optimizer.submit_args(vec![vec![2.0, 7.0]]);
//! optimizer.run(1000).unwrap();
//!
//! let best = optimizer.get_best().unwrap();
//! assert!((best.args[0][0] - 1.5).abs() < 0.1);
//! assert!((best.args[0][1] - 2.0).abs() < 0.1);
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Optimizer`] | Owns the population and runs expansion, evaluation and selection. |
//! | [`Candidate`] | One argument set: positional `args` plus keyword `kwargs`. |
//! | [`Target`] | The function being optimized; implemented for closures. |
//! | [`Problem`] | Problem-specific `mutate` and `score`. |
//! | [`Offspring`] | Sink through which `mutate` submits new candidates. |
//! | [`FnProblem`] | A `Problem` built from two closures. |
//! | [`ParamValue`] | Dynamic value type for targets with mixed argument types. |
//!
//! # Errors
//!
//! Stepping or reading the best candidate of an empty population fails with
//! [`Error::EmptyPopulation`]. Failures in caller code are never caught or
//! retried; they abort the step as [`Error::Target`], [`Error::Mutation`] or
//! [`Error::Score`] and leave the population as it was.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on [`Candidate`], [`ParamValue`] and [`StepSummary`] | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) for runs and steps | off |
//! | `parallel` | [`Optimizer::run_step_parallel`], evaluating candidates on the rayon thread pool | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod candidate;
mod error;
mod optimizer;
mod param;
mod problem;

pub use candidate::{Candidate, Kwargs, Offspring};
pub use error::{BoxError, Error, Result};
pub use fastrand::Rng;
pub use optimizer::{
    DEFAULT_NR_OFFSPRINGS, DEFAULT_NR_SURVIVORS, Optimizer, OptimizerBuilder, StepSummary,
};
pub use param::ParamValue;
pub use problem::{FnProblem, Problem, Target};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use evo_optimizer::prelude::*;
/// ```
pub mod prelude {
    pub use fastrand::Rng;

    pub use crate::candidate::{Candidate, Kwargs, Offspring};
    pub use crate::error::{BoxError, Error};
    pub use crate::optimizer::{Optimizer, OptimizerBuilder, StepSummary};
    pub use crate::param::ParamValue;
    pub use crate::problem::{FnProblem, Problem, Target};
}
