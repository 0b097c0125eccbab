//! The extension contract that specializes the optimizer to a problem.
//!
//! Two traits meet at the [`Optimizer`](crate::Optimizer):
//!
//! - [`Target`] is the function being optimized. Any closure
//!   `Fn(&[V], &Kwargs<V>) -> Result<O, E>` implements it.
//! - [`Problem`] supplies the problem-specific mutation operator and scoring
//!   function.
//!
//! For a quick experiment, [`FnProblem`] builds a `Problem` from two
//! closures:
//!
//! ```
//! use core::convert::Infallible;
//!
//! use evo_optimizer::prelude::*;
//!
//! let problem = FnProblem::new()
//!     .with_mutate(|mut c: Candidate<f64>, rng: &mut Rng, offspring: &mut Offspring<f64>| {
//!         c.args[0] += rng.f64() - 0.5;
//!         offspring.submit(c);
//!         Ok::<_, Infallible>(())
//!     })
//!     .with_score(|y: &f64| Ok::<_, Infallible>(-(y - 1.0).abs()));
//!
//! let target = |args: &[f64], _: &Kwargs<f64>| Ok::<_, Infallible>(args[0] * args[0]);
//! let mut optimizer = Optimizer::new(target, problem);
//! optimizer.submit_args(vec![0.0]);
//! optimizer.run(20).unwrap();
//! assert!(optimizer.len() <= 10);
//! ```

use core::fmt;

use crate::candidate::{Candidate, Kwargs, Offspring};
use crate::error::{BoxError, Error};

/// The function being optimized.
///
/// Implemented for every closure `Fn(&[V], &Kwargs<V>) -> Result<O, E>` where
/// `E: Into<BoxError>`, so most callers never implement it by hand. Closure
/// argument types usually need annotations so the closure accepts any
/// borrow lifetime:
///
/// ```
/// use core::convert::Infallible;
///
/// use evo_optimizer::{Kwargs, Target};
///
/// let double = |args: &[f64], _: &Kwargs<f64>| Ok::<_, Infallible>(args[0] * 2.0);
/// let kwargs: Kwargs<f64> = Kwargs::new();
/// assert_eq!(double.invoke(&[1.5], &kwargs).unwrap(), 3.0);
/// ```
///
/// The optimizer only ever holds a shared reference to the target.
pub trait Target<V> {
    /// The value returned by the target, passed on to [`Problem::score`].
    type Output;

    /// Invoke the target with a candidate's positional and keyword arguments.
    ///
    /// # Errors
    ///
    /// Any failure of the target. The optimizer does not catch or retry it;
    /// the step in progress is aborted with
    /// [`Error::Target`](crate::Error::Target).
    fn invoke(&self, args: &[V], kwargs: &Kwargs<V>) -> Result<Self::Output, BoxError>;
}

impl<V, F, O, E> Target<V> for F
where
    F: Fn(&[V], &Kwargs<V>) -> Result<O, E>,
    E: Into<BoxError>,
{
    type Output = O;

    fn invoke(&self, args: &[V], kwargs: &Kwargs<V>) -> Result<O, BoxError> {
        self(args, kwargs).map_err(Into::into)
    }
}

/// Problem-specific mutation and scoring.
///
/// Both methods are required; the optimizer depends on nothing else.
///
/// # Implementing a problem
///
/// ```
/// use core::convert::Infallible;
///
/// use evo_optimizer::prelude::*;
///
/// /// Searches for an argument vector whose image under the target is `goal`.
/// struct VectorFinder {
///     goal: Vec<f64>,
/// }
///
/// impl Problem for VectorFinder {
///     type Value = Vec<f64>;
///     type Output = Vec<f64>;
///     type Error = Infallible;
///
///     fn mutate(
///         &self,
///         mut candidate: Candidate<Vec<f64>>,
///         rng: &mut Rng,
///         offspring: &mut Offspring<Vec<f64>>,
///     ) -> Result<(), Infallible> {
///         for x in &mut candidate.args[0] {
///             *x += (rng.f64() - 0.5) * 2.0;
///         }
///         offspring.submit(candidate);
///         Ok(())
///     }
///
///     fn score(&self, result: &Vec<f64>) -> Result<f64, Infallible> {
///         Ok(-result
///             .iter()
///             .zip(&self.goal)
///             .map(|(r, g)| (r - g).powi(2))
///             .sum::<f64>())
///     }
/// }
/// ```
pub trait Problem {
    /// Type of each positional and keyword argument value.
    type Value: Clone;

    /// Type returned by the target function.
    type Output;

    /// Error type of [`mutate`](Problem::mutate) and [`score`](Problem::score).
    type Error: Into<BoxError>;

    /// Perturb one candidate and submit the results to `offspring`.
    ///
    /// `candidate` is a fresh deep copy owned by this call; modifying it never
    /// affects the candidate still in the population. Submitting zero
    /// candidates discards the attempt; submitting several is allowed.
    ///
    /// # Errors
    ///
    /// Any error aborts the current step with
    /// [`Error::Mutation`](crate::Error::Mutation).
    fn mutate(
        &self,
        candidate: Candidate<Self::Value>,
        rng: &mut fastrand::Rng,
        offspring: &mut Offspring<Self::Value>,
    ) -> Result<(), Self::Error>;

    /// Map a target result to a fitness value. Higher is better.
    ///
    /// Should be deterministic in `result` so selection is reproducible.
    ///
    /// # Errors
    ///
    /// Any error aborts the current step with
    /// [`Error::Score`](crate::Error::Score).
    fn score(&self, result: &Self::Output) -> Result<f64, Self::Error>;
}

type MutateFn<V> = dyn Fn(Candidate<V>, &mut fastrand::Rng, &mut Offspring<V>) -> Result<(), BoxError>
    + Send
    + Sync;
type ScoreFn<O> = dyn Fn(&O) -> Result<f64, BoxError> + Send + Sync;

/// A [`Problem`] assembled from closures.
///
/// A missing closure is reported as
/// [`Error::UnimplementedExtension`](crate::Error::UnimplementedExtension)
/// the first time the optimizer needs it.
pub struct FnProblem<V, O> {
    mutate: Option<Box<MutateFn<V>>>,
    score: Option<Box<ScoreFn<O>>>,
}

impl<V, O> FnProblem<V, O> {
    /// Creates a problem with neither extension point set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mutate: None,
            score: None,
        }
    }

    /// Set the mutation operator.
    #[must_use]
    pub fn with_mutate<F, E>(mut self, f: F) -> Self
    where
        F: Fn(Candidate<V>, &mut fastrand::Rng, &mut Offspring<V>) -> Result<(), E>
            + Send
            + Sync
            + 'static,
        E: Into<BoxError>,
    {
        self.mutate = Some(Box::new(
            move |candidate: Candidate<V>,
                  rng: &mut fastrand::Rng,
                  offspring: &mut Offspring<V>|
                  -> Result<(), BoxError> {
                f(candidate, rng, offspring).map_err(Into::into)
            },
        ));
        self
    }

    /// Set the scoring function.
    #[must_use]
    pub fn with_score<F, E>(mut self, f: F) -> Self
    where
        F: Fn(&O) -> Result<f64, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.score = Some(Box::new(move |result: &O| -> Result<f64, BoxError> {
            f(result).map_err(Into::into)
        }));
        self
    }
}

impl<V, O> Default for FnProblem<V, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, O> fmt::Debug for FnProblem<V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProblem")
            .field("has_mutate", &self.mutate.is_some())
            .field("has_score", &self.score.is_some())
            .finish()
    }
}

impl<V: Clone, O> Problem for FnProblem<V, O> {
    type Value = V;
    type Output = O;
    type Error = BoxError;

    fn mutate(
        &self,
        candidate: Candidate<V>,
        rng: &mut fastrand::Rng,
        offspring: &mut Offspring<V>,
    ) -> Result<(), BoxError> {
        match &self.mutate {
            Some(f) => f(candidate, rng, offspring),
            None => Err(Box::new(Error::UnimplementedExtension("mutate"))),
        }
    }

    fn score(&self, result: &O) -> Result<f64, BoxError> {
        match &self.score {
            Some(f) => f(result),
            None => Err(Box::new(Error::UnimplementedExtension("score"))),
        }
    }
}

/// Convert an error from caller code into an [`Error`].
///
/// Only the unimplemented-extension marker of [`FnProblem`] passes through
/// unwrapped. Everything else, including an [`Error`] raised by a nested
/// optimizer, is a callback failure and is wrapped with `wrap`.
pub(crate) fn propagate(err: BoxError, wrap: fn(BoxError) -> Error) -> Error {
    match err.downcast::<Error>() {
        Ok(inner) => match *inner {
            Error::UnimplementedExtension(name) => Error::UnimplementedExtension(name),
            other => wrap(Box::new(other)),
        },
        Err(other) => wrap(other),
    }
}
