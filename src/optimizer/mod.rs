//! The optimizer engine: population state, seeding, and best-candidate access.

use crate::candidate::{Candidate, Kwargs};
use crate::error::{Error, Result};
use crate::problem::{Problem, Target};

mod builder;
mod run;
mod step;

pub use builder::OptimizerBuilder;
pub use step::StepSummary;

/// Default number of mutation attempts per candidate per step.
pub const DEFAULT_NR_OFFSPRINGS: usize = 2;

/// Default population cap enforced after every step.
pub const DEFAULT_NR_SURVIVORS: usize = 10;

/// A mutate-and-select optimizer over candidate argument sets.
///
/// The optimizer owns a population of [`Candidate`]s. Each
/// [`run_step`](Optimizer::run_step) mutates every candidate
/// `nr_offsprings` times, evaluates all candidates with the target function
/// and the problem's scoring function, and keeps the `nr_survivors`
/// best-scoring ones.
///
/// `F` is the [`Target`] being optimized and `P` the [`Problem`] providing
/// mutation and scoring.
///
/// # Examples
///
/// ```
/// use core::convert::Infallible;
///
/// use evo_optimizer::prelude::*;
///
/// let problem = FnProblem::new()
///     .with_mutate(|mut c: Candidate<f64>, rng: &mut Rng, o: &mut Offspring<f64>| {
///         c.args[0] += rng.f64() * 2.0 - 1.0;
///         o.submit(c);
///         Ok::<_, Infallible>(())
///     })
///     .with_score(|y: &f64| Ok::<_, Infallible>(-(y - 9.0).abs()));
/// let square = |args: &[f64], _: &Kwargs<f64>| Ok::<_, Infallible>(args[0] * args[0]);
///
/// let mut optimizer = Optimizer::builder(square, problem).seed(7).build();
/// optimizer.submit_args(vec![1.0]);
/// optimizer.run(200).unwrap();
///
/// let best = optimizer.get_best().unwrap();
/// assert!((best.args[0].abs() - 3.0).abs() < 0.5);
/// ```
pub struct Optimizer<F, P>
where
    P: Problem,
{
    /// The function being optimized.
    pub(crate) target: F,
    /// Mutation operator and scoring function.
    pub(crate) problem: P,
    /// Mutation attempts per candidate per step.
    pub(crate) nr_offsprings: usize,
    /// Population cap after each step.
    pub(crate) nr_survivors: usize,
    /// Current candidates, best first after a step.
    pub(crate) population: Vec<Candidate<P::Value>>,
    /// Random source handed to [`Problem::mutate`].
    pub(crate) rng: fastrand::Rng,
    /// Number of completed steps.
    pub(crate) n_steps: u64,
}

impl<F, P> Optimizer<F, P>
where
    P: Problem,
    F: Target<P::Value, Output = P::Output>,
{
    /// Create an optimizer with the default population parameters
    /// (`nr_offsprings = 2`, `nr_survivors = 10`) and an entropy-seeded RNG.
    ///
    /// The population starts empty; seed it with
    /// [`submit_candidate`](Optimizer::submit_candidate) before stepping.
    #[must_use]
    pub fn new(target: F, problem: P) -> Self {
        Self::builder(target, problem).build()
    }

    /// Return an [`OptimizerBuilder`] for configuring population parameters
    /// and the RNG seed.
    #[must_use]
    pub fn builder(target: F, problem: P) -> OptimizerBuilder<F, P> {
        OptimizerBuilder::new(target, problem)
    }

    /// Score a single candidate: `score(target(args, kwargs))`.
    ///
    /// The population is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Target`] or [`Error::Score`] when the corresponding
    /// callback fails.
    pub fn evaluate(&self, candidate: &Candidate<P::Value>) -> Result<f64> {
        step::score_candidate(&self.target, &self.problem, candidate)
    }
}

impl<F, P> Optimizer<F, P>
where
    P: Problem,
{
    /// Append a candidate built from positional and keyword arguments.
    ///
    /// The candidate is neither scored nor deduplicated.
    pub fn submit_candidate(&mut self, args: Vec<P::Value>, kwargs: Kwargs<P::Value>) {
        self.population.push(Candidate::new(args, kwargs));
    }

    /// Append a candidate with positional arguments only.
    pub fn submit_args(&mut self, args: Vec<P::Value>) {
        self.population.push(Candidate::from_args(args));
    }

    /// Append an already-built candidate.
    pub fn submit(&mut self, candidate: Candidate<P::Value>) {
        self.population.push(candidate);
    }

    /// Return the highest-scoring candidate of the most recent step.
    ///
    /// Nothing is re-scored: this is the head of the population. Before the
    /// first [`run_step`](Optimizer::run_step) the head is simply the first
    /// submitted candidate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPopulation`] if the population is empty.
    pub fn get_best(&self) -> Result<&Candidate<P::Value>> {
        self.population.first().ok_or(Error::EmptyPopulation)
    }

    /// Consume the optimizer and return the best candidate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPopulation`] if the population is empty.
    pub fn into_best(self) -> Result<Candidate<P::Value>> {
        self.population
            .into_iter()
            .next()
            .ok_or(Error::EmptyPopulation)
    }

    /// The current population, best first after a step.
    #[must_use]
    pub fn population(&self) -> &[Candidate<P::Value>] {
        &self.population
    }

    /// Number of candidates in the population.
    #[must_use]
    pub fn len(&self) -> usize {
        self.population.len()
    }

    /// Returns `true` if the population is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    /// Mutation attempts per candidate per step.
    #[must_use]
    pub fn nr_offsprings(&self) -> usize {
        self.nr_offsprings
    }

    /// Population cap enforced after every step.
    #[must_use]
    pub fn nr_survivors(&self) -> usize {
        self.nr_survivors
    }

    /// Number of steps completed so far.
    #[must_use]
    pub fn n_steps(&self) -> u64 {
        self.n_steps
    }

    /// The target function.
    #[must_use]
    pub fn target(&self) -> &F {
        &self.target
    }

    /// The problem definition.
    #[must_use]
    pub fn problem(&self) -> &P {
        &self.problem
    }
}

impl<F, P> core::fmt::Debug for Optimizer<F, P>
where
    P: Problem,
    P::Value: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Optimizer")
            .field("nr_offsprings", &self.nr_offsprings)
            .field("nr_survivors", &self.nr_survivors)
            .field("n_steps", &self.n_steps)
            .field("population", &self.population)
            .finish_non_exhaustive()
    }
}
