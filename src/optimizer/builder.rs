use crate::problem::{Problem, Target};

use super::{DEFAULT_NR_OFFSPRINGS, DEFAULT_NR_SURVIVORS, Optimizer};

/// A builder for constructing [`Optimizer`] instances with a fluent API.
///
/// Created via [`Optimizer::builder()`].
///
/// # Defaults
///
/// - `nr_offsprings`: 2
/// - `nr_survivors`: 10
/// - RNG: seeded from entropy
///
/// No values are validated. With `nr_survivors(0)` the first step leaves the
/// population empty and the next one fails with
/// [`Error::EmptyPopulation`](crate::Error::EmptyPopulation).
///
/// # Examples
///
/// ```
/// use core::convert::Infallible;
///
/// use evo_optimizer::prelude::*;
///
/// let problem: FnProblem<i64, i64> = FnProblem::new();
/// let identity = |args: &[i64], _: &Kwargs<i64>| Ok::<_, Infallible>(args[0]);
///
/// let optimizer = Optimizer::builder(identity, problem)
///     .nr_offsprings(4)
///     .nr_survivors(32)
///     .seed(42)
///     .build();
///
/// assert_eq!(optimizer.nr_offsprings(), 4);
/// assert_eq!(optimizer.nr_survivors(), 32);
/// ```
pub struct OptimizerBuilder<F, P> {
    target: F,
    problem: P,
    nr_offsprings: usize,
    nr_survivors: usize,
    seed: Option<u64>,
}

impl<F, P> OptimizerBuilder<F, P> {
    pub(super) fn new(target: F, problem: P) -> Self {
        Self {
            target,
            problem,
            nr_offsprings: DEFAULT_NR_OFFSPRINGS,
            nr_survivors: DEFAULT_NR_SURVIVORS,
            seed: None,
        }
    }

    /// Set how many times each candidate is mutated per step.
    #[must_use]
    pub fn nr_offsprings(mut self, nr_offsprings: usize) -> Self {
        self.nr_offsprings = nr_offsprings;
        self
    }

    /// Set the population cap enforced after every step.
    #[must_use]
    pub fn nr_survivors(mut self, nr_survivors: usize) -> Self {
        self.nr_survivors = nr_survivors;
        self
    }

    /// Seed the RNG passed to the mutation operator, for reproducible runs.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the [`Optimizer`] with an empty population.
    #[must_use]
    pub fn build(self) -> Optimizer<F, P>
    where
        P: Problem,
        F: Target<P::Value, Output = P::Output>,
    {
        let rng = self
            .seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

        Optimizer {
            target: self.target,
            problem: self.problem,
            nr_offsprings: self.nr_offsprings,
            nr_survivors: self.nr_survivors,
            population: Vec::new(),
            rng,
            n_steps: 0,
        }
    }
}
