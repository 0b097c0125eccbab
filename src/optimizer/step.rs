use core::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::candidate::{Candidate, Offspring};
use crate::error::{Error, Result};
use crate::problem::{Problem, Target, propagate};

use super::Optimizer;

/// Outcome of one completed step.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepSummary {
    /// 1-based index of the step.
    pub step: u64,
    /// Candidates evaluated in this step (parents plus offspring).
    pub evaluated: usize,
    /// Population size after selection.
    pub survivors: usize,
    /// Score of the best survivor, or `None` if nothing survived.
    ///
    /// `NaN` scores are reported as negative infinity.
    pub best_score: Option<f64>,
}

/// `score(target(args, kwargs))` for one candidate.
pub(crate) fn score_candidate<F, P>(
    target: &F,
    problem: &P,
    candidate: &Candidate<P::Value>,
) -> Result<f64>
where
    P: Problem,
    F: Target<P::Value, Output = P::Output>,
{
    let result = target
        .invoke(&candidate.args, &candidate.kwargs)
        .map_err(|e| propagate(e, Error::Target))?;
    problem
        .score(&result)
        .map_err(|e| propagate(e.into(), Error::Score))
}

/// Selection key: `NaN` ranks with negative infinity so the order is total.
fn rank_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

impl<F, P> Optimizer<F, P>
where
    P: Problem,
    F: Target<P::Value, Output = P::Output>,
{
    /// Run one expansion, evaluation and selection step.
    ///
    /// 1. Every candidate present when the step starts is passed to
    ///    [`Problem::mutate`] `nr_offsprings` times, each time as a fresh
    ///    clone. Offspring are not mutated again within the same step.
    /// 2. Parents and offspring are each evaluated exactly once with the
    ///    target function and [`Problem::score`].
    /// 3. All candidates are stably sorted by descending score (equal scores
    ///    keep parents-then-offspring production order) and truncated to
    ///    `nr_survivors`.
    ///
    /// The population is replaced only once the whole step has succeeded.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyPopulation`] if there is nothing to step.
    /// - [`Error::Mutation`], [`Error::Target`] or [`Error::Score`] when a
    ///   callback fails. The step is aborted, the population keeps its
    ///   pre-step state and any offspring produced so far are discarded.
    /// - [`Error::UnimplementedExtension`] from a [`FnProblem`](crate::FnProblem)
    ///   missing a closure.
    pub fn run_step(&mut self) -> Result<StepSummary> {
        if self.population.is_empty() {
            return Err(Error::EmptyPopulation);
        }

        let offspring = self.expand()?;

        let scores = self
            .population
            .iter()
            .chain(&offspring)
            .map(|candidate| score_candidate(&self.target, &self.problem, candidate))
            .collect::<Result<Vec<f64>>>()?;

        Ok(self.select(offspring, &scores))
    }

    /// Mutate every current candidate `nr_offsprings` times and collect the
    /// submitted offspring in production order.
    fn expand(&mut self) -> Result<Vec<Candidate<P::Value>>> {
        let mut produced = Vec::with_capacity(self.population.len() * self.nr_offsprings);

        for parent in &self.population {
            for _ in 0..self.nr_offsprings {
                let mut offspring = Offspring::new();
                self.problem
                    .mutate(parent.clone(), &mut self.rng, &mut offspring)
                    .map_err(|e| propagate(e.into(), Error::Mutation))?;
                produced.extend(offspring.into_vec());
            }
        }

        Ok(produced)
    }

    /// Rank parents followed by `offspring` using `scores` (same order) and
    /// install the survivors as the new population.
    fn select(&mut self, offspring: Vec<Candidate<P::Value>>, scores: &[f64]) -> StepSummary {
        let mut candidates = core::mem::take(&mut self.population);
        candidates.extend(offspring);
        let evaluated = candidates.len();

        let mut ranked: Vec<(f64, Candidate<P::Value>)> = scores
            .iter()
            .map(|&s| rank_key(s))
            .zip(candidates)
            .collect();
        // Stable: ties keep production order.
        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        ranked.truncate(self.nr_survivors);

        let best_score = ranked.first().map(|(score, _)| *score);
        self.population = ranked.into_iter().map(|(_, c)| c).collect();
        self.n_steps += 1;

        let summary = StepSummary {
            step: self.n_steps,
            evaluated,
            survivors: self.population.len(),
            best_score,
        };
        trace_debug!(
            step = summary.step,
            evaluated = summary.evaluated,
            survivors = summary.survivors,
            best_score = ?summary.best_score,
            "step completed"
        );
        summary
    }
}

#[cfg(feature = "parallel")]
impl<F, P> Optimizer<F, P>
where
    P: Problem + Sync,
    P::Value: Send + Sync,
    F: Target<P::Value, Output = P::Output> + Sync,
{
    /// Like [`run_step`](Optimizer::run_step), but evaluates the expanded
    /// population on the rayon thread pool.
    ///
    /// Expansion stays sequential so the mutation RNG stream is the same as
    /// in `run_step`, and selection runs over the complete, index-ordered
    /// scores, so ordering and tie-breaking are identical.
    ///
    /// # Errors
    ///
    /// Same as [`run_step`](Optimizer::run_step). If several evaluations
    /// fail, which error is returned is unspecified.
    pub fn run_step_parallel(&mut self) -> Result<StepSummary> {
        if self.population.is_empty() {
            return Err(Error::EmptyPopulation);
        }

        let offspring = self.expand()?;

        let target = &self.target;
        let problem = &self.problem;
        let scores = self
            .population
            .par_iter()
            .chain(offspring.par_iter())
            .map(|candidate| score_candidate(target, problem, candidate))
            .collect::<Result<Vec<f64>>>()?;

        Ok(self.select(offspring, &scores))
    }
}
