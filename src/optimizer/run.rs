use core::ops::ControlFlow;

use crate::error::Result;
use crate::problem::{Problem, Target};

use super::{Optimizer, StepSummary};

impl<F, P> Optimizer<F, P>
where
    P: Problem,
    F: Target<P::Value, Output = P::Output>,
{
    /// Run `n_steps` steps sequentially.
    ///
    /// Returns the summary of the last step, or `None` when `n_steps` is 0.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error from
    /// [`run_step`](Optimizer::run_step). Steps completed before the failure
    /// are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::convert::Infallible;
    ///
    /// use evo_optimizer::prelude::*;
    ///
    /// let problem = FnProblem::new()
    ///     .with_mutate(|c: Candidate<i64>, rng: &mut Rng, o: &mut Offspring<i64>| {
    ///         o.submit_args(vec![c.args[0] + rng.i64(-1..=1)]);
    ///         Ok::<_, Infallible>(())
    ///     })
    ///     .with_score(|y: &i64| Ok::<_, Infallible>(-(*y as f64).abs()));
    /// let shifted = |args: &[i64], _: &Kwargs<i64>| Ok::<_, Infallible>(args[0] - 5);
    ///
    /// let mut optimizer = Optimizer::builder(shifted, problem).seed(3).build();
    /// optimizer.submit_args(vec![0]);
    ///
    /// let last = optimizer.run(100).unwrap().unwrap();
    /// assert_eq!(last.step, 100);
    /// assert_eq!(optimizer.get_best().unwrap().args, vec![5]);
    /// ```
    pub fn run(&mut self, n_steps: usize) -> Result<Option<StepSummary>> {
        self.run_with(n_steps, |_| ControlFlow::Continue(()))
    }

    /// Run up to `n_steps` steps, calling `after_step` after each one.
    ///
    /// Return `ControlFlow::Break(())` from the callback to stop early.
    /// Returns the summary of the last completed step, or `None` when no
    /// step ran.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error from
    /// [`run_step`](Optimizer::run_step).
    ///
    /// # Examples
    ///
    /// ```
    /// use core::convert::Infallible;
    /// use core::ops::ControlFlow;
    ///
    /// use evo_optimizer::prelude::*;
    ///
    /// let problem = FnProblem::new()
    ///     .with_mutate(|c: Candidate<i64>, _: &mut Rng, o: &mut Offspring<i64>| {
    ///         o.submit_args(vec![c.args[0] + 1]);
    ///         Ok::<_, Infallible>(())
    ///     })
    ///     .with_score(|y: &i64| Ok::<_, Infallible>(*y as f64));
    /// let identity = |args: &[i64], _: &Kwargs<i64>| Ok::<_, Infallible>(args[0]);
    ///
    /// let mut optimizer = Optimizer::new(identity, problem);
    /// optimizer.submit_args(vec![0]);
    ///
    /// let last = optimizer
    ///     .run_with(1_000, |summary| {
    ///         if summary.best_score >= Some(10.0) {
    ///             ControlFlow::Break(())
    ///         } else {
    ///             ControlFlow::Continue(())
    ///         }
    ///     })
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(last.step, 10);
    /// ```
    pub fn run_with(
        &mut self,
        n_steps: usize,
        mut after_step: impl FnMut(&StepSummary) -> ControlFlow<()>,
    ) -> Result<Option<StepSummary>> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "run",
            n_steps,
            nr_offsprings = self.nr_offsprings,
            nr_survivors = self.nr_survivors
        )
        .entered();

        let mut last = None;
        for _ in 0..n_steps {
            let summary = self.run_step()?;
            last = Some(summary);
            if let ControlFlow::Break(()) = after_step(&summary) {
                trace_info!(step = summary.step, "run stopped early");
                break;
            }
        }

        #[cfg(feature = "tracing")]
        {
            if let Some(summary) = &last {
                tracing::info!(
                    steps = summary.step,
                    best_score = ?summary.best_score,
                    "run finished"
                );
            }
        }
        Ok(last)
    }
}
