use core::convert::Infallible;
use core::fmt;

use evo_optimizer::prelude::*;

#[derive(Debug, PartialEq)]
struct Overflow(i64);

impl fmt::Display for Overflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value {} is too large", self.0)
    }
}

impl core::error::Error for Overflow {}

fn increment() -> FnProblem<i64, i64> {
    FnProblem::new()
        .with_mutate(|c: Candidate<i64>, _: &mut Rng, o: &mut Offspring<i64>| {
            o.submit_args(vec![c.args[0] + 1]);
            Ok::<_, Infallible>(())
        })
        .with_score(|y: &i64| Ok::<_, Infallible>(*y as f64))
}

fn identity(args: &[i64], _: &Kwargs<i64>) -> Result<i64, Infallible> {
    Ok(args[0])
}

fn population<F>(optimizer: &Optimizer<F, FnProblem<i64, i64>>) -> Vec<i64> {
    optimizer.population().iter().map(|c| c.args[0]).collect()
}

#[test]
fn test_run_step_on_empty_population() {
    let mut optimizer = Optimizer::new(identity, increment());

    let result = optimizer.run_step();
    assert!(matches!(result, Err(Error::EmptyPopulation)));
    assert_eq!(optimizer.n_steps(), 0);
}

#[test]
fn test_get_best_on_empty_population() {
    let optimizer = Optimizer::new(identity, increment());

    assert!(matches!(optimizer.get_best(), Err(Error::EmptyPopulation)));
    assert!(matches!(optimizer.into_best(), Err(Error::EmptyPopulation)));
}

#[test]
fn test_run_on_empty_population() {
    let mut optimizer = Optimizer::new(identity, increment());
    assert!(matches!(optimizer.run(5), Err(Error::EmptyPopulation)));
}

#[test]
fn test_zero_survivors_empties_population() {
    let mut optimizer = Optimizer::builder(identity, increment())
        .nr_survivors(0)
        .build();
    optimizer.submit_args(vec![1]);

    let summary = optimizer.run_step().expect("first step still runs");
    assert_eq!(summary.survivors, 0);
    assert_eq!(summary.best_score, None);
    assert!(optimizer.is_empty());

    assert!(matches!(optimizer.run_step(), Err(Error::EmptyPopulation)));
    assert!(matches!(optimizer.get_best(), Err(Error::EmptyPopulation)));
}

#[test]
fn test_target_error_propagates_unchanged() {
    let target = |args: &[i64], _: &Kwargs<i64>| {
        if args[0] > 2 {
            Err(Overflow(args[0]))
        } else {
            Ok(args[0])
        }
    };
    let mut optimizer = Optimizer::new(target, increment());
    optimizer.submit_args(vec![1]);
    optimizer.run_step().unwrap();
    let before = population(&optimizer);

    let err = optimizer.run_step().unwrap_err();

    let Error::Target(source) = &err else {
        panic!("expected a target error, got {err:?}");
    };
    assert_eq!(source.downcast_ref::<Overflow>(), Some(&Overflow(3)));
    assert_eq!(
        err.callback_error().map(ToString::to_string),
        Some("value 3 is too large".to_owned())
    );
    assert_eq!(
        population(&optimizer),
        before,
        "population keeps its pre-step state"
    );
    assert_eq!(optimizer.n_steps(), 1);
}

fn inner_optimizer_failure(_: &[i64], _: &Kwargs<i64>) -> Result<i64, Error> {
    Err(Error::EmptyPopulation)
}

#[test]
fn test_crate_error_from_target_stays_a_callback_failure() {
    let mut optimizer = Optimizer::new(inner_optimizer_failure, increment());
    optimizer.submit_args(vec![1]);

    let err = optimizer.run_step().unwrap_err();

    assert!(matches!(err, Error::Target(_)), "got {err:?}");
    let source = err.callback_error().expect("callback failure carries its source");
    assert!(matches!(
        source.downcast_ref::<Error>(),
        Some(Error::EmptyPopulation)
    ));
    assert_eq!(
        err.to_string(),
        "target function failed: empty population: submit at least one candidate first"
    );
    assert_eq!(population(&optimizer), vec![1]);
}

#[test]
fn test_crate_error_from_score_is_wrapped() {
    let problem = FnProblem::new()
        .with_mutate(|c: Candidate<i64>, _: &mut Rng, o: &mut Offspring<i64>| {
            o.submit(c);
            Ok::<_, Infallible>(())
        })
        .with_score(|_: &i64| Err::<f64, _>(Error::EmptyPopulation));
    let mut optimizer = Optimizer::new(identity, problem);
    optimizer.submit_args(vec![1]);

    let err = optimizer.run_step().unwrap_err();
    assert!(matches!(err, Error::Score(_)), "got {err:?}");
    assert!(err.callback_error().is_some());
}

#[test]
fn test_mutation_error_aborts_step() {
    let problem = FnProblem::new()
        .with_mutate(|c: Candidate<i64>, _: &mut Rng, o: &mut Offspring<i64>| {
            if c.args[0] == 2 {
                return Err(Overflow(2));
            }
            o.submit_args(vec![c.args[0] * 10]);
            Ok(())
        })
        .with_score(|y: &i64| Ok::<_, Infallible>(*y as f64));

    let mut optimizer = Optimizer::builder(identity, problem)
        .nr_offsprings(1)
        .build();
    optimizer.submit_args(vec![1]);
    optimizer.submit_args(vec![2]);

    let err = optimizer.run_step().unwrap_err();

    assert!(matches!(err, Error::Mutation(_)));
    assert_eq!(err.to_string(), "mutation failed: value 2 is too large");
    assert_eq!(
        population(&optimizer),
        vec![1, 2],
        "offspring of parent 1 discarded"
    );
    assert_eq!(optimizer.n_steps(), 0);
}

#[test]
fn test_score_error_aborts_step() {
    let problem = FnProblem::new()
        .with_mutate(|c: Candidate<i64>, _: &mut Rng, o: &mut Offspring<i64>| {
            o.submit_args(vec![c.args[0] + 1]);
            Ok::<_, Infallible>(())
        })
        .with_score(|y: &i64| {
            if *y < 0 {
                Err("negative result")
            } else {
                Ok(*y as f64)
            }
        });

    let mut optimizer = Optimizer::builder(identity, problem)
        .nr_offsprings(1)
        .build();
    optimizer.submit_args(vec![-1]);

    let err = optimizer.run_step().unwrap_err();
    assert!(matches!(err, Error::Score(_)));
    assert_eq!(err.to_string(), "scoring failed: negative result");
    assert_eq!(population(&optimizer), vec![-1]);
}

#[test]
fn test_missing_mutate_is_unimplemented() {
    let problem: FnProblem<i64, i64> =
        FnProblem::new().with_score(|y: &i64| Ok::<_, Infallible>(*y as f64));
    let mut optimizer = Optimizer::new(identity, problem);
    optimizer.submit_args(vec![1]);

    let err = optimizer.run_step().unwrap_err();
    assert!(matches!(err, Error::UnimplementedExtension("mutate")));
    assert_eq!(
        err.to_string(),
        "extension point `mutate` is not implemented"
    );
    assert!(err.callback_error().is_none());
}

#[test]
fn test_missing_score_is_unimplemented() {
    let problem: FnProblem<i64, i64> = FnProblem::new();
    let mut optimizer = Optimizer::builder(identity, problem)
        .nr_offsprings(0)
        .build();
    optimizer.submit_args(vec![1]);

    let err = optimizer.run_step().unwrap_err();
    assert!(matches!(err, Error::UnimplementedExtension("score")));
}

#[test]
fn test_evaluate_propagates_target_error() {
    let target = |_: &[i64], _: &Kwargs<i64>| Err::<i64, _>(Overflow(7));
    let optimizer = Optimizer::new(target, increment());

    let err = optimizer
        .evaluate(&Candidate::from_args(vec![7]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "target function failed: value 7 is too large"
    );
}

#[test]
fn test_empty_population_message() {
    assert_eq!(
        Error::EmptyPopulation.to_string(),
        "empty population: submit at least one candidate first"
    );
}
