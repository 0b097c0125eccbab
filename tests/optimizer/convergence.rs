use core::ops::ControlFlow;

use evo_optimizer::prelude::*;

use crate::test_problems::{DoubleVec, VectorFinder, double_vec, squared_distance};

fn vector_finder(seed: u64) -> Optimizer<DoubleVec, VectorFinder> {
    let target: DoubleVec = double_vec;
    let mut optimizer = Optimizer::builder(target, VectorFinder::new(vec![3.0, 4.0]))
        .nr_offsprings(2)
        .nr_survivors(10)
        .seed(seed)
        .build();
    optimizer.submit_args(vec![vec![0.0, 0.0]]);
    optimizer.submit_args(vec![vec![-4.0, -2.0]]);
    optimizer.submit_args(vec![vec![2.0, 7.0]]);
    optimizer
}

#[test]
fn test_vector_finder_converges() {
    let mut optimizer = vector_finder(42);
    optimizer.run(1000).unwrap();

    let best = optimizer.get_best().unwrap();
    let doubled = double_vec(&best.args, &best.kwargs).unwrap();
    assert!(
        squared_distance(&doubled, &[3.0, 4.0]).sqrt() < 0.1,
        "doubled best {doubled:?} not close to [3, 4]"
    );
    assert!((best.args[0][0] - 1.5).abs() < 0.05);
    assert!((best.args[0][1] - 2.0).abs() < 0.05);
}

#[test]
fn test_converges_for_several_seeds() {
    for seed in [0, 1, 2, 3] {
        let mut optimizer = vector_finder(seed);
        let last = optimizer.run(1000).unwrap().unwrap();
        assert!(
            last.best_score.unwrap() > -1e-2,
            "seed {seed}: best score {:?}",
            last.best_score
        );
    }
}

#[test]
fn test_best_score_never_decreases() {
    let mut optimizer = vector_finder(9);
    let mut history = Vec::new();

    optimizer
        .run_with(300, |summary| {
            history.push(summary.best_score.unwrap());
            ControlFlow::Continue(())
        })
        .unwrap();

    assert_eq!(history.len(), 300);
    assert!(
        history.windows(2).all(|w| w[1] >= w[0]),
        "best score regressed: {history:?}"
    );
}

#[test]
fn test_population_stays_capped() {
    let mut optimizer = vector_finder(5);

    let first = optimizer.run_step().unwrap();
    assert_eq!(first.evaluated, 3 + 3 * 2);
    assert_eq!(first.survivors, 9);

    let second = optimizer.run_step().unwrap();
    assert_eq!(second.evaluated, 9 + 9 * 2);
    assert_eq!(second.survivors, 10);

    optimizer.run(50).unwrap();
    assert_eq!(optimizer.len(), 10);
    assert_eq!(optimizer.n_steps(), 52);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_step_matches_sequential() {
    let mut sequential = vector_finder(17);
    let mut parallel = vector_finder(17);

    for _ in 0..30 {
        let a = sequential.run_step().unwrap();
        let b = parallel.run_step_parallel().unwrap();
        assert_eq!(a, b);
    }
    assert_eq!(sequential.population(), parallel.population());
}
