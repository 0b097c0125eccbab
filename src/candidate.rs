//! Candidate argument sets and the offspring sink used by mutation.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Keyword arguments of a candidate, keyed by name.
pub type Kwargs<V> = BTreeMap<String, V>;

/// One argument set for the target function: positional values plus keyword
/// values.
///
/// Candidates are plain owned data. The optimizer clones a candidate before
/// handing it to [`Problem::mutate`](crate::Problem::mutate), so the copy can
/// be modified in place without affecting the original.
///
/// # Examples
///
/// ```
/// use evo_optimizer::{Candidate, Kwargs, ParamValue};
///
/// let mut kwargs = Kwargs::new();
/// kwargs.insert("scale".to_owned(), ParamValue::Float(0.5));
/// let candidate = Candidate::new(vec![ParamValue::Int(3)], kwargs);
///
/// assert_eq!(candidate.args.len(), 1);
/// assert_eq!(candidate.kwarg("scale"), Some(&ParamValue::Float(0.5)));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidate<V> {
    /// Positional arguments, in call order.
    pub args: Vec<V>,
    /// Keyword arguments.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kwargs: Kwargs<V>,
}

impl<V> Candidate<V> {
    /// Creates a candidate from positional and keyword arguments.
    #[must_use]
    pub fn new(args: Vec<V>, kwargs: Kwargs<V>) -> Self {
        Self { args, kwargs }
    }

    /// Creates a candidate with positional arguments only.
    #[must_use]
    pub fn from_args(args: Vec<V>) -> Self {
        Self {
            args,
            kwargs: Kwargs::new(),
        }
    }

    /// Returns the keyword argument `name`, if present.
    #[must_use]
    pub fn kwarg(&self, name: &str) -> Option<&V> {
        self.kwargs.get(name)
    }

    /// Splits the candidate into its positional and keyword arguments.
    #[must_use]
    pub fn into_parts(self) -> (Vec<V>, Kwargs<V>) {
        (self.args, self.kwargs)
    }
}

impl<V> From<Vec<V>> for Candidate<V> {
    fn from(args: Vec<V>) -> Self {
        Self::from_args(args)
    }
}

/// Collects the candidates submitted by one call to
/// [`Problem::mutate`](crate::Problem::mutate).
///
/// The sink is the only channel through which mutation can add candidates;
/// it exposes nothing about the rest of the population.
#[derive(Debug)]
pub struct Offspring<V> {
    submitted: Vec<Candidate<V>>,
}

impl<V> Offspring<V> {
    pub(crate) fn new() -> Self {
        Self {
            submitted: Vec::new(),
        }
    }

    /// Submits a new candidate built from positional and keyword arguments.
    pub fn submit_candidate(&mut self, args: Vec<V>, kwargs: Kwargs<V>) {
        self.submitted.push(Candidate::new(args, kwargs));
    }

    /// Submits a new candidate with positional arguments only.
    pub fn submit_args(&mut self, args: Vec<V>) {
        self.submitted.push(Candidate::from_args(args));
    }

    /// Submits an already-built candidate.
    pub fn submit(&mut self, candidate: Candidate<V>) {
        self.submitted.push(candidate);
    }

    /// Number of candidates submitted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.submitted.len()
    }

    /// Returns `true` if nothing has been submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.submitted.is_empty()
    }

    pub(crate) fn into_vec(self) -> Vec<Candidate<V>> {
        self.submitted
    }
}
