/// Boxed error produced by caller-supplied code (target function, mutation or
/// scoring).
///
/// The original error value is preserved and can be recovered with
/// [`downcast_ref`](https://doc.rust-lang.org/std/error/trait.Error.html#method.downcast_ref).
pub type BoxError = Box<dyn core::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when stepping or reading the best candidate with no candidates
    /// in the population.
    #[error("empty population: submit at least one candidate first")]
    EmptyPopulation,

    /// Returned when an extension point (`mutate` or `score`) has no
    /// implementation.
    #[error("extension point `{0}` is not implemented")]
    UnimplementedExtension(&'static str),

    /// Returned when the target function fails while evaluating a candidate.
    #[error("target function failed: {0}")]
    Target(#[source] BoxError),

    /// Returned when the mutation operator fails.
    #[error("mutation failed: {0}")]
    Mutation(#[source] BoxError),

    /// Returned when the scoring function fails.
    #[error("scoring failed: {0}")]
    Score(#[source] BoxError),
}

impl Error {
    /// Returns the error raised by caller-supplied code, if this is a
    /// propagated failure.
    #[must_use]
    pub fn callback_error(&self) -> Option<&(dyn core::error::Error + Send + Sync + 'static)> {
        match self {
            Error::Target(e) | Error::Mutation(e) | Error::Score(e) => Some(e.as_ref()),
            Error::EmptyPopulation | Error::UnimplementedExtension(_) => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
