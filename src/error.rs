use thiserror::Error;

/// Errors of the randomized directed driver.
///
/// Caller-misuse preconditions elsewhere in the crate (index-misaligned
/// weights, non-positive weights, mismatched primes, ...) are fatal and
/// panic;
/// only the driver's configuration and its bounded prime sampling produce
/// typed errors.
#[derive(Debug, Error, PartialEq)]
pub enum McbError {
    /// The bounded resampling policy gave up before finding a prime
    #[error("no suitable prime of {bits} bits found after {attempts} attempts")]
    PrimeSampling { bits: u32, attempts: u32 },

    /// The requested error probability is outside `(0, 1)`
    #[error("error probability must be in (0, 1), got {0}")]
    InvalidErrorProbability(f64),

    /// The caller-chosen fixed prime is not actually prime
    #[error("{0} is not a prime")]
    NotAPrime(u64),
}
