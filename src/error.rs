use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core.
///
/// Every variant is a caller programming error: parameters are validated
/// eagerly before any simulation state is built, and no failure is
/// recovered or retried internally. Each variant carries enough context
/// to be actionable.
#[derive(Debug, Error)]
pub enum Error {
    /// Density outside [0, 1], or a particle count incompatible with the ring.
    #[error("invalid density: {0}")]
    InvalidDensity(String),

    /// Invalid simulation parameter (slowdown probability, ring size, frame count).
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Step count must be a positive integer.
    #[error("invalid step count: {0}")]
    InvalidStepCount(String),
}
