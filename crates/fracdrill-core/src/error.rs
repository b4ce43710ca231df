//! Fraction engine error types.
//!
//! Every failure in the core is local and recoverable: the caller either
//! re-prompts the learner or regenerates the problem with a safe default
//! configuration.

use thiserror::Error;

/// Errors raised by fraction arithmetic, problem generation, and answer checking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FractionError {
    /// A zero denominator was passed where a fraction is constructed or reduced.
    #[error("denominator cannot be zero")]
    InvalidDenominator,

    /// The divisor fraction has the value zero.
    #[error("division by a zero-valued fraction")]
    DivisionByZero,

    /// The learner's submission could not be used as a fraction.
    #[error("invalid input: {0}")]
    InvalidUserInput(String),

    /// An intermediate product did not fit in a 64-bit integer.
    #[error("arithmetic overflow")]
    Overflow,

    /// A generation config was built with no operations to pick from.
    #[error("at least one operation must be enabled")]
    NoOperations,
}

impl FractionError {
    /// Returns `true` if the error came from what the learner typed and the
    /// caller should simply ask again.
    pub fn is_user_error(&self) -> bool {
        matches!(self, FractionError::InvalidUserInput(_))
    }
}

/// Convenience alias for core results.
pub type Result<T> = std::result::Result<T, FractionError>;
