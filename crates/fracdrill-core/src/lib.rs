//! fracdrill-core — exact fraction arithmetic and practice problem engine.
//!
//! This crate defines the fraction value type and its arithmetic, the random
//! problem generator, and the answer resolver that the fracdrill front end
//! builds on.

pub mod error;
pub mod fraction;
pub mod generator;
pub mod model;
pub mod progress;
pub mod resolver;
pub mod session;

pub use error::FractionError;
pub use fraction::Fraction;
pub use generator::{DifficultyHint, ProblemGenerator};
pub use model::{
    DenominatorRange, GenerationConfig, HiddenElement, Operation, Problem, QuestionType, Verdict,
};
pub use progress::SessionProgress;
pub use session::SessionState;
