//! Answer derivation and checking.
//!
//! The hidden element of `fraction1 op fraction2 = result` is recovered by
//! inverting the operation with the known operand and the stored result.
//! Subtraction and division are not commutative, so each side has its own
//! inverse.

use crate::error::{FractionError, Result};
use crate::fraction::{self, Fraction};
use crate::model::{HiddenElement, Operation, Problem, Verdict};

/// Largest numerator or denominator magnitude the front end accepts.
pub const MAX_INPUT_MAGNITUDE: i64 = 1000;

/// The value the learner must supply for `problem.hidden_element`.
pub fn solve_for_hidden(problem: &Problem) -> Result<Fraction> {
    let Problem {
        fraction1: f1,
        fraction2: f2,
        correct_answer: result,
        ..
    } = problem;

    match (problem.hidden_element, problem.operation) {
        (HiddenElement::Result, _) => Ok(*result),

        (HiddenElement::Fraction1, Operation::Addition) => fraction::subtract(result, f2),
        (HiddenElement::Fraction1, Operation::Subtraction) => fraction::add(result, f2),
        (HiddenElement::Fraction1, Operation::Multiplication) => fraction::divide(result, f2),
        (HiddenElement::Fraction1, Operation::Division) => fraction::multiply(result, f2),

        (HiddenElement::Fraction2, Operation::Addition) => fraction::subtract(result, f1),
        (HiddenElement::Fraction2, Operation::Subtraction) => fraction::subtract(f1, result),
        (HiddenElement::Fraction2, Operation::Multiplication) => fraction::divide(result, f1),
        (HiddenElement::Fraction2, Operation::Division) => fraction::divide(f1, result),
    }
}

/// Compare the learner's `numerator / denominator` against the hidden value.
///
/// The returned [`Verdict`] always carries the expected answer so it can be
/// shown after a miss.
pub fn check_answer(
    problem: &Problem,
    user_numerator: i64,
    user_denominator: i64,
) -> Result<Verdict> {
    if user_denominator == 0 {
        return Err(FractionError::InvalidUserInput(
            "Denominator cannot be zero".into(),
        ));
    }
    let user = Fraction::new(user_numerator, user_denominator)?;
    let expected = solve_for_hidden(problem)?;
    let is_correct = fraction::equals(&user, &expected);
    tracing::debug!(%user, %expected, is_correct, "checked answer");

    Ok(Verdict {
        is_correct,
        correct_answer: expected,
    })
}

/// [`check_answer`] for raw text fields; non-integers are rejected.
pub fn check_answer_text(problem: &Problem, numerator: &str, denominator: &str) -> Result<Verdict> {
    let parse = |field: &str| {
        field
            .trim()
            .parse::<i64>()
            .map_err(|_| FractionError::InvalidUserInput("Please enter valid numbers".into()))
    };
    check_answer(problem, parse(numerator)?, parse(denominator)?)
}

/// Parse one line of learner input (`n/d`, `n d`, or `n`) into its parts.
pub fn parse_user_input(text: &str) -> Result<(i64, i64)> {
    fraction::split_parts(text)
}

/// Reject submissions the front end should not even check.
pub fn validate_fraction_input(numerator: i64, denominator: i64) -> Result<()> {
    if denominator == 0 {
        return Err(FractionError::InvalidUserInput(
            "Denominator cannot be zero".into(),
        ));
    }
    if numerator.unsigned_abs() > MAX_INPUT_MAGNITUDE as u64
        || denominator.unsigned_abs() > MAX_INPUT_MAGNITUDE as u64
    {
        return Err(FractionError::InvalidUserInput(
            "Please use smaller numbers".into(),
        ));
    }
    Ok(())
}
