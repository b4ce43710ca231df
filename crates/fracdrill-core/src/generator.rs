//! Random problem generation.
//!
//! Draws two positive operands within the configured denominator range,
//! orders them for subtraction, computes the stored result, and picks the
//! element to hide. An optional [`DifficultyHint`] nudges denominators up
//! or down based on how the session is going.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{FractionError, Result};
use crate::fraction::Fraction;
use crate::model::{GenerationConfig, HiddenElement, Operation, Problem, QuestionType};

/// A streak longer than this makes problems slightly harder.
pub const HARDER_STREAK: u32 = 5;
/// After this many questions, a broken streak makes problems slightly easier.
pub const EASIER_AFTER_QUESTIONS: u32 = 3;
/// Denominators are never nudged below this.
pub const MIN_EASY_DENOMINATOR: i64 = 2;

/// Session-derived input to difficulty shaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DifficultyHint {
    /// Consecutive correct answers.
    pub streak: u32,
    /// Questions answered so far.
    pub total_questions: u32,
}

/// How a hint changes the drawn operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyAdjustment {
    Steady,
    /// First denominator one step toward the range maximum.
    Harder,
    /// Both denominators one step toward [`MIN_EASY_DENOMINATOR`].
    Easier,
}

impl DifficultyHint {
    pub fn new(streak: u32, total_questions: u32) -> Self {
        Self {
            streak,
            total_questions,
        }
    }

    pub fn adjustment(&self) -> DifficultyAdjustment {
        if self.streak > HARDER_STREAK {
            DifficultyAdjustment::Harder
        } else if self.streak == 0 && self.total_questions > EASIER_AFTER_QUESTIONS {
            DifficultyAdjustment::Easier
        } else {
            DifficultyAdjustment::Steady
        }
    }
}

/// Produces problems from a random source.
pub struct ProblemGenerator<R = StdRng> {
    rng: R,
}

impl ProblemGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic generator; the same seed yields the same problems.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ProblemGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate one problem for `config`, shaped by `hint`.
    pub fn generate(
        &mut self,
        config: &GenerationConfig,
        hint: DifficultyHint,
    ) -> Result<Problem> {
        let operation = *config
            .operations()
            .choose(&mut self.rng)
            .ok_or(FractionError::NoOperations)?;

        let max_denominator = config.denominator_range().max();
        let first = self.draw_fraction(max_denominator)?;
        let second = self.draw_fraction(max_denominator)?;
        let (mut fraction1, mut fraction2) = order_operands(operation, first, second);

        let question_type = match config.question_type() {
            QuestionType::Both => {
                if self.rng.gen_bool(0.5) {
                    QuestionType::MissingResult
                } else {
                    QuestionType::MissingOperand
                }
            }
            other => other,
        };

        let hidden_element = match question_type {
            QuestionType::MissingOperand => {
                if self.rng.gen_bool(0.5) {
                    HiddenElement::Fraction1
                } else {
                    HiddenElement::Fraction2
                }
            }
            _ => HiddenElement::Result,
        };

        match hint.adjustment() {
            DifficultyAdjustment::Steady => {}
            DifficultyAdjustment::Harder => {
                let d = (fraction1.denominator() + 1).min(max_denominator);
                fraction1 = fraction1.with_denominator(d)?;
            }
            DifficultyAdjustment::Easier => {
                let d1 = (fraction1.denominator() - 1).max(MIN_EASY_DENOMINATOR);
                let d2 = (fraction2.denominator() - 1).max(MIN_EASY_DENOMINATOR);
                fraction1 = fraction1.with_denominator(d1)?;
                fraction2 = fraction2.with_denominator(d2)?;
            }
        }
        // Adjusted denominators can flip the subtraction order again.
        (fraction1, fraction2) = order_operands(operation, fraction1, fraction2);

        let correct_answer = operation.apply(&fraction1, &fraction2)?;

        let problem = Problem {
            fraction1,
            fraction2,
            operation,
            correct_answer,
            hidden_element,
            question_type,
        };
        tracing::debug!(
            problem = %problem.render(),
            answer = %problem.correct_answer,
            adjustment = ?hint.adjustment(),
            "generated problem"
        );
        Ok(problem)
    }

    /// Like [`generate`](Self::generate), but retries once with
    /// [`GenerationConfig::safe_default`] if the configured draw fails.
    ///
    /// The retry keeps the caller's question type and drops the difficulty
    /// hint. A config without operations is the one input that fails here.
    pub fn generate_or_fallback(
        &mut self,
        config: &GenerationConfig,
        hint: DifficultyHint,
    ) -> Result<Problem> {
        match self.generate(config, hint) {
            Ok(problem) => Ok(problem),
            Err(e) => {
                tracing::warn!("problem generation failed ({e}), falling back to safe defaults");
                let fallback =
                    GenerationConfig::safe_default().with_question_type(config.question_type());
                self.generate(&fallback, DifficultyHint::default())
            }
        }
    }

    /// Denominator in `1..=max`, numerator in `1..=2*denominator`.
    fn draw_fraction(&mut self, max_denominator: i64) -> Result<Fraction> {
        let denominator = self.rng.gen_range(1..=max_denominator.max(1));
        let numerator = self.rng.gen_range(1..=denominator * 2);
        Fraction::new(numerator, denominator)
    }
}

/// For subtraction, put the larger value first so the result is not negative.
fn order_operands(
    operation: Operation,
    first: Fraction,
    second: Fraction,
) -> (Fraction, Fraction) {
    if operation == Operation::Subtraction && second.cmp_value(&first).is_gt() {
        (second, first)
    } else {
        (first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fraction::equals;
    use crate::model::DenominatorRange;

    fn config(ops: &[Operation], range: DenominatorRange, qt: QuestionType) -> GenerationConfig {
        GenerationConfig::new(ops.iter().copied(), range, qt).unwrap()
    }

    #[test]
    fn same_seed_same_problem() {
        let cfg = config(&Operation::ALL, DenominatorRange::UpTo12, QuestionType::Both);
        let a = ProblemGenerator::seeded(99)
            .generate(&cfg, DifficultyHint::default())
            .unwrap();
        let b = ProblemGenerator::seeded(99)
            .generate(&cfg, DifficultyHint::default())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn operands_within_range() {
        let cfg = config(&Operation::ALL, DenominatorRange::UpTo10, QuestionType::Both);
        let mut generator = ProblemGenerator::seeded(1);
        for _ in 0..500 {
            let p = generator.generate(&cfg, DifficultyHint::default()).unwrap();
            for f in [p.fraction1, p.fraction2] {
                assert!((1..=10).contains(&f.denominator()), "{f}");
                assert!((1..=2 * f.denominator()).contains(&f.numerator()), "{f}");
            }
            assert!(cfg.operations().contains(&p.operation));
        }
    }

    #[test]
    fn subtraction_never_negative() {
        let cfg = config(
            &[Operation::Subtraction],
            DenominatorRange::UpTo5,
            QuestionType::MissingResult,
        );
        let mut generator = ProblemGenerator::seeded(7);
        for _ in 0..500 {
            let p = generator.generate(&cfg, DifficultyHint::default()).unwrap();
            assert!(p.fraction1.cmp_value(&p.fraction2).is_ge(), "{}", p.render());
            assert!(p.correct_answer.numerator() >= 0);
        }
    }

    #[test]
    fn stored_answer_matches_operands() {
        let cfg = config(&Operation::ALL, DenominatorRange::UpTo15, QuestionType::Both);
        let mut generator = ProblemGenerator::seeded(3);
        let hints = [
            DifficultyHint::default(),
            DifficultyHint::new(8, 10),
            DifficultyHint::new(0, 10),
        ];
        for i in 0..600 {
            let p = generator.generate(&cfg, hints[i % hints.len()]).unwrap();
            let expected = p.operation.apply(&p.fraction1, &p.fraction2).unwrap();
            assert!(equals(&expected, &p.correct_answer), "{}", p.render());
        }
    }

    #[test]
    fn missing_result_hides_result() {
        let cfg = config(&Operation::ALL, DenominatorRange::UpTo5, QuestionType::MissingResult);
        let mut generator = ProblemGenerator::seeded(11);
        for _ in 0..100 {
            let p = generator.generate(&cfg, DifficultyHint::default()).unwrap();
            assert_eq!(p.hidden_element, HiddenElement::Result);
            assert_eq!(p.question_type, QuestionType::MissingResult);
        }
    }

    #[test]
    fn missing_operand_hides_both_sides() {
        let cfg = config(&Operation::ALL, DenominatorRange::UpTo5, QuestionType::MissingOperand);
        let mut generator = ProblemGenerator::seeded(12);
        let hidden: Vec<_> = (0..200)
            .map(|_| generator.generate(&cfg, DifficultyHint::default()).unwrap().hidden_element)
            .collect();
        assert!(!hidden.contains(&HiddenElement::Result));
        assert!(hidden.contains(&HiddenElement::Fraction1));
        assert!(hidden.contains(&HiddenElement::Fraction2));
    }

    #[test]
    fn both_resolves_to_concrete_types() {
        let cfg = config(&[Operation::Addition], DenominatorRange::UpTo5, QuestionType::Both);
        let mut generator = ProblemGenerator::seeded(13);
        let types: Vec<_> = (0..200)
            .map(|_| generator.generate(&cfg, DifficultyHint::default()).unwrap().question_type)
            .collect();
        assert!(!types.contains(&QuestionType::Both));
        assert!(types.contains(&QuestionType::MissingResult));
        assert!(types.contains(&QuestionType::MissingOperand));
    }

    #[test]
    fn hint_thresholds() {
        assert_eq!(DifficultyHint::new(6, 6).adjustment(), DifficultyAdjustment::Harder);
        assert_eq!(DifficultyHint::new(5, 9).adjustment(), DifficultyAdjustment::Steady);
        assert_eq!(DifficultyHint::new(0, 4).adjustment(), DifficultyAdjustment::Easier);
        assert_eq!(DifficultyHint::new(0, 3).adjustment(), DifficultyAdjustment::Steady);
    }

    #[test]
    fn harder_stays_within_range() {
        let cfg = config(
            &[Operation::Multiplication],
            DenominatorRange::UpTo5,
            QuestionType::MissingResult,
        );
        let mut generator = ProblemGenerator::seeded(21);
        for _ in 0..300 {
            let p = generator.generate(&cfg, DifficultyHint::new(10, 10)).unwrap();
            assert!(p.fraction1.denominator() <= 5);
            assert!(p.fraction1.denominator() >= 2);
        }
    }

    #[test]
    fn easier_never_below_two() {
        let cfg = config(&Operation::ALL, DenominatorRange::UpTo10, QuestionType::Both);
        let mut generator = ProblemGenerator::seeded(22);
        for _ in 0..300 {
            let p = generator.generate(&cfg, DifficultyHint::new(0, 8)).unwrap();
            assert!(p.fraction1.denominator() >= MIN_EASY_DENOMINATOR);
            assert!(p.fraction2.denominator() >= MIN_EASY_DENOMINATOR);
            assert!(p.fraction1.denominator() <= 9 && p.fraction2.denominator() <= 9);
            if p.operation == Operation::Subtraction {
                assert!(p.fraction1.cmp_value(&p.fraction2).is_ge());
            }
        }
    }

    #[test]
    fn fallback_passes_through_success() {
        let cfg = config(
            &[Operation::Division],
            DenominatorRange::UpTo12,
            QuestionType::MissingOperand,
        );
        let a = ProblemGenerator::seeded(5)
            .generate_or_fallback(&cfg, DifficultyHint::default())
            .unwrap();
        let b = ProblemGenerator::seeded(5)
            .generate(&cfg, DifficultyHint::default())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fallback_recovers_from_empty_config() {
        let cfg = GenerationConfig::unchecked(
            Vec::new(),
            DenominatorRange::UpTo15,
            QuestionType::MissingOperand,
        );
        let mut generator = ProblemGenerator::seeded(7);
        assert_eq!(
            generator.generate(&cfg, DifficultyHint::default()),
            Err(FractionError::NoOperations)
        );

        for _ in 0..100 {
            let p = generator
                .generate_or_fallback(&cfg, DifficultyHint::new(10, 10))
                .unwrap();
            assert_eq!(p.operation, Operation::Addition);
            assert_eq!(p.question_type, QuestionType::MissingOperand);
            assert_ne!(p.hidden_element, HiddenElement::Result);
            for f in [p.fraction1, p.fraction2] {
                assert!((1..=5).contains(&f.denominator()), "{f}");
            }
        }
    }
}
