//! Core data model types for fracdrill.
//!
//! Operations, denominator ranges, and question types are closed enums with
//! the same string tags the settings file uses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FractionError, Result};
use crate::fraction::{self, Fraction};

/// One of the four arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    /// Apply the operation to two fractions.
    pub fn apply(self, a: &Fraction, b: &Fraction) -> Result<Fraction> {
        match self {
            Operation::Addition => fraction::add(a, b),
            Operation::Subtraction => fraction::subtract(a, b),
            Operation::Multiplication => fraction::multiply(a, b),
            Operation::Division => fraction::divide(a, b),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Addition => "+",
            Operation::Subtraction => "−",
            Operation::Multiplication => "×",
            Operation::Division => "÷",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
            Operation::Multiplication => "multiplication",
            Operation::Division => "division",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "addition" | "add" | "+" => Ok(Operation::Addition),
            "subtraction" | "sub" | "-" | "−" => Ok(Operation::Subtraction),
            "multiplication" | "mul" | "*" | "×" | "x" => Ok(Operation::Multiplication),
            "division" | "div" | "/" | "÷" => Ok(Operation::Division),
            other => Err(format!("unknown operation: {other}")),
        }
    }
}

/// The allowed denominator bounds. The lower bound is always 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DenominatorRange {
    #[default]
    #[serde(rename = "1-5")]
    UpTo5,
    #[serde(rename = "1-10")]
    UpTo10,
    #[serde(rename = "1-12")]
    UpTo12,
    #[serde(rename = "1-15")]
    UpTo15,
}

impl DenominatorRange {
    pub fn min(self) -> i64 {
        1
    }

    pub fn max(self) -> i64 {
        match self {
            DenominatorRange::UpTo5 => 5,
            DenominatorRange::UpTo10 => 10,
            DenominatorRange::UpTo12 => 12,
            DenominatorRange::UpTo15 => 15,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DenominatorRange::UpTo5 => "1-5",
            DenominatorRange::UpTo10 => "1-10",
            DenominatorRange::UpTo12 => "1-12",
            DenominatorRange::UpTo15 => "1-15",
        }
    }
}

impl fmt::Display for DenominatorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DenominatorRange {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "1-5" | "5" => Ok(DenominatorRange::UpTo5),
            "1-10" | "10" => Ok(DenominatorRange::UpTo10),
            "1-12" | "12" => Ok(DenominatorRange::UpTo12),
            "1-15" | "15" => Ok(DenominatorRange::UpTo15),
            other => Err(format!(
                "unknown denominator range: {other} (expected 1-5, 1-10, 1-12 or 1-15)"
            )),
        }
    }
}

/// What kind of element the learner is asked to supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    #[default]
    MissingResult,
    MissingOperand,
    /// Pick one of the other two per problem.
    Both,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MissingResult => write!(f, "missing-result"),
            QuestionType::MissingOperand => write!(f, "missing-operand"),
            QuestionType::Both => write!(f, "both"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "missing-result" | "result" => Ok(QuestionType::MissingResult),
            "missing-operand" | "operand" => Ok(QuestionType::MissingOperand),
            "both" | "mixed" => Ok(QuestionType::Both),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// Which element of `fraction1 op fraction2 = result` is masked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HiddenElement {
    Fraction1,
    Fraction2,
    Result,
}

impl HiddenElement {
    /// Input label shown next to the answer field.
    pub fn prompt(self) -> &'static str {
        match self {
            HiddenElement::Result => "Enter the result",
            HiddenElement::Fraction1 => "Enter the first fraction",
            HiddenElement::Fraction2 => "Enter the second fraction",
        }
    }
}

/// Caller-supplied generation settings. Read-only to the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGenerationConfig")]
pub struct GenerationConfig {
    operations: Vec<Operation>,
    denominator_range: DenominatorRange,
    question_type: QuestionType,
}

#[derive(Deserialize)]
struct RawGenerationConfig {
    operations: Vec<Operation>,
    #[serde(default)]
    denominator_range: DenominatorRange,
    #[serde(default)]
    question_type: QuestionType,
}

impl TryFrom<RawGenerationConfig> for GenerationConfig {
    type Error = FractionError;

    fn try_from(raw: RawGenerationConfig) -> Result<Self> {
        GenerationConfig::new(raw.operations, raw.denominator_range, raw.question_type)
    }
}

impl GenerationConfig {
    /// Build a config. Duplicate operations are dropped; an empty set is rejected.
    pub fn new(
        operations: impl IntoIterator<Item = Operation>,
        denominator_range: DenominatorRange,
        question_type: QuestionType,
    ) -> Result<Self> {
        let mut ops: Vec<Operation> = Vec::new();
        for op in operations {
            if !ops.contains(&op) {
                ops.push(op);
            }
        }
        if ops.is_empty() {
            return Err(FractionError::NoOperations);
        }
        Ok(Self {
            operations: ops,
            denominator_range,
            question_type,
        })
    }

    /// Addition only, denominators 1-5.
    pub fn safe_default() -> Self {
        Self {
            operations: vec![Operation::Addition],
            denominator_range: DenominatorRange::UpTo5,
            question_type: QuestionType::MissingResult,
        }
    }

    /// Skips validation so tests can hand the generator an impossible config.
    #[cfg(test)]
    pub(crate) fn unchecked(
        operations: Vec<Operation>,
        denominator_range: DenominatorRange,
        question_type: QuestionType,
    ) -> Self {
        Self {
            operations,
            denominator_range,
            question_type,
        }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn denominator_range(&self) -> DenominatorRange {
        self.denominator_range
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    /// Same config with a different question type.
    pub fn with_question_type(mut self, question_type: QuestionType) -> Self {
        self.question_type = question_type;
        self
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::safe_default()
    }
}

/// A generated equation `fraction1 op fraction2 = correct_answer` with one
/// element hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub fraction1: Fraction,
    pub fraction2: Fraction,
    pub operation: Operation,
    /// The result of the operation, in lowest terms.
    pub correct_answer: Fraction,
    pub hidden_element: HiddenElement,
    /// Resolved question type; never [`QuestionType::Both`].
    pub question_type: QuestionType,
}

impl Problem {
    /// Equation text with the hidden element shown as `?`.
    pub fn render(&self) -> String {
        let show = |element: HiddenElement, value: &Fraction| {
            if self.hidden_element == element {
                "?".to_string()
            } else {
                value.to_string()
            }
        };
        format!(
            "{} {} {} = {}",
            show(HiddenElement::Fraction1, &self.fraction1),
            self.operation,
            show(HiddenElement::Fraction2, &self.fraction2),
            show(HiddenElement::Result, &self.correct_answer),
        )
    }
}

/// Outcome of checking a learner's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_correct: bool,
    /// The expected value of the hidden element, reduced.
    pub correct_answer: Fraction,
}
