//! The `fracdrill generate` command.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use fracdrill_core::resolver::solve_for_hidden;
use fracdrill_core::{DifficultyHint, Fraction, Problem, ProblemGenerator};

use crate::config::{load_settings_from, Overrides};

/// One line of `--format json` output.
#[derive(Debug, Serialize)]
struct GeneratedProblem<'a> {
    problem: &'a Problem,
    rendered: String,
    expected_answer: Fraction,
}

pub fn execute(
    count: usize,
    seed: Option<u64>,
    format: String,
    operations: Option<String>,
    range: Option<String>,
    question_type: Option<String>,
    config: Option<PathBuf>,
) -> Result<()> {
    let settings = load_settings_from(config.as_deref())?;
    let generation = settings.generation_config(&Overrides {
        operations,
        range,
        question_type,
    })?;

    let mut generator = match seed {
        Some(seed) => ProblemGenerator::seeded(seed),
        None => ProblemGenerator::from_entropy(),
    };

    for i in 1..=count {
        let problem = generator.generate_or_fallback(&generation, DifficultyHint::default())?;
        let expected_answer = solve_for_hidden(&problem)?;

        match format.as_str() {
            "json" => {
                let line = GeneratedProblem {
                    problem: &problem,
                    rendered: problem.render(),
                    expected_answer,
                };
                println!("{}", serde_json::to_string(&line)?);
            }
            _ => {
                println!("{i:>3}. {:<24} answer: {expected_answer}", problem.render());
            }
        }
    }

    Ok(())
}
