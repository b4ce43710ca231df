//! The `fracdrill play` command.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use rand::Rng;

use fracdrill_core::resolver::{check_answer, parse_user_input, validate_fraction_input};
use fracdrill_core::{
    FractionError, GenerationConfig, ProblemGenerator, SessionProgress, SessionState, Verdict,
};

use crate::config::{load_settings_from, Overrides};

#[allow(clippy::too_many_arguments)]
pub fn execute(
    operations: Option<String>,
    range: Option<String>,
    question_type: Option<String>,
    rounds: Option<u32>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    progress_file: Option<PathBuf>,
    fresh: bool,
) -> Result<()> {
    let settings = load_settings_from(config.as_deref())?;
    let generation = settings.generation_config(&Overrides {
        operations,
        range,
        question_type,
    })?;
    let progress_path = progress_file.or(settings.progress_file);

    let state = match (&progress_path, fresh) {
        (Some(path), false) => match SessionProgress::load_resumable(path, Utc::now())? {
            Some(progress) => SessionState::from_progress(&progress),
            None => SessionState::new(),
        },
        _ => SessionState::new(),
    };

    let mut generator = match seed {
        Some(seed) => ProblemGenerator::seeded(seed),
        None => ProblemGenerator::from_entropy(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session {
        input: stdin.lock(),
        output: stdout.lock(),
        progress_path: progress_path.as_deref(),
    };

    writeln!(
        session.output,
        "Fraction drill: {} | denominators {} | {}",
        generation
            .operations()
            .iter()
            .map(|op| op.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        generation.denominator_range(),
        generation.question_type(),
    )?;
    writeln!(session.output, "Answer as n/d; type q to quit.")?;

    let state = session.run(&mut generator, &generation, state, rounds)?;
    session.output.write_all(summary_table(&state).as_bytes())?;
    writeln!(session.output)?;
    Ok(())
}

/// Interactive loop over any line source.
struct Session<'a, R, W> {
    input: R,
    output: W,
    progress_path: Option<&'a Path>,
}

impl<R: BufRead, W: Write> Session<'_, R, W> {
    /// Play until `rounds` answers are checked, the learner quits, or input ends.
    fn run<G: Rng>(
        &mut self,
        generator: &mut ProblemGenerator<G>,
        config: &GenerationConfig,
        mut state: SessionState,
        rounds: Option<u32>,
    ) -> Result<SessionState> {
        let mut answered = 0u32;

        'problems: while rounds.map_or(true, |limit| answered < limit) {
            let problem = generator.generate_or_fallback(config, state.difficulty_hint())?;
            writeln!(self.output, "\n  {}", problem.render())?;

            // A wrong answer keeps the same problem on screen.
            while rounds.map_or(true, |limit| answered < limit) {
                write!(self.output, "{}: ", problem.hidden_element.prompt())?;
                self.output.flush()?;

                let mut line = String::new();
                if self.input.read_line(&mut line)? == 0 {
                    break 'problems;
                }
                let line = line.trim();
                if matches!(line, "q" | "quit" | "exit") {
                    break 'problems;
                }

                let verdict: Verdict = match parse_user_input(line).and_then(|(n, d)| {
                    validate_fraction_input(n, d)?;
                    check_answer(&problem, n, d)
                }) {
                    Ok(verdict) => verdict,
                    Err(FractionError::InvalidUserInput(message)) => {
                        writeln!(self.output, "{message}. Try again.")?;
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                };

                state = state.record(&verdict);
                answered += 1;
                self.save(&state)?;

                if verdict.is_correct {
                    writeln!(self.output, "Correct! Streak: {}", state.streak)?;
                    continue 'problems;
                }
                writeln!(
                    self.output,
                    "Incorrect. The answer is {}",
                    verdict.correct_answer
                )?;
            }
        }

        Ok(state)
    }

    fn save(&self, state: &SessionState) -> Result<()> {
        if let Some(path) = self.progress_path {
            state.to_progress(Utc::now()).save_json(path)?;
        }
        Ok(())
    }
}

fn summary_table(state: &SessionState) -> String {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Questions", "Correct", "Accuracy", "Streak"]);
    table.add_row(vec![
        Cell::new(state.total_questions),
        Cell::new(state.correct_answers),
        Cell::new(format!("{:.1}%", state.accuracy())),
        Cell::new(state.streak),
    ]);
    format!("\n{table}")
}
