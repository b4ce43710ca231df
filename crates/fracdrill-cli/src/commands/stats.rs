//! The `fracdrill stats` command.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use fracdrill_core::{SessionProgress, SessionState};

use crate::config::load_settings_from;

pub fn execute(progress_file: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let settings = load_settings_from(config.as_deref())?;
    let Some(path) = progress_file.or(settings.progress_file) else {
        anyhow::bail!("no progress file configured; pass --progress-file or set progress_file");
    };

    if !path.exists() {
        println!("No saved progress at {}", path.display());
        return Ok(());
    }

    let progress = SessionProgress::load_json(&path)?;
    let state = SessionState::from_progress(&progress);

    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Questions", "Correct", "Accuracy", "Streak", "Last played"]);
    table.add_row(vec![
        Cell::new(state.total_questions),
        Cell::new(state.correct_answers),
        Cell::new(format!("{:.1}%", state.accuracy())),
        Cell::new(state.streak),
        Cell::new(progress.last_updated.format("%Y-%m-%d %H:%M UTC")),
    ]);
    println!("{table}");

    if !progress.is_fresh(Utc::now()) {
        println!("This session has expired; the next `fracdrill play` starts fresh.");
    }

    Ok(())
}
