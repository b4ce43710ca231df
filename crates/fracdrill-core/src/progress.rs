//! Saved session progress with JSON persistence.
//!
//! A saved tally is only resumed if it was updated within the last hour;
//! older records are treated as a finished session.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How long after its last update a saved session may be resumed.
pub const RESUME_WINDOW_SECS: i64 = 60 * 60;

/// Persisted streak/accuracy record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProgress {
    pub session_id: Uuid,
    pub streak: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub session_start: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl SessionProgress {
    /// Whether this record is recent enough to resume at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.last_updated) < Duration::seconds(RESUME_WINDOW_SECS)
    }

    /// Save the progress as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize progress")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create progress directory {}", parent.display())
            })?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write progress to {}", path.display()))?;
        tracing::debug!(path = %path.display(), "saved progress");
        Ok(())
    }

    /// Load progress from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read progress from {}", path.display()))?;
        let progress: SessionProgress =
            serde_json::from_str(&content).context("failed to parse progress JSON")?;
        Ok(progress)
    }

    /// Load progress that can still be resumed. Missing or stale files yield `None`.
    pub fn load_resumable(path: &Path, now: DateTime<Utc>) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let progress = Self::load_json(path)?;
        if progress.is_fresh(now) {
            tracing::debug!(path = %path.display(), "resuming saved progress");
            Ok(Some(progress))
        } else {
            tracing::debug!(path = %path.display(), "saved progress is stale, ignoring");
            Ok(None)
        }
    }
}
