//! Running tally of a practice session.
//!
//! `SessionState` is a plain value: [`SessionState::record`] returns the next
//! state instead of mutating, and the caller decides where it lives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::generator::DifficultyHint;
use crate::model::Verdict;
use crate::progress::SessionProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub id: Uuid,
    /// Consecutive correct answers.
    pub streak: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub started_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn starting_at(started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            streak: 0,
            total_questions: 0,
            correct_answers: 0,
            started_at,
        }
    }

    /// The tally after one more checked answer.
    pub fn record(&self, verdict: &Verdict) -> Self {
        let mut next = *self;
        next.total_questions = next.total_questions.saturating_add(1);
        if verdict.is_correct {
            next.correct_answers = next.correct_answers.saturating_add(1);
            next.streak = next.streak.saturating_add(1);
        } else {
            next.streak = 0;
        }
        next
    }

    /// Percentage of correct answers, 0 before the first question.
    pub fn accuracy(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            self.correct_answers as f64 / self.total_questions as f64 * 100.0
        }
    }

    pub fn difficulty_hint(&self) -> DifficultyHint {
        DifficultyHint::new(self.streak, self.total_questions)
    }

    /// Snapshot for persistence, stamped with `now`.
    pub fn to_progress(&self, now: DateTime<Utc>) -> SessionProgress {
        SessionProgress {
            session_id: self.id,
            streak: self.streak,
            total_questions: self.total_questions,
            correct_answers: self.correct_answers,
            session_start: self.started_at,
            last_updated: now,
        }
    }

    pub fn from_progress(progress: &SessionProgress) -> Self {
        Self {
            id: progress.session_id,
            streak: progress.streak,
            total_questions: progress.total_questions,
            correct_answers: progress.correct_answers,
            started_at: progress.session_start,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
