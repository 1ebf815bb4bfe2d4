//! Pure grading computation.
//!
//! Scores a completed attempt against the quiz's answer key. No I/O; the
//! caller persists the outcome through the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Attempt, AttemptPatch, Quiz};

/// Result of grading one attempt against a quiz's current question set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Points earned.
    pub score: f64,
    /// Sum of points over the quiz's questions at grading time.
    pub total_points: f64,
}

impl Grade {
    /// Percentage of available points earned.
    ///
    /// A quiz whose questions are worth zero total points grades to 0%;
    /// callers can detect the degenerate case via `total_points`.
    pub fn percentage(&self) -> f64 {
        if self.total_points > 0.0 {
            self.score / self.total_points * 100.0
        } else {
            0.0
        }
    }

    /// Patch that records this grade on an attempt and marks it completed.
    pub fn completion_patch(&self, completed_at: DateTime<Utc>) -> AttemptPatch {
        AttemptPatch {
            score: Some(self.score),
            total_points: Some(self.total_points),
            is_completed: Some(true),
            completed_at: Some(completed_at),
            ..AttemptPatch::default()
        }
    }
}

/// Score an attempt against the quiz's current questions.
///
/// Total points are re-derived from the quiz at grading time, so a quiz
/// edited between start and completion is graded against what it contains
/// now. Answers are compared verbatim: case-sensitive, no trimming, no
/// partial credit. Single pass over the questions, independent of the size
/// of the answer map.
pub fn grade(quiz: &Quiz, attempt: &Attempt) -> Grade {
    let mut earned = 0.0;
    let mut possible = 0.0;

    for question in &quiz.questions {
        possible += question.points;
        if attempt.answers.get(&question.id) == Some(&question.correct_answer) {
            earned += question.points;
        }
    }

    Grade {
        score: earned,
        total_points: possible,
    }
}
