//! The `quizkit grade` command.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use quizkit_core::grading;
use quizkit_store::{AttemptStore, JsonStore, QuizStore};

use crate::config::resolve_data_dir;

pub async fn execute(attempt_id: String, data_dir: Option<PathBuf>) -> Result<()> {
    let store = JsonStore::open(resolve_data_dir(data_dir)?).await?;

    let Some(attempt) = store.attempt(&attempt_id).await? else {
        anyhow::bail!("attempt not found: {attempt_id}");
    };
    let Some(quiz) = store.quiz(&attempt.quiz_id).await? else {
        anyhow::bail!(
            "quiz not found for attempt: {} (deleted after the attempt started?)",
            attempt.quiz_id
        );
    };

    if attempt.is_completed {
        eprintln!("attempt {attempt_id} was already completed; regrading");
    }

    let grade = grading::grade(&quiz, &attempt);
    if grade.total_points == 0.0 {
        eprintln!("quiz '{}' is worth zero points; grading to 0%", quiz.title);
    }

    store
        .update_attempt(&attempt_id, grade.completion_patch(Utc::now()))
        .await?;

    println!(
        "Graded attempt {}: {}/{} ({:.1}%)",
        attempt_id,
        grade.score,
        grade.total_points,
        grade.percentage(),
    );

    Ok(())
}
