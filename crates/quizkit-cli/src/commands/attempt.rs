//! The `quizkit attempt` command.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;

use quizkit_core::model::{AttemptDraft, Role};
use quizkit_store::{AccountStore, AttemptStore, JsonStore, QuizStore};

use crate::config::resolve_data_dir;

pub async fn execute(
    quiz_id: String,
    student_id: String,
    answers: Vec<String>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let answers = parse_answers(&answers)?;

    let store = JsonStore::open(resolve_data_dir(data_dir)?).await?;

    if store.quiz(&quiz_id).await?.is_none() {
        anyhow::bail!("quiz not found: {quiz_id}");
    }
    match store.account(&student_id).await? {
        None => anyhow::bail!("student account not found: {student_id}"),
        Some(account) if account.role != Role::Student => {
            anyhow::bail!("account '{}' is not a student", account.username)
        }
        Some(_) => {}
    }

    let attempt = store
        .create_attempt(AttemptDraft {
            quiz_id,
            student_id,
            answers,
        })
        .await?;
    println!("Started attempt: {}", attempt.id);

    Ok(())
}

/// Parse repeated `QUESTION_ID=ANSWER` pairs.
fn parse_answers(pairs: &[String]) -> Result<HashMap<String, String>> {
    let mut answers = HashMap::new();
    for pair in pairs {
        let Some((question_id, answer)) = pair.split_once('=') else {
            anyhow::bail!("invalid answer '{pair}' (expected QUESTION_ID=ANSWER)");
        };
        answers.insert(question_id.to_string(), answer.to_string());
    }
    Ok(answers)
}
