//! The `quizkit show` command.

use std::path::PathBuf;

use anyhow::Result;

use quizkit_store::{JsonStore, QuizStore};

use crate::config::resolve_data_dir;

pub async fn execute(quiz_id: String, data_dir: Option<PathBuf>) -> Result<()> {
    let store = JsonStore::open(resolve_data_dir(data_dir)?).await?;

    let Some(quiz) = store.quiz(&quiz_id).await? else {
        anyhow::bail!("quiz not found: {quiz_id}");
    };

    println!("Quiz: {} ({})", quiz.title, quiz.id);
    if !quiz.description.is_empty() {
        println!("  {}", quiz.description);
    }
    println!("  owner: {}", quiz.owner_id);
    println!("  active: {}", quiz.is_active);
    match quiz.time_limit_minutes {
        Some(minutes) => println!("  time limit: {minutes} min"),
        None => println!("  time limit: none"),
    }
    println!("  questions:");
    for (i, q) in quiz.questions.iter().enumerate() {
        println!(
            "    [{}] {} {} {} pts \"{}\"",
            i + 1,
            q.id,
            q.kind,
            q.points,
            q.prompt,
        );
        if !q.options.is_empty() {
            println!("        options: {}", q.options.join(" | "));
        }
    }

    Ok(())
}
