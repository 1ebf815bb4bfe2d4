//! The `quizkit list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizkit_store::{AccountStore, AttemptStore, JsonStore, QuizStore};

use crate::config::resolve_data_dir;

pub async fn execute(
    what: String,
    owner: Option<String>,
    student: Option<String>,
    quiz: Option<String>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let store = JsonStore::open(resolve_data_dir(data_dir)?).await?;

    match what.as_str() {
        "quizzes" => {
            let quizzes = match &owner {
                Some(owner_id) => store.quizzes_by_owner(owner_id).await?,
                None => store.list_quizzes().await?,
            };

            let mut table = Table::new();
            table.set_header(vec!["Id", "Title", "Owner", "Active", "Questions", "Updated"]);
            for q in &quizzes {
                table.add_row(vec![
                    Cell::new(&q.id),
                    Cell::new(&q.title),
                    Cell::new(&q.owner_id),
                    Cell::new(q.is_active),
                    Cell::new(q.questions.len()),
                    Cell::new(q.updated_at.format("%Y-%m-%d %H:%M")),
                ]);
            }
            println!("{table}");
            println!("{} quiz(zes)", quizzes.len());
        }
        "accounts" => {
            let accounts = store.list_accounts().await?;

            let mut table = Table::new();
            table.set_header(vec!["Id", "Username", "Email", "Role", "Name"]);
            for a in &accounts {
                table.add_row(vec![
                    Cell::new(&a.id),
                    Cell::new(&a.username),
                    Cell::new(&a.email),
                    Cell::new(a.role),
                    Cell::new(&a.display_name),
                ]);
            }
            println!("{table}");
            println!("{} account(s)", accounts.len());
        }
        "attempts" => {
            let attempts = if let Some(student_id) = &student {
                store.attempts_by_student(student_id).await?
            } else if let Some(quiz_id) = &quiz {
                store.attempts_by_quiz(quiz_id).await?
            } else {
                store.list_attempts().await?
            };

            let mut table = Table::new();
            table.set_header(vec!["Id", "Quiz", "Student", "Score", "Completed"]);
            for a in &attempts {
                let completed = match a.completed_at {
                    Some(at) => at.format("%Y-%m-%d %H:%M").to_string(),
                    None => "-".to_string(),
                };
                table.add_row(vec![
                    Cell::new(&a.id),
                    Cell::new(&a.quiz_id),
                    Cell::new(&a.student_id),
                    Cell::new(format!("{}/{}", a.score, a.total_points)),
                    Cell::new(completed),
                ]);
            }
            println!("{table}");
            println!("{} attempt(s)", attempts.len());
        }
        other => anyhow::bail!("unknown collection '{other}' (expected quizzes, accounts, or attempts)"),
    }

    Ok(())
}
