//! The `quizkit import` command.

use std::path::PathBuf;

use anyhow::Result;

use quizkit_core::model::Role;
use quizkit_store::{AccountStore, JsonStore, QuizStore};

use crate::config::resolve_data_dir;

pub async fn execute(quiz_path: PathBuf, owner: String, data_dir: Option<PathBuf>) -> Result<()> {
    let drafts = if quiz_path.is_dir() {
        quizkit_core::parser::load_quiz_directory(&quiz_path)?
    } else {
        vec![quizkit_core::parser::parse_quiz_file(&quiz_path)?]
    };
    anyhow::ensure!(!drafts.is_empty(), "no quiz files found in {}", quiz_path.display());

    let store = JsonStore::open(resolve_data_dir(data_dir)?).await?;

    // Quizzes are owned by teacher accounts.
    match store.account(&owner).await? {
        None => anyhow::bail!("owner account not found: {owner}"),
        Some(account) if account.role != Role::Teacher => {
            anyhow::bail!("owner account '{}' is not a teacher", account.username)
        }
        Some(_) => {}
    }

    for mut draft in drafts {
        draft.owner_id = owner.clone();

        let validation = draft.validate();
        if !validation.is_valid() {
            for e in &validation.errors {
                eprintln!("  ERROR: {e}");
            }
            anyhow::bail!("quiz '{}' failed validation", draft.title);
        }

        let quiz = store.create_quiz(draft).await?;
        println!("Imported quiz '{}': {}", quiz.title, quiz.id);
    }

    Ok(())
}
