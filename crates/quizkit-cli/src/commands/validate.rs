//! The `quizkit validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let drafts = if quiz_path.is_dir() {
        quizkit_core::parser::load_quiz_directory(&quiz_path)?
    } else {
        vec![quizkit_core::parser::parse_quiz_file(&quiz_path)?]
    };

    let mut total_errors = 0;

    for draft in &drafts {
        println!("Quiz: {} ({} questions)", draft.title, draft.questions.len());

        let validation = draft.validate();
        for e in &validation.errors {
            println!("  ERROR: {e}");
        }
        total_errors += validation.errors.len();
    }

    if total_errors == 0 {
        println!("All quiz files valid.");
    } else {
        println!("\n{total_errors} error(s) found.");
    }

    Ok(())
}
