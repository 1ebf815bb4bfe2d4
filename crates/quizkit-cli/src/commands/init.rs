//! The `quizkit init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizkit.toml
    if std::path::Path::new("quizkit.toml").exists() {
        println!("quizkit.toml already exists, skipping.");
    } else {
        std::fs::write("quizkit.toml", SAMPLE_CONFIG)?;
        println!("Created quizkit.toml");
    }

    // Create example quiz
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.toml");
    if example_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizkit add-account --username you --email you@example.com --role teacher --name \"Your Name\"");
    println!("  2. Run: quizkit validate --quiz quizzes/example.toml");
    println!("  3. Run: quizkit import --quiz quizzes/example.toml --owner <account-id>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizkit configuration

# Where the collection documents (quizzes.json, accounts.json,
# attempts.json) are stored.
data_dir = "./quizkit-data"
"#;

const EXAMPLE_QUIZ: &str = r#"[quiz]
title = "World Capitals"
description = "A simple example quiz to get started"
time_limit_minutes = 10

[[questions]]
kind = "multiple_choice"
prompt = "What is the capital of Japan?"
options = ["Tokyo", "Kyoto", "Osaka"]
correct_answer = "Tokyo"
points = 2.0
explanation = "Tokyo has been the capital since 1868."

[[questions]]
kind = "true_false"
prompt = "Canberra is the capital of Australia."
correct_answer = "true"

[[questions]]
kind = "short_answer"
prompt = "What is the capital of France?"
correct_answer = "Paris"
"#;
