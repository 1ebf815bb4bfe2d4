//! TOML quiz definition parser.
//!
//! Quizzes are authored as TOML files: a `[quiz]` header table and a
//! `[[questions]]` array. Parsing produces drafts; the store assigns ids
//! when a draft is imported.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{QuestionDraft, QuestionKind, QuizDraft};

/// Intermediate TOML structure for parsing quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_true")]
    is_active: bool,
    #[serde(default)]
    time_limit_minutes: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    kind: String,
    prompt: String,
    #[serde(default)]
    options: Vec<String>,
    correct_answer: String,
    #[serde(default = "default_points")]
    points: f64,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    order: Option<u32>,
}

fn default_true() -> bool {
    true
}

fn default_points() -> f64 {
    1.0
}

/// Parse a single TOML file into a `QuizDraft`.
pub fn parse_quiz_file(path: &Path) -> Result<QuizDraft> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a TOML string into a `QuizDraft` (useful for testing).
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<QuizDraft> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let kind: QuestionKind = q
                .kind
                .parse()
                .map_err(|e: String| anyhow::anyhow!("{}: {e}", source_path.display()))?;

            Ok(QuestionDraft {
                id: None,
                kind,
                prompt: q.prompt,
                options: q.options,
                correct_answer: q.correct_answer,
                points: q.points,
                explanation: q.explanation,
                order: q.order,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuizDraft {
        title: parsed.quiz.title,
        description: parsed.quiz.description,
        owner_id: String::new(),
        is_active: parsed.quiz.is_active,
        time_limit_minutes: parsed.quiz.time_limit_minutes,
        questions,
    })
}

/// Recursively load all `.toml` quiz files from a directory.
///
/// Files that fail to parse are skipped with a warning rather than failing
/// the whole load.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<QuizDraft>> {
    let mut drafts = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            drafts.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz_file(&path) {
                Ok(draft) => drafts.push(draft),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(drafts)
}
