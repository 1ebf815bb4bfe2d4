//! End-to-end flow: accounts, import, attempt, grade.
//!
//! Drives the binary the way an administrator would, with an explicit
//! data directory, and checks the grade that comes out the other side.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const QUIZ_TOML: &str = r#"[quiz]
title = "World Capitals"
description = "Flow test quiz"

[[questions]]
kind = "multiple_choice"
prompt = "What is the capital of Japan?"
options = ["Tokyo", "Kyoto", "Osaka"]
correct_answer = "Tokyo"
points = 2.0

[[questions]]
kind = "true_false"
prompt = "Canberra is the capital of Australia."
correct_answer = "true"
"#;

fn quizkit() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizkit").unwrap()
}

fn run(data_dir: &Path, args: &[&str]) -> String {
    let mut cmd = quizkit();
    cmd.args(args).arg("--data-dir").arg(data_dir);
    let assert = cmd.assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

/// Last whitespace-separated token of the first line containing `marker`.
fn trailing_token(output: &str, marker: &str) -> String {
    output
        .lines()
        .find(|l| l.contains(marker))
        .and_then(|l| l.split_whitespace().last())
        .unwrap_or_else(|| panic!("no line containing '{marker}' in:\n{output}"))
        .to_string()
}

#[test]
fn full_grade_flow() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    let quiz_path = dir.path().join("capitals.toml");
    std::fs::write(&quiz_path, QUIZ_TOML).unwrap();

    let out = run(
        &data,
        &[
            "add-account",
            "--username",
            "teach",
            "--email",
            "teach@example.com",
            "--role",
            "teacher",
            "--name",
            "Teacher",
        ],
    );
    let teacher_id = trailing_token(&out, "Created teacher account");

    let out = run(
        &data,
        &[
            "add-account",
            "--username",
            "student",
            "--email",
            "student@example.com",
            "--role",
            "student",
            "--name",
            "Student",
        ],
    );
    let student_id = trailing_token(&out, "Created student account");

    let out = run(
        &data,
        &[
            "import",
            "--quiz",
            quiz_path.to_str().unwrap(),
            "--owner",
            &teacher_id,
        ],
    );
    let quiz_id = trailing_token(&out, "Imported quiz 'World Capitals'");

    // Pull the stored question ids out of the show output.
    let out = run(&data, &["show", "--quiz", &quiz_id]);
    let question_ids: Vec<String> = out
        .lines()
        .filter(|l| l.trim_start().starts_with('['))
        .map(|l| l.split_whitespace().nth(1).unwrap().to_string())
        .collect();
    assert_eq!(question_ids.len(), 2, "show output:\n{out}");

    // Right answer on the 2-point question, wrong on the 1-point one.
    let out = run(
        &data,
        &[
            "attempt",
            "--quiz",
            &quiz_id,
            "--student",
            &student_id,
            "--answer",
            &format!("{}=Tokyo", question_ids[0]),
            "--answer",
            &format!("{}=false", question_ids[1]),
        ],
    );
    let attempt_id = trailing_token(&out, "Started attempt");

    let out = run(&data, &["grade", "--attempt", &attempt_id]);
    assert!(out.contains("2/3 (66.7%)"), "grade output:\n{out}");

    // The grade is persisted, not just printed.
    let out = run(&data, &["list", "attempts", "--student", &student_id]);
    assert!(out.contains("2/3"), "list output:\n{out}");
    assert!(out.contains("1 attempt(s)"));
}

#[test]
fn duplicate_username_is_rejected() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");

    run(
        &data,
        &[
            "add-account",
            "--username",
            "kim",
            "--email",
            "kim@example.com",
            "--name",
            "Kim",
        ],
    );

    quizkit()
        .args([
            "add-account",
            "--username",
            "kim",
            "--email",
            "kim2@example.com",
            "--name",
            "Other Kim",
        ])
        .arg("--data-dir")
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already taken"));
}

#[test]
fn import_requires_a_teacher_owner() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    let quiz_path = dir.path().join("capitals.toml");
    std::fs::write(&quiz_path, QUIZ_TOML).unwrap();

    quizkit()
        .args(["import", "--quiz", quiz_path.to_str().unwrap(), "--owner", "ghost"])
        .arg("--data-dir")
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("owner account not found"));

    let out = run(
        &data,
        &[
            "add-account",
            "--username",
            "student",
            "--email",
            "student@example.com",
            "--name",
            "Student",
        ],
    );
    let student_id = trailing_token(&out, "Created student account");

    quizkit()
        .args([
            "import",
            "--quiz",
            quiz_path.to_str().unwrap(),
            "--owner",
            &student_id,
        ])
        .arg("--data-dir")
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a teacher"));
}
