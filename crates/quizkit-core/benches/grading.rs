use std::collections::HashMap;

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizkit_core::grading::grade;
use quizkit_core::model::{Attempt, Question, QuestionKind, Quiz};

fn make_quiz(questions: usize) -> Quiz {
    let now = Utc::now();
    Quiz {
        id: "bench-quiz".into(),
        title: "Benchmark".into(),
        description: String::new(),
        owner_id: "bench-teacher".into(),
        is_active: true,
        time_limit_minutes: None,
        questions: (0..questions)
            .map(|i| Question {
                id: format!("q{i}"),
                quiz_id: "bench-quiz".into(),
                kind: QuestionKind::ShortAnswer,
                prompt: format!("Question {i}"),
                options: vec![],
                correct_answer: format!("answer-{i}"),
                points: 1.0,
                explanation: None,
                order: i as u32,
            })
            .collect(),
        created_at: now,
        updated_at: now,
    }
}

fn make_attempt(quiz: &Quiz, correct_every: usize) -> Attempt {
    let answers: HashMap<String, String> = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let answer = if i % correct_every == 0 {
                q.correct_answer.clone()
            } else {
                "wrong".to_string()
            };
            (q.id.clone(), answer)
        })
        .collect();

    Attempt {
        id: "bench-attempt".into(),
        quiz_id: quiz.id.clone(),
        student_id: "bench-student".into(),
        answers,
        score: 0.0,
        total_points: 0.0,
        started_at: Utc::now(),
        completed_at: None,
        is_completed: false,
    }
}

fn bench_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");

    for &n in &[10usize, 100, 1000] {
        let quiz = make_quiz(n);
        let attempt = make_attempt(&quiz, 2);
        group.bench_function(format!("{n}_questions"), |b| {
            b.iter(|| grade(black_box(&quiz), black_box(&attempt)))
        });
    }

    let quiz = make_quiz(100);
    let empty = make_attempt(&make_quiz(0), 1);
    group.bench_function("100_questions_no_answers", |b| {
        b.iter(|| grade(black_box(&quiz), black_box(&empty)))
    });

    group.finish();
}

criterion_group!(benches, bench_grade);
criterion_main!(benches);
