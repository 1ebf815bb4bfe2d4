//! Core entity types for quizkit.
//!
//! These are the records the collection store persists: quizzes with their
//! embedded questions, accounts, and attempt records. Drafts carry the
//! caller-supplied fields; materializing a draft assigns ids and timestamps.
//! `validate()` reports structural problems as readable strings instead of
//! failing.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// How a question is asked and answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multiple_choice"),
            QuestionKind::TrueFalse => write!(f, "true_false"),
            QuestionKind::ShortAnswer => write!(f, "short_answer"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "multiple_choice" => Ok(QuestionKind::MultipleChoice),
            "true_false" => Ok(QuestionKind::TrueFalse),
            "short_answer" => Ok(QuestionKind::ShortAnswer),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Teacher,
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Teacher => write!(f, "teacher"),
            Role::Student => write!(f, "student"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A quiz with its embedded questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Store-assigned unique identifier.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// The teacher account that owns this quiz.
    pub owner_id: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Optional time limit for attempts, in minutes.
    #[serde(default)]
    pub time_limit_minutes: Option<u32>,
    /// Questions in presentation order, owned by this quiz.
    #[serde(default)]
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single question embedded in a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    /// Back-reference to the owning quiz.
    pub quiz_id: String,
    pub kind: QuestionKind,
    pub prompt: String,
    /// Answer choices; only meaningful for multiple_choice questions.
    #[serde(default)]
    pub options: Vec<String>,
    /// Compared verbatim against submitted answers.
    pub correct_answer: String,
    #[serde(default = "default_points")]
    pub points: f64,
    #[serde(default)]
    pub explanation: Option<String>,
    /// Position within the quiz.
    #[serde(default)]
    pub order: u32,
}

/// A teacher or student account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    /// Unique within the account collection.
    pub username: String,
    /// Unique within the account collection.
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// A student's run through a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub id: String,
    pub quiz_id: String,
    pub student_id: String,
    /// Question id mapped to the submitted answer.
    #[serde(default)]
    pub answers: HashMap<String, String>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub total_points: f64,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_completed: bool,
}

fn default_true() -> bool {
    true
}

fn default_points() -> f64 {
    1.0
}

// ---------------------------------------------------------------------------
// Drafts: caller-supplied fields; the store assigns ids and timestamps
// ---------------------------------------------------------------------------

/// Fields for a new quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Set by the importing caller, not the quiz definition itself.
    #[serde(default)]
    pub owner_id: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub time_limit_minutes: Option<u32>,
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            owner_id: String::new(),
            is_active: true,
            time_limit_minutes: None,
            questions: Vec::new(),
        }
    }
}

/// Fields for a new question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDraft {
    /// Kept when replacing a quiz's questions; assigned when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub kind: QuestionKind,
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default = "default_points")]
    pub points: f64,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub order: Option<u32>,
}

/// Fields for a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDraft {
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub display_name: String,
}

/// Fields for a new attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptDraft {
    pub quiz_id: String,
    pub student_id: String,
    #[serde(default)]
    pub answers: HashMap<String, String>,
}

impl Quiz {
    /// Materialize a draft into a persisted record.
    pub fn from_draft(draft: QuizDraft, now: DateTime<Utc>) -> Self {
        let id = new_id();
        let questions = draft
            .questions
            .into_iter()
            .enumerate()
            .map(|(i, q)| Question::from_draft(q, &id, i as u32))
            .collect();
        Self {
            id,
            title: draft.title,
            description: draft.description,
            owner_id: draft.owner_id,
            is_active: draft.is_active,
            time_limit_minutes: draft.time_limit_minutes,
            questions,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Question {
    /// Materialize a draft, keeping a supplied id and falling back to the
    /// file position when no explicit order is given.
    pub fn from_draft(draft: QuestionDraft, quiz_id: &str, position: u32) -> Self {
        Self {
            id: draft.id.unwrap_or_else(new_id),
            quiz_id: quiz_id.to_string(),
            kind: draft.kind,
            prompt: draft.prompt,
            options: draft.options,
            correct_answer: draft.correct_answer,
            points: draft.points,
            explanation: draft.explanation,
            order: draft.order.unwrap_or(position),
        }
    }
}

impl Account {
    pub fn from_draft(draft: AccountDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            username: draft.username,
            email: draft.email,
            role: draft.role,
            display_name: draft.display_name,
            created_at: now,
        }
    }
}

impl Attempt {
    /// Materialize a draft. Score and total start at zero until graded.
    pub fn from_draft(draft: AttemptDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            quiz_id: draft.quiz_id,
            student_id: draft.student_id,
            answers: draft.answers,
            score: 0.0,
            total_points: 0.0,
            started_at: now,
            completed_at: None,
            is_completed: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Patches: shallow merge-update; `None` leaves the field untouched
// ---------------------------------------------------------------------------

/// Fields to merge over an existing quiz.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub time_limit_minutes: Option<u32>,
    /// Replaces the whole question set when supplied.
    #[serde(default)]
    pub questions: Option<Vec<QuestionDraft>>,
}

impl QuizPatch {
    /// Merge into `quiz` and refresh its update timestamp.
    pub fn apply(self, quiz: &mut Quiz, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            quiz.title = title;
        }
        if let Some(description) = self.description {
            quiz.description = description;
        }
        if let Some(is_active) = self.is_active {
            quiz.is_active = is_active;
        }
        if let Some(minutes) = self.time_limit_minutes {
            quiz.time_limit_minutes = Some(minutes);
        }
        if let Some(questions) = self.questions {
            let quiz_id = quiz.id.clone();
            quiz.questions = questions
                .into_iter()
                .enumerate()
                .map(|(i, q)| Question::from_draft(q, &quiz_id, i as u32))
                .collect();
        }
        quiz.updated_at = now;
    }
}

/// Fields to merge over an existing attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttemptPatch {
    #[serde(default)]
    pub answers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub total_points: Option<f64>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl AttemptPatch {
    /// Merge into `attempt`.
    pub fn apply(self, attempt: &mut Attempt) {
        if let Some(answers) = self.answers {
            attempt.answers = answers;
        }
        if let Some(score) = self.score {
            attempt.score = score;
        }
        if let Some(total_points) = self.total_points {
            attempt.total_points = total_points;
        }
        if let Some(is_completed) = self.is_completed {
            attempt.is_completed = is_completed;
        }
        if let Some(completed_at) = self.completed_at {
            attempt.completed_at = Some(completed_at);
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Outcome of structural validation: a list of human-readable problems.
///
/// Validation is advisory: the store never runs it; callers validate
/// before persisting.
#[derive(Debug, Clone, Default)]
pub struct Validation {
    pub errors: Vec<String>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn problem(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }
}

fn check_quiz_fields(title: &str, question_count: usize, out: &mut Validation) {
    if title.trim().is_empty() {
        out.problem("title must not be empty");
    }
    if question_count == 0 {
        out.problem("quiz must have at least one question");
    }
}

fn check_question_fields(
    kind: QuestionKind,
    prompt: &str,
    options: &[String],
    correct_answer: &str,
    points: f64,
    label: &str,
    out: &mut Validation,
) {
    if prompt.trim().is_empty() {
        out.problem(format!("{label}: prompt must not be empty"));
    }
    if correct_answer.is_empty() {
        out.problem(format!("{label}: correct_answer must not be empty"));
    }
    if points <= 0.0 {
        out.problem(format!("{label}: points must be positive"));
    }
    if kind == QuestionKind::MultipleChoice {
        if options.len() < 2 {
            out.problem(format!(
                "{label}: multiple_choice questions need at least 2 options"
            ));
        } else if !options.iter().any(|o| o == correct_answer) {
            // Grading compares verbatim, so an answer outside the options
            // could never be matched.
            out.problem(format!("{label}: correct_answer must be one of the options"));
        }
    }
}

impl Quiz {
    pub fn validate(&self) -> Validation {
        let mut out = Validation::default();
        check_quiz_fields(&self.title, self.questions.len(), &mut out);
        if self.owner_id.is_empty() {
            out.problem("owner_id must be set");
        }
        for (i, q) in self.questions.iter().enumerate() {
            check_question_fields(
                q.kind,
                &q.prompt,
                &q.options,
                &q.correct_answer,
                q.points,
                &format!("question {}", i + 1),
                &mut out,
            );
        }
        out
    }
}

impl Question {
    pub fn validate(&self) -> Validation {
        let mut out = Validation::default();
        check_question_fields(
            self.kind,
            &self.prompt,
            &self.options,
            &self.correct_answer,
            self.points,
            "question",
            &mut out,
        );
        out
    }
}

impl QuizDraft {
    /// Same rules as a persisted quiz, minus the owner check; drafts are
    /// authored before an owner is attached.
    pub fn validate(&self) -> Validation {
        let mut out = Validation::default();
        check_quiz_fields(&self.title, self.questions.len(), &mut out);
        for (i, q) in self.questions.iter().enumerate() {
            check_question_fields(
                q.kind,
                &q.prompt,
                &q.options,
                &q.correct_answer,
                q.points,
                &format!("question {}", i + 1),
                &mut out,
            );
        }
        out
    }
}

impl AccountDraft {
    pub fn validate(&self) -> Validation {
        let mut out = Validation::default();
        if self.username.trim().is_empty() {
            out.problem("username must not be empty");
        }
        if self.email.trim().is_empty() {
            out.problem("email must not be empty");
        } else if !self.email.contains('@') {
            out.problem("email must contain '@'");
        }
        out
    }
}
