//! quizkit-core — Entity models, validation, and grading.
//!
//! This crate defines the records the assessment store persists (quizzes,
//! questions, accounts, attempts), their validation rules, the pure grading
//! engine, and the TOML quiz-definition parser.

pub mod grading;
pub mod model;
pub mod parser;
