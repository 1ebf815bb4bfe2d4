//! In-memory store for tests and embedding.
//!
//! Implements the same repository traits as the file-backed store over
//! plain vectors, so callers that take the traits can swap storage out
//! entirely.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use quizkit_core::model::{
    Account, AccountDraft, Attempt, AttemptDraft, AttemptPatch, Quiz, QuizDraft, QuizPatch,
};

use crate::error::StoreError;
use crate::traits::{AccountStore, AttemptStore, QuizStore};

/// Non-durable store holding every collection in memory.
#[derive(Default)]
pub struct MemoryStore {
    quizzes: Mutex<Vec<Quiz>>,
    accounts: Mutex<Vec<Account>>,
    attempts: Mutex<Vec<Attempt>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn create_quiz(&self, draft: QuizDraft) -> Result<Quiz, StoreError> {
        let quiz = Quiz::from_draft(draft, Utc::now());
        self.quizzes.lock().unwrap().push(quiz.clone());
        Ok(quiz)
    }

    async fn quiz(&self, id: &str) -> Result<Option<Quiz>, StoreError> {
        Ok(self
            .quizzes
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == id)
            .cloned())
    }

    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StoreError> {
        Ok(self.quizzes.lock().unwrap().clone())
    }

    async fn update_quiz(&self, id: &str, patch: QuizPatch) -> Result<Option<Quiz>, StoreError> {
        let mut quizzes = self.quizzes.lock().unwrap();
        let Some(quiz) = quizzes.iter_mut().find(|q| q.id == id) else {
            return Ok(None);
        };
        patch.apply(quiz, Utc::now());
        Ok(Some(quiz.clone()))
    }

    async fn delete_quiz(&self, id: &str) -> Result<bool, StoreError> {
        let mut quizzes = self.quizzes.lock().unwrap();
        let before = quizzes.len();
        quizzes.retain(|q| q.id != id);
        Ok(quizzes.len() != before)
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create_account(&self, draft: AccountDraft) -> Result<Account, StoreError> {
        let account = Account::from_draft(draft, Utc::now());
        self.accounts.lock().unwrap().push(account.clone());
        Ok(account)
    }

    async fn account(&self, id: &str) -> Result<Option<Account>, StoreError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn delete_account(&self, id: &str) -> Result<bool, StoreError> {
        let mut accounts = self.accounts.lock().unwrap();
        let before = accounts.len();
        accounts.retain(|a| a.id != id);
        Ok(accounts.len() != before)
    }
}

#[async_trait]
impl AttemptStore for MemoryStore {
    async fn create_attempt(&self, draft: AttemptDraft) -> Result<Attempt, StoreError> {
        let attempt = Attempt::from_draft(draft, Utc::now());
        self.attempts.lock().unwrap().push(attempt.clone());
        Ok(attempt)
    }

    async fn attempt(&self, id: &str) -> Result<Option<Attempt>, StoreError> {
        Ok(self
            .attempts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn list_attempts(&self) -> Result<Vec<Attempt>, StoreError> {
        Ok(self.attempts.lock().unwrap().clone())
    }

    async fn update_attempt(
        &self,
        id: &str,
        patch: AttemptPatch,
    ) -> Result<Option<Attempt>, StoreError> {
        let mut attempts = self.attempts.lock().unwrap();
        let Some(attempt) = attempts.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        patch.apply(attempt);
        Ok(Some(attempt.clone()))
    }

    async fn delete_attempt(&self, id: &str) -> Result<bool, StoreError> {
        let mut attempts = self.attempts.lock().unwrap();
        let before = attempts.len();
        attempts.retain(|a| a.id != id);
        Ok(attempts.len() != before)
    }
}
