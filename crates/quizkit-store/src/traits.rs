//! Repository traits for the assessment store.
//!
//! One trait per entity kind, implemented by both the file-backed
//! `JsonStore` and the in-process `MemoryStore`, so hosting layers can
//! inject either. Not-found surfaces as `Ok(None)` / `Ok(false)`, never as
//! an error. The query helpers are plain filters over a fresh `list`
//! snapshot, with no caching or indexing; that holds up at the
//! thousands-of-records scale this store targets.

use async_trait::async_trait;

use quizkit_core::model::{
    Account, AccountDraft, Attempt, AttemptDraft, AttemptPatch, Quiz, QuizDraft, QuizPatch,
};

use crate::error::StoreError;

/// Persistence for quizzes (with their embedded questions).
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Assigns the quiz id, an id and back-reference to every embedded
    /// question, and both timestamps.
    async fn create_quiz(&self, draft: QuizDraft) -> Result<Quiz, StoreError>;

    async fn quiz(&self, id: &str) -> Result<Option<Quiz>, StoreError>;

    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StoreError>;

    /// Shallow-merges the patch and refreshes `updated_at`; `Ok(None)` when
    /// no quiz has this id.
    async fn update_quiz(&self, id: &str, patch: QuizPatch) -> Result<Option<Quiz>, StoreError>;

    /// Does not cascade: attempts referencing the quiz are left in place
    /// and grading them will report the quiz as missing.
    async fn delete_quiz(&self, id: &str) -> Result<bool, StoreError>;

    /// All quizzes owned by the given teacher account.
    async fn quizzes_by_owner(&self, owner_id: &str) -> Result<Vec<Quiz>, StoreError> {
        Ok(self
            .list_quizzes()
            .await?
            .into_iter()
            .filter(|q| q.owner_id == owner_id)
            .collect())
    }
}

/// Persistence for teacher and student accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Assigns the account id and creation timestamp. Username and email
    /// uniqueness is the caller's responsibility; check with
    /// [`account_by_username`](Self::account_by_username) first.
    async fn create_account(&self, draft: AccountDraft) -> Result<Account, StoreError>;

    async fn account(&self, id: &str) -> Result<Option<Account>, StoreError>;

    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError>;

    async fn delete_account(&self, id: &str) -> Result<bool, StoreError>;

    /// First account with the given username.
    async fn account_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        Ok(self
            .list_accounts()
            .await?
            .into_iter()
            .find(|a| a.username == username))
    }
}

/// Persistence for attempt records.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    async fn create_attempt(&self, draft: AttemptDraft) -> Result<Attempt, StoreError>;

    async fn attempt(&self, id: &str) -> Result<Option<Attempt>, StoreError>;

    async fn list_attempts(&self) -> Result<Vec<Attempt>, StoreError>;

    async fn update_attempt(
        &self,
        id: &str,
        patch: AttemptPatch,
    ) -> Result<Option<Attempt>, StoreError>;

    async fn delete_attempt(&self, id: &str) -> Result<bool, StoreError>;

    async fn attempts_by_student(&self, student_id: &str) -> Result<Vec<Attempt>, StoreError> {
        Ok(self
            .list_attempts()
            .await?
            .into_iter()
            .filter(|a| a.student_id == student_id)
            .collect())
    }

    async fn attempts_by_quiz(&self, quiz_id: &str) -> Result<Vec<Attempt>, StoreError> {
        Ok(self
            .list_attempts()
            .await?
            .into_iter()
            .filter(|a| a.quiz_id == quiz_id)
            .collect())
    }
}
