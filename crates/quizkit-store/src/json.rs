//! File-backed store: one JSON document per collection under a data
//! directory.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;

use quizkit_core::model::{
    Account, AccountDraft, Attempt, AttemptDraft, AttemptPatch, Quiz, QuizDraft, QuizPatch,
};

use crate::collection::Collection;
use crate::error::StoreError;
use crate::traits::{AccountStore, AttemptStore, QuizStore};

/// Durable store over three collection documents: `quizzes.json`,
/// `accounts.json`, and `attempts.json`.
pub struct JsonStore {
    quizzes: Collection<Quiz>,
    accounts: Collection<Account>,
    attempts: Collection<Attempt>,
}

impl JsonStore {
    /// Open a store rooted at `dir`, initializing it on first use.
    ///
    /// Idempotent: the directory is created if absent and each collection
    /// document is seeded with an empty record sequence if it does not
    /// already exist. Reopening an existing store leaves its data alone.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| StoreError::unavailable(dir, e))?;

        let store = Self {
            quizzes: Collection::new("quizzes", dir),
            accounts: Collection::new("accounts", dir),
            attempts: Collection::new("attempts", dir),
        };
        store.quizzes.seed().await?;
        store.accounts.seed().await?;
        store.attempts.seed().await?;

        tracing::debug!(dir = %dir.display(), "opened store");
        Ok(store)
    }
}

#[async_trait]
impl QuizStore for JsonStore {
    async fn create_quiz(&self, draft: QuizDraft) -> Result<Quiz, StoreError> {
        self.quizzes.insert(Quiz::from_draft(draft, Utc::now())).await
    }

    async fn quiz(&self, id: &str) -> Result<Option<Quiz>, StoreError> {
        self.quizzes.get(id).await
    }

    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StoreError> {
        self.quizzes.load().await
    }

    async fn update_quiz(&self, id: &str, patch: QuizPatch) -> Result<Option<Quiz>, StoreError> {
        let now = Utc::now();
        self.quizzes
            .update_with(id, move |quiz| patch.apply(quiz, now))
            .await
    }

    async fn delete_quiz(&self, id: &str) -> Result<bool, StoreError> {
        self.quizzes.remove(id).await
    }
}

#[async_trait]
impl AccountStore for JsonStore {
    async fn create_account(&self, draft: AccountDraft) -> Result<Account, StoreError> {
        self.accounts
            .insert(Account::from_draft(draft, Utc::now()))
            .await
    }

    async fn account(&self, id: &str) -> Result<Option<Account>, StoreError> {
        self.accounts.get(id).await
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        self.accounts.load().await
    }

    async fn delete_account(&self, id: &str) -> Result<bool, StoreError> {
        self.accounts.remove(id).await
    }
}

#[async_trait]
impl AttemptStore for JsonStore {
    async fn create_attempt(&self, draft: AttemptDraft) -> Result<Attempt, StoreError> {
        self.attempts
            .insert(Attempt::from_draft(draft, Utc::now()))
            .await
    }

    async fn attempt(&self, id: &str) -> Result<Option<Attempt>, StoreError> {
        self.attempts.get(id).await
    }

    async fn list_attempts(&self) -> Result<Vec<Attempt>, StoreError> {
        self.attempts.load().await
    }

    async fn update_attempt(
        &self,
        id: &str,
        patch: AttemptPatch,
    ) -> Result<Option<Attempt>, StoreError> {
        self.attempts
            .update_with(id, move |attempt| patch.apply(attempt))
            .await
    }

    async fn delete_attempt(&self, id: &str) -> Result<bool, StoreError> {
        self.attempts.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use quizkit_core::grading;
    use quizkit_core::model::{QuestionDraft, QuestionKind, Role};

    use super::*;

    fn question_draft(answer: &str, points: f64) -> QuestionDraft {
        QuestionDraft {
            id: None,
            kind: QuestionKind::ShortAnswer,
            prompt: format!("What is {answer}?"),
            options: vec![],
            correct_answer: answer.into(),
            points,
            explanation: None,
            order: None,
        }
    }

    fn quiz_draft(title: &str, owner: &str) -> QuizDraft {
        QuizDraft {
            title: title.into(),
            owner_id: owner.into(),
            questions: vec![question_draft("Tokyo", 2.0), question_draft("Kyoto", 3.0)],
            ..QuizDraft::default()
        }
    }

    fn account_draft(username: &str, role: Role) -> AccountDraft {
        AccountDraft {
            username: username.into(),
            email: format!("{username}@example.com"),
            role,
            display_name: username.into(),
        }
    }

    async fn open_store() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn open_seeds_collection_documents() {
        let (dir, _store) = open_store().await;
        for name in ["quizzes.json", "accounts.json", "attempts.json"] {
            assert!(dir.path().join(name).exists(), "{name} should be seeded");
        }
    }

    #[tokio::test]
    async fn reopen_keeps_existing_data() {
        let (dir, store) = open_store().await;
        store.create_quiz(quiz_draft("Geography", "t1")).await.unwrap();
        drop(store);

        let store = JsonStore::open(dir.path()).await.unwrap();
        assert_eq!(store.list_quizzes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn quiz_round_trip() {
        let (_dir, store) = open_store().await;
        let created = store.create_quiz(quiz_draft("Geography", "t1")).await.unwrap();

        let fetched = store.quiz(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.title, "Geography");
        assert_eq!(fetched.created_at, created.created_at);
        assert_eq!(fetched.questions.len(), 2);
        assert_eq!(fetched.questions[0].quiz_id, created.id);

        assert!(store.quiz("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn account_round_trip() {
        let (_dir, store) = open_store().await;
        let created = store
            .create_account(account_draft("ms-frizzle", Role::Teacher))
            .await
            .unwrap();

        let fetched = store.account(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.username, "ms-frizzle");
        assert_eq!(fetched.role, Role::Teacher);
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn attempt_round_trip() {
        let (_dir, store) = open_store().await;
        let created = store
            .create_attempt(AttemptDraft {
                quiz_id: "qz".into(),
                student_id: "s1".into(),
                answers: HashMap::from([("q1".to_string(), "Tokyo".to_string())]),
            })
            .await
            .unwrap();

        let fetched = store.attempt(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.answers["q1"], "Tokyo");
        assert_eq!(fetched.score, 0.0);
        assert!(!fetched.is_completed);
    }

    #[tokio::test]
    async fn update_merges_only_supplied_fields() {
        let (_dir, store) = open_store().await;
        let created = store.create_quiz(quiz_draft("Geography", "t1")).await.unwrap();

        // Timestamps must strictly advance across the update.
        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = store
            .update_quiz(
                &created.id,
                QuizPatch {
                    title: Some("World Geography".into()),
                    ..QuizPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "World Geography");
        assert_eq!(updated.owner_id, created.owner_id);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.questions.len(), created.questions.len());
        assert_eq!(updated.questions[0].id, created.questions[0].id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn update_missing_quiz_is_none() {
        let (_dir, store) = open_store().await;
        let result = store
            .update_quiz("missing", QuizPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (_dir, store) = open_store().await;
        let created = store.create_quiz(quiz_draft("Geography", "t1")).await.unwrap();

        assert!(store.delete_quiz(&created.id).await.unwrap());
        assert!(!store.delete_quiz(&created.id).await.unwrap());
        assert!(store.quiz(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn quizzes_by_owner_filters_exactly() {
        let (_dir, store) = open_store().await;
        store.create_quiz(quiz_draft("A", "t1")).await.unwrap();
        store.create_quiz(quiz_draft("B", "t2")).await.unwrap();
        store.create_quiz(quiz_draft("C", "t1")).await.unwrap();

        let owned = store.quizzes_by_owner("t1").await.unwrap();
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|q| q.owner_id == "t1"));

        assert!(store.quizzes_by_owner("t3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn attempt_filters() {
        let (_dir, store) = open_store().await;
        for (quiz, student) in [("qz1", "s1"), ("qz1", "s2"), ("qz2", "s1")] {
            store
                .create_attempt(AttemptDraft {
                    quiz_id: quiz.into(),
                    student_id: student.into(),
                    answers: HashMap::new(),
                })
                .await
                .unwrap();
        }

        assert_eq!(store.attempts_by_student("s1").await.unwrap().len(), 2);
        assert_eq!(store.attempts_by_quiz("qz1").await.unwrap().len(), 2);
        assert_eq!(store.attempts_by_quiz("qz3").await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn account_by_username_finds_first_match() {
        let (_dir, store) = open_store().await;
        let created = store
            .create_account(account_draft("kim", Role::Student))
            .await
            .unwrap();

        let found = store.account_by_username("kim").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(store.account_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_accounts_and_attempts() {
        let (_dir, store) = open_store().await;
        let account = store
            .create_account(account_draft("kim", Role::Student))
            .await
            .unwrap();
        let attempt = store
            .create_attempt(AttemptDraft {
                quiz_id: "qz".into(),
                student_id: account.id.clone(),
                answers: HashMap::new(),
            })
            .await
            .unwrap();

        assert!(store.delete_attempt(&attempt.id).await.unwrap());
        assert!(!store.delete_attempt(&attempt.id).await.unwrap());
        assert!(store.delete_account(&account.id).await.unwrap());
        assert!(!store.delete_account(&account.id).await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_creates_all_survive() {
        let (_dir, store) = open_store().await;
        let store = Arc::new(store);

        let tasks = (0..8).map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.create_quiz(quiz_draft(&format!("Quiz {i}"), "t1")).await })
        });
        let created = futures::future::join_all(tasks).await;

        let mut ids = Vec::new();
        for result in created {
            ids.push(result.unwrap().unwrap().id);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8, "all created ids must be distinct");

        let snapshot = store.list_quizzes().await.unwrap();
        assert_eq!(snapshot.len(), 8, "no concurrent create may be lost");
    }

    #[tokio::test]
    async fn corrupt_document_surfaces_as_error() {
        let (dir, store) = open_store().await;
        std::fs::write(dir.path().join("quizzes.json"), "definitely not json").unwrap();

        let err = store.list_quizzes().await.unwrap_err();
        assert!(err.is_corrupt());

        // Other collections are unaffected.
        assert!(store.list_accounts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn grade_and_persist_flow() {
        let (_dir, store) = open_store().await;
        let quiz = store.create_quiz(quiz_draft("Geography", "t1")).await.unwrap();

        let answers = HashMap::from([
            (quiz.questions[0].id.clone(), "Tokyo".to_string()),
            (quiz.questions[1].id.clone(), "Osaka".to_string()),
        ]);
        let attempt = store
            .create_attempt(AttemptDraft {
                quiz_id: quiz.id.clone(),
                student_id: "s1".into(),
                answers,
            })
            .await
            .unwrap();

        let grade = grading::grade(&quiz, &attempt);
        assert_eq!(grade.score, 2.0);
        assert_eq!(grade.total_points, 5.0);

        let updated = store
            .update_attempt(&attempt.id, grade.completion_patch(Utc::now()))
            .await
            .unwrap()
            .unwrap();
        assert!(updated.is_completed);
        assert_eq!(updated.score, 2.0);
        assert_eq!(updated.total_points, 5.0);
        assert!(updated.completed_at.is_some());
    }
}
