//! quizkit-store — Durable collection store for quizzes, accounts, and
//! attempts.
//!
//! Each collection is one JSON document; every mutation is a full
//! read-modify-write of that document, serialized by a per-collection write
//! lock so concurrent callers cannot lose each other's updates. The
//! repository traits are implemented by both the file-backed [`JsonStore`]
//! and the in-process [`MemoryStore`], so hosting layers can inject either.

pub mod collection;
pub mod error;
pub mod json;
pub mod memory;
pub mod traits;

pub use error::StoreError;
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use traits::{AccountStore, AttemptStore, QuizStore};
