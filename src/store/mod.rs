//!
//! campusgraph store module
//! ------------------------
//! The store collaborator behind the resolvers and the relationship
//! coordinator. The API is a document-store shape: find by query plan, find
//! by id, batch populate, insert, partial update, delete, set-add/set-remove
//! on the mirrored reference lists, and bulk "pull this id everywhere"
//! updates for cascade cleanup.
//!
//! Key responsibilities:
//! - Uniqueness enforcement (student email, course code, account email).
//! - Range/shape validation at the boundary (credits 1..=6, non-empty name,
//!   non-negative age).
//! - Executing a [`QueryPlan`] against its rows; the plan itself is built
//!   elsewhere and carries no store knowledge.
//!
//! The public API centers around the `EntityStore` trait, usually handled as
//! a `SharedStore` (`Arc<dyn EntityStore>`) injected into every component so
//! tests can substitute doubles.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::model::{Account, Course, CoursePatch, Student, StudentPatch};
use crate::query::QueryPlan;

mod memory;
#[cfg(test)]
mod memory_tests;

pub use memory::MemoryStore;

pub type SharedStore = Arc<dyn EntityStore>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate value for unique field '{field}'")]
    Duplicate { field: String },
    #[error("{message}")]
    Constraint { message: String },
    #[error("store unavailable: {message}")]
    Unavailable { message: String },
}

impl StoreError {
    pub fn constraint<S: Into<String>>(message: S) -> Self {
        StoreError::Constraint { message: message.into() }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Document-store surface consumed by the core. Reference-set operations are
/// plain set arithmetic: adding an already-present id or removing an absent
/// one is a no-op, which is what makes coordinator retries idempotent.
#[async_trait]
pub trait EntityStore: Send + Sync {
    // Students
    async fn find_students(&self, plan: &QueryPlan) -> StoreResult<Vec<Student>>;
    async fn find_student(&self, id: Uuid) -> StoreResult<Option<Student>>;
    /// Batch populate: resolve a reference set to full records, preserving
    /// the input order and skipping ids with no backing record.
    async fn students_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Student>>;
    async fn insert_student(&self, student: Student) -> StoreResult<Student>;
    async fn update_student(&self, id: Uuid, patch: StudentPatch) -> StoreResult<Option<Student>>;
    async fn delete_student(&self, id: Uuid) -> StoreResult<bool>;

    // Courses
    async fn find_courses(&self, plan: &QueryPlan) -> StoreResult<Vec<Course>>;
    async fn find_course(&self, id: Uuid) -> StoreResult<Option<Course>>;
    async fn courses_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Course>>;
    async fn insert_course(&self, course: Course) -> StoreResult<Course>;
    async fn update_course(&self, id: Uuid, patch: CoursePatch) -> StoreResult<Option<Course>>;
    async fn delete_course(&self, id: Uuid) -> StoreResult<bool>;

    // Reference-set arithmetic. Returns false when the owning record does
    // not exist; an already-satisfied add/remove still returns true.
    async fn add_course_ref(&self, student_id: Uuid, course_id: Uuid) -> StoreResult<bool>;
    async fn remove_course_ref(&self, student_id: Uuid, course_id: Uuid) -> StoreResult<bool>;
    async fn add_student_ref(&self, course_id: Uuid, student_id: Uuid) -> StoreResult<bool>;
    async fn remove_student_ref(&self, course_id: Uuid, student_id: Uuid) -> StoreResult<bool>;

    // Bulk cascade pulls; return the number of records modified.
    async fn pull_student_from_courses(&self, student_id: Uuid) -> StoreResult<u64>;
    async fn pull_course_from_students(&self, course_id: Uuid) -> StoreResult<u64>;

    // Accounts
    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<Account>>;
    async fn insert_account(&self, account: Account) -> StoreResult<Account>;
}
