//! Domain records for the registry.
//!
//! Students and courses carry mirrored reference sets: a student's `courses`
//! list holds course ids and each referenced course's `students` list holds
//! the student's id back. Both sides are plain id vectors with set semantics
//! (no duplicates); the relationship coordinator keeps them mutual.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    /// Unique across the collection; enforced at the store boundary.
    pub email: String,
    pub age: i32,
    pub major: Option<String>,
    /// Reference set of enrolled course ids.
    pub courses: Vec<Uuid>,
}

impl Student {
    pub fn new(name: String, email: String, age: i32, major: Option<String>) -> Self {
        Self { id: Uuid::new_v4(), name, email, age, major, courses: Vec::new() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    /// Unique course code, e.g. "CS101".
    pub code: String,
    /// 1..=6 inclusive; enforced at the store boundary.
    pub credits: i32,
    pub instructor: String,
    /// Reference set of enrolled student ids.
    pub students: Vec<Uuid>,
}

impl Course {
    pub fn new(title: String, code: String, credits: i32, instructor: String) -> Self {
        Self { id: Uuid::new_v4(), title, code, credits, instructor, students: Vec::new() }
    }
}

/// Login credential record. Only the PHC hash is ever stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a student. `None` means "leave the field untouched".
/// The nullable `major` uses a second Option layer so that "unset" and
/// "clear to null" stay distinguishable.
#[derive(Debug, Clone, Default)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub major: Option<Option<String>>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none() && self.major.is_none()
    }
}

/// Partial update for a course, same conventions as [`StudentPatch`].
#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub code: Option<String>,
    pub credits: Option<i32>,
    pub instructor: Option<String>,
}

impl CoursePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.code.is_none() && self.credits.is_none() && self.instructor.is_none()
    }
}
