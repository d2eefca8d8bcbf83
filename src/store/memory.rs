//! In-memory store engine. Collections are insertion-ordered vectors behind
//! per-collection `tokio::sync::RwLock`s; "store-default" ordering is
//! therefore insertion order. Good enough for the server default and for
//! tests; a networked document store would implement the same trait.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EntityStore, StoreError, StoreResult};
use crate::model::{Account, Course, CoursePatch, Student, StudentPatch};
use crate::query::QueryPlan;

#[derive(Default)]
pub struct MemoryStore {
    students: RwLock<Vec<Student>>,
    courses: RwLock<Vec<Course>>,
    accounts: RwLock<Vec<Account>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn validate_student(name: &str, age: i32) -> StoreResult<()> {
    if name.trim().is_empty() {
        return Err(StoreError::constraint("student name must not be empty"));
    }
    if age < 0 {
        return Err(StoreError::constraint("student age must not be negative"));
    }
    Ok(())
}

fn validate_credits(credits: i32) -> StoreResult<()> {
    if !(1..=6).contains(&credits) {
        return Err(StoreError::constraint(format!("credits must be between 1 and 6, got {credits}")));
    }
    Ok(())
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn find_students(&self, plan: &QueryPlan) -> StoreResult<Vec<Student>> {
        let rows = self.students.read().await.clone();
        Ok(plan.apply(rows))
    }

    async fn find_student(&self, id: Uuid) -> StoreResult<Option<Student>> {
        Ok(self.students.read().await.iter().find(|s| s.id == id).cloned())
    }

    async fn students_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Student>> {
        let rows = self.students.read().await;
        Ok(ids.iter().filter_map(|id| rows.iter().find(|s| s.id == *id).cloned()).collect())
    }

    async fn insert_student(&self, student: Student) -> StoreResult<Student> {
        validate_student(&student.name, student.age)?;
        let mut rows = self.students.write().await;
        if rows.iter().any(|s| s.email == student.email) {
            return Err(StoreError::Duplicate { field: "email".into() });
        }
        rows.push(student.clone());
        Ok(student)
    }

    async fn update_student(&self, id: Uuid, patch: StudentPatch) -> StoreResult<Option<Student>> {
        let mut rows = self.students.write().await;
        if let Some(email) = &patch.email {
            if rows.iter().any(|s| s.id != id && &s.email == email) {
                return Err(StoreError::Duplicate { field: "email".into() });
            }
        }
        let Some(row) = rows.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        let name = patch.name.as_deref().unwrap_or(&row.name);
        let age = patch.age.unwrap_or(row.age);
        validate_student(name, age)?;
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(email) = patch.email {
            row.email = email;
        }
        if let Some(age) = patch.age {
            row.age = age;
        }
        if let Some(major) = patch.major {
            row.major = major;
        }
        Ok(Some(row.clone()))
    }

    async fn delete_student(&self, id: Uuid) -> StoreResult<bool> {
        let mut rows = self.students.write().await;
        let before = rows.len();
        rows.retain(|s| s.id != id);
        Ok(rows.len() < before)
    }

    async fn find_courses(&self, plan: &QueryPlan) -> StoreResult<Vec<Course>> {
        let rows = self.courses.read().await.clone();
        Ok(plan.apply(rows))
    }

    async fn find_course(&self, id: Uuid) -> StoreResult<Option<Course>> {
        Ok(self.courses.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn courses_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Course>> {
        let rows = self.courses.read().await;
        Ok(ids.iter().filter_map(|id| rows.iter().find(|c| c.id == *id).cloned()).collect())
    }

    async fn insert_course(&self, course: Course) -> StoreResult<Course> {
        validate_credits(course.credits)?;
        let mut rows = self.courses.write().await;
        if rows.iter().any(|c| c.code == course.code) {
            return Err(StoreError::Duplicate { field: "code".into() });
        }
        rows.push(course.clone());
        Ok(course)
    }

    async fn update_course(&self, id: Uuid, patch: CoursePatch) -> StoreResult<Option<Course>> {
        let mut rows = self.courses.write().await;
        if let Some(code) = &patch.code {
            if rows.iter().any(|c| c.id != id && &c.code == code) {
                return Err(StoreError::Duplicate { field: "code".into() });
            }
        }
        let Some(row) = rows.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(credits) = patch.credits {
            validate_credits(credits)?;
            row.credits = credits;
        }
        if let Some(title) = patch.title {
            row.title = title;
        }
        if let Some(code) = patch.code {
            row.code = code;
        }
        if let Some(instructor) = patch.instructor {
            row.instructor = instructor;
        }
        Ok(Some(row.clone()))
    }

    async fn delete_course(&self, id: Uuid) -> StoreResult<bool> {
        let mut rows = self.courses.write().await;
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() < before)
    }

    async fn add_course_ref(&self, student_id: Uuid, course_id: Uuid) -> StoreResult<bool> {
        let mut rows = self.students.write().await;
        match rows.iter_mut().find(|s| s.id == student_id) {
            Some(s) => {
                if !s.courses.contains(&course_id) {
                    s.courses.push(course_id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_course_ref(&self, student_id: Uuid, course_id: Uuid) -> StoreResult<bool> {
        let mut rows = self.students.write().await;
        match rows.iter_mut().find(|s| s.id == student_id) {
            Some(s) => {
                s.courses.retain(|c| *c != course_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn add_student_ref(&self, course_id: Uuid, student_id: Uuid) -> StoreResult<bool> {
        let mut rows = self.courses.write().await;
        match rows.iter_mut().find(|c| c.id == course_id) {
            Some(c) => {
                if !c.students.contains(&student_id) {
                    c.students.push(student_id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_student_ref(&self, course_id: Uuid, student_id: Uuid) -> StoreResult<bool> {
        let mut rows = self.courses.write().await;
        match rows.iter_mut().find(|c| c.id == course_id) {
            Some(c) => {
                c.students.retain(|s| *s != student_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn pull_student_from_courses(&self, student_id: Uuid) -> StoreResult<u64> {
        let mut rows = self.courses.write().await;
        let mut modified = 0u64;
        for c in rows.iter_mut() {
            let before = c.students.len();
            c.students.retain(|s| *s != student_id);
            if c.students.len() < before {
                modified += 1;
            }
        }
        Ok(modified)
    }

    async fn pull_course_from_students(&self, course_id: Uuid) -> StoreResult<u64> {
        let mut rows = self.students.write().await;
        let mut modified = 0u64;
        for s in rows.iter_mut() {
            let before = s.courses.len();
            s.courses.retain(|c| *c != course_id);
            if s.courses.len() < before {
                modified += 1;
            }
        }
        Ok(modified)
    }

    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        Ok(self.accounts.read().await.iter().find(|a| a.email == email).cloned())
    }

    async fn insert_account(&self, account: Account) -> StoreResult<Account> {
        let mut rows = self.accounts.write().await;
        if rows.iter().any(|a| a.email == account.email) {
            return Err(StoreError::Duplicate { field: "email".into() });
        }
        rows.push(account.clone());
        Ok(account)
    }
}
