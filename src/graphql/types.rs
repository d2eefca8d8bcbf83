//! GraphQL object and input types over the domain records.
//!
//! `Student.courses` / `Course.students` resolve the reference sets through
//! the store's batch populate; the derived counts come from the reference
//! set on the record itself, never from a separate count query, so they
//! always agree with the entity handed back to the caller.

use async_graphql::{Context, MaybeUndefined, Object, Result, SimpleObject};
use uuid::Uuid;

use super::to_gql;
use crate::model::{Course, CoursePatch, Student, StudentPatch};
use crate::store::SharedStore;

pub struct StudentObject(pub Student);

#[Object(name = "Student")]
impl StudentObject {
    async fn id(&self) -> Uuid {
        self.0.id
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    async fn age(&self) -> i32 {
        self.0.age
    }

    async fn major(&self) -> Option<&str> {
        self.0.major.as_deref()
    }

    /// Enrolled courses, populated via batch lookup of the reference set.
    async fn courses(&self, ctx: &Context<'_>) -> Result<Vec<CourseObject>> {
        let store = ctx.data_unchecked::<SharedStore>();
        let rows = store.courses_by_ids(&self.0.courses).await.map_err(to_gql)?;
        Ok(rows.into_iter().map(CourseObject).collect())
    }

    /// Derived from the reference set carried on this record.
    async fn courses_count(&self) -> usize {
        self.0.courses.len()
    }
}

pub struct CourseObject(pub Course);

#[Object(name = "Course")]
impl CourseObject {
    async fn id(&self) -> Uuid {
        self.0.id
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn code(&self) -> &str {
        &self.0.code
    }

    async fn credits(&self) -> i32 {
        self.0.credits
    }

    async fn instructor(&self) -> &str {
        &self.0.instructor
    }

    /// Enrolled students, populated via batch lookup of the reference set.
    async fn students(&self, ctx: &Context<'_>) -> Result<Vec<StudentObject>> {
        let store = ctx.data_unchecked::<SharedStore>();
        let rows = store.students_by_ids(&self.0.students).await.map_err(to_gql)?;
        Ok(rows.into_iter().map(StudentObject).collect())
    }

    /// Derived from the reference set carried on this record.
    async fn students_count(&self) -> usize {
        self.0.students.len()
    }
}

/// Signup/login response.
#[derive(SimpleObject)]
pub struct AuthPayload {
    pub token: String,
    pub email: String,
    pub subject_id: Uuid,
}

/// Partial student update. Omitted fields are left untouched; for the
/// nullable `major`, an explicit null clears it, which is distinct from
/// omitting the field.
#[derive(async_graphql::InputObject)]
pub struct StudentUpdateInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub major: MaybeUndefined<String>,
}

impl StudentUpdateInput {
    pub fn into_patch(self) -> StudentPatch {
        StudentPatch {
            name: self.name,
            email: self.email,
            age: self.age,
            major: match self.major {
                MaybeUndefined::Undefined => None,
                MaybeUndefined::Null => Some(None),
                MaybeUndefined::Value(v) => Some(Some(v)),
            },
        }
    }
}

/// Partial course update; omitted fields are left untouched.
#[derive(async_graphql::InputObject)]
pub struct CourseUpdateInput {
    pub title: Option<String>,
    pub code: Option<String>,
    pub credits: Option<i32>,
    pub instructor: Option<String>,
}

impl CourseUpdateInput {
    pub fn into_patch(self) -> CoursePatch {
        CoursePatch { title: self.title, code: self.code, credits: self.credits, instructor: self.instructor }
    }
}
