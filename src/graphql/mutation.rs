//! Write resolvers. Every mutation except signup/login requires a verified
//! identity in the request context; the gate runs before any store call so
//! no partial side effect leaks on an auth failure.

use async_graphql::{Context, Object, Result};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::to_gql;
use super::types::{AuthPayload, CourseObject, CourseUpdateInput, StudentObject, StudentUpdateInput};
use super::AuthSecret;
use crate::error::AppError;
use crate::identity::{hash_password, sign_token, verify_password, Identity, RequestContext};
use crate::model::{Account, Course, Student};
use crate::relations;
use crate::store::SharedStore;

pub struct MutationRoot;

/// The auth gate: a missing or unverifiable identity fails here, before the
/// store is touched.
fn require_identity(ctx: &Context<'_>) -> Result<Identity> {
    ctx.data_opt::<RequestContext>()
        .and_then(|rc| rc.identity.clone())
        .ok_or_else(|| AppError::authentication_required().into_graphql())
}

#[Object]
impl MutationRoot {
    /// Create an account and return a signed bearer token. Ungated.
    async fn signup(&self, ctx: &Context<'_>, email: String, password: String) -> Result<AuthPayload> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("invalid_input", "email and password must not be empty").into_graphql());
        }
        let store = ctx.data_unchecked::<SharedStore>();
        let secret = ctx.data_unchecked::<AuthSecret>();

        let password_hash = hash_password(&password)
            .map_err(|e| AppError::internal("hash_failed".to_string(), e.to_string()).into_graphql())?;
        let account = Account { id: Uuid::new_v4(), email: email.clone(), password_hash, created_at: Utc::now() };
        let account = store.insert_account(account).await.map_err(to_gql)?;

        let token = sign_token(&secret.0, account.id, &account.email)
            .map_err(|e| AppError::internal("sign_failed".to_string(), e.to_string()).into_graphql())?;
        info!(target: "auth", "signup email={}", account.email);
        Ok(AuthPayload { token, email: account.email, subject_id: account.id })
    }

    /// Verify credentials and return a fresh token. Ungated. Unknown email
    /// and wrong password surface the same error.
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<AuthPayload> {
        let store = ctx.data_unchecked::<SharedStore>();
        let secret = ctx.data_unchecked::<AuthSecret>();

        let account = store
            .find_account_by_email(&email)
            .await
            .map_err(to_gql)?
            .ok_or_else(|| AppError::invalid_credentials().into_graphql())?;
        if !verify_password(&account.password_hash, &password) {
            return Err(AppError::invalid_credentials().into_graphql());
        }

        let token = sign_token(&secret.0, account.id, &account.email)
            .map_err(|e| AppError::internal("sign_failed".to_string(), e.to_string()).into_graphql())?;
        info!(target: "auth", "login email={}", account.email);
        Ok(AuthPayload { token, email: account.email, subject_id: account.id })
    }

    async fn add_student(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        age: i32,
        major: Option<String>,
    ) -> Result<StudentObject> {
        require_identity(ctx)?;
        let store = ctx.data_unchecked::<SharedStore>();
        let student = store.insert_student(Student::new(name, email, age, major)).await.map_err(to_gql)?;
        Ok(StudentObject(student))
    }

    /// Apply only the supplied fields; omitted fields stay untouched. Null
    /// result when the id does not exist.
    async fn update_student(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        input: StudentUpdateInput,
    ) -> Result<Option<StudentObject>> {
        require_identity(ctx)?;
        let store = ctx.data_unchecked::<SharedStore>();
        let row = store.update_student(id, input.into_patch()).await.map_err(to_gql)?;
        Ok(row.map(StudentObject))
    }

    /// Delete a student, cascading its id out of every course first.
    async fn delete_student(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        require_identity(ctx)?;
        let store = ctx.data_unchecked::<SharedStore>();
        relations::delete_student(store.as_ref(), id).await.map_err(to_gql)
    }

    async fn add_course(
        &self,
        ctx: &Context<'_>,
        title: String,
        code: String,
        credits: i32,
        instructor: String,
    ) -> Result<CourseObject> {
        require_identity(ctx)?;
        let store = ctx.data_unchecked::<SharedStore>();
        let course = store.insert_course(Course::new(title, code, credits, instructor)).await.map_err(to_gql)?;
        Ok(CourseObject(course))
    }

    async fn update_course(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        input: CourseUpdateInput,
    ) -> Result<Option<CourseObject>> {
        require_identity(ctx)?;
        let store = ctx.data_unchecked::<SharedStore>();
        let row = store.update_course(id, input.into_patch()).await.map_err(to_gql)?;
        Ok(row.map(CourseObject))
    }

    /// Delete a course, cascading its id out of every student first.
    async fn delete_course(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        require_identity(ctx)?;
        let store = ctx.data_unchecked::<SharedStore>();
        relations::delete_course(store.as_ref(), id).await.map_err(to_gql)
    }

    /// Enroll: set-add on both sides, returns the refreshed student.
    async fn enroll_student(&self, ctx: &Context<'_>, student_id: Uuid, course_id: Uuid) -> Result<StudentObject> {
        require_identity(ctx)?;
        let store = ctx.data_unchecked::<SharedStore>();
        let student = relations::enroll(store.as_ref(), student_id, course_id).await.map_err(to_gql)?;
        Ok(StudentObject(student))
    }

    /// Unenroll: set-remove on both sides, returns the refreshed student.
    async fn unenroll_student(&self, ctx: &Context<'_>, student_id: Uuid, course_id: Uuid) -> Result<StudentObject> {
        require_identity(ctx)?;
        let store = ctx.data_unchecked::<SharedStore>();
        let student = relations::unenroll(store.as_ref(), student_id, course_id).await.map_err(to_gql)?;
        Ok(StudentObject(student))
    }
}
