//!
//! Relationship coordinator
//! ------------------------
//! Enroll/unenroll and cascading deletes over the mirrored student↔course
//! reference sets. Every operation is two (or more) independent writes
//! against independent records; there is no transaction spanning both sides
//! and no compensating rollback. If the first write lands and the second
//! fails, one side references the other without the reverse — an accepted,
//! documented inconsistency window. Because every write is a set-add or
//! set-remove, re-running the same operation is idempotent and heals the
//! window.

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::EntityStore;
use crate::model::Student;

/// Enroll a student in a course: set-add on both reference sets, then
/// return the refreshed student. Both records must exist before any write.
pub async fn enroll(store: &dyn EntityStore, student_id: Uuid, course_id: Uuid) -> AppResult<Student> {
    if store.find_student(student_id).await?.is_none() {
        return Err(AppError::not_found("not_found".into(), format!("student {student_id} does not exist")));
    }
    if store.find_course(course_id).await?.is_none() {
        return Err(AppError::not_found("not_found".into(), format!("course {course_id} does not exist")));
    }

    // Two independent writes; a failure between them leaves the documented
    // one-sided window until a retry.
    store.add_course_ref(student_id, course_id).await?;
    debug!(target: "relations", "enroll step=student_side student={} course={}", student_id, course_id);
    store.add_student_ref(course_id, student_id).await?;
    info!(target: "relations", "enroll student={} course={}", student_id, course_id);

    refreshed_student(store, student_id).await
}

/// Symmetric removal from both reference sets; returns the refreshed
/// student. Missing records fail before any write, mirroring [`enroll`].
pub async fn unenroll(store: &dyn EntityStore, student_id: Uuid, course_id: Uuid) -> AppResult<Student> {
    if store.find_student(student_id).await?.is_none() {
        return Err(AppError::not_found("not_found".into(), format!("student {student_id} does not exist")));
    }
    if store.find_course(course_id).await?.is_none() {
        return Err(AppError::not_found("not_found".into(), format!("course {course_id} does not exist")));
    }

    store.remove_course_ref(student_id, course_id).await?;
    debug!(target: "relations", "unenroll step=student_side student={} course={}", student_id, course_id);
    store.remove_student_ref(course_id, student_id).await?;
    info!(target: "relations", "unenroll student={} course={}", student_id, course_id);

    refreshed_student(store, student_id).await
}

/// Delete a student, first pulling its id from every course that references
/// it so no dangling reference survives a successful delete.
pub async fn delete_student(store: &dyn EntityStore, id: Uuid) -> AppResult<bool> {
    let pulled = store.pull_student_from_courses(id).await?;
    let deleted = store.delete_student(id).await?;
    info!(target: "relations", "delete_student id={} pulled_from_courses={} deleted={}", id, pulled, deleted);
    Ok(deleted)
}

/// Symmetric cascade for course deletion.
pub async fn delete_course(store: &dyn EntityStore, id: Uuid) -> AppResult<bool> {
    let pulled = store.pull_course_from_students(id).await?;
    let deleted = store.delete_course(id).await?;
    info!(target: "relations", "delete_course id={} pulled_from_students={} deleted={}", id, pulled, deleted);
    Ok(deleted)
}

async fn refreshed_student(store: &dyn EntityStore, id: Uuid) -> AppResult<Student> {
    // A concurrent delete can race the refresh; surface it as not_found.
    store
        .find_student(id)
        .await?
        .ok_or_else(|| AppError::not_found("not_found".into(), format!("student {id} does not exist")))
}
