//! Memory store unit tests: boundary validation, patch semantics and
//! reference-set arithmetic.

use uuid::Uuid;

use super::{EntityStore, MemoryStore, StoreError};
use crate::model::{Account, Course, Student, StudentPatch};
use crate::query::{student_plan, ListOptions, StudentFilter};

fn ana() -> Student {
    Student::new("Ana".into(), "ana@x.com".into(), 20, None)
}

fn algorithms() -> Course {
    Course::new("Algorithms".into(), "CS101".into(), 4, "Knuth".into())
}

#[tokio::test]
async fn insert_and_find_round_trip() {
    let store = MemoryStore::new();
    let s = store.insert_student(ana()).await.expect("insert");
    let found = store.find_student(s.id).await.expect("find").expect("present");
    assert_eq!(found.email, "ana@x.com");
    assert!(found.courses.is_empty());
}

#[tokio::test]
async fn missing_id_finds_none_not_error() {
    let store = MemoryStore::new();
    assert!(store.find_student(Uuid::new_v4()).await.expect("find").is_none());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let store = MemoryStore::new();
    store.insert_student(ana()).await.expect("first");
    let dup = Student::new("Other".into(), "ana@x.com".into(), 30, None);
    match store.insert_student(dup).await {
        Err(StoreError::Duplicate { field }) => assert_eq!(field, "email"),
        other => panic!("expected duplicate error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_name_and_negative_age_are_rejected() {
    let store = MemoryStore::new();
    assert!(store.insert_student(Student::new("  ".into(), "a@x.com".into(), 20, None)).await.is_err());
    assert!(store.insert_student(Student::new("Bo".into(), "b@x.com".into(), -1, None)).await.is_err());
}

#[tokio::test]
async fn credits_out_of_range_are_rejected() {
    let store = MemoryStore::new();
    assert!(store.insert_course(Course::new("T".into(), "X1".into(), 0, "I".into())).await.is_err());
    assert!(store.insert_course(Course::new("T".into(), "X2".into(), 7, "I".into())).await.is_err());
    assert!(store.insert_course(Course::new("T".into(), "X3".into(), 6, "I".into())).await.is_ok());
}

#[tokio::test]
async fn patch_touches_only_supplied_fields() {
    let store = MemoryStore::new();
    let s = store.insert_student(ana()).await.expect("insert");

    let patched = store
        .update_student(s.id, StudentPatch { major: Some(Some("CS".into())), ..Default::default() })
        .await
        .expect("update")
        .expect("present");
    assert_eq!(patched.major.as_deref(), Some("CS"));
    assert_eq!(patched.name, "Ana");
    assert_eq!(patched.email, "ana@x.com");
    assert_eq!(patched.age, 20);

    // Clearing major is distinct from leaving it untouched.
    let cleared = store
        .update_student(s.id, StudentPatch { major: Some(None), ..Default::default() })
        .await
        .expect("update")
        .expect("present");
    assert_eq!(cleared.major, None);

    let untouched = store
        .update_student(s.id, StudentPatch { name: Some("Ana B".into()), ..Default::default() })
        .await
        .expect("update")
        .expect("present");
    assert_eq!(untouched.major, None);
    assert_eq!(untouched.name, "Ana B");
}

#[tokio::test]
async fn patch_of_missing_student_is_none() {
    let store = MemoryStore::new();
    let out = store.update_student(Uuid::new_v4(), StudentPatch::default()).await.expect("update");
    assert!(out.is_none());
}

#[tokio::test]
async fn reference_add_is_idempotent_set_add() {
    let store = MemoryStore::new();
    let s = store.insert_student(ana()).await.expect("student");
    let c = store.insert_course(algorithms()).await.expect("course");

    assert!(store.add_course_ref(s.id, c.id).await.expect("add"));
    assert!(store.add_course_ref(s.id, c.id).await.expect("add again"));
    let s = store.find_student(s.id).await.expect("find").expect("present");
    assert_eq!(s.courses, vec![c.id]);

    // Owner missing reports false, not an error.
    assert!(!store.add_course_ref(Uuid::new_v4(), c.id).await.expect("add"));
}

#[tokio::test]
async fn bulk_pull_reports_modified_count() {
    let store = MemoryStore::new();
    let s = store.insert_student(ana()).await.expect("student");
    let c1 = store.insert_course(algorithms()).await.expect("c1");
    let c2 = store.insert_course(Course::new("Compilers".into(), "CS201".into(), 3, "Aho".into())).await.expect("c2");
    store.add_student_ref(c1.id, s.id).await.expect("ref1");
    store.add_student_ref(c2.id, s.id).await.expect("ref2");

    let modified = store.pull_student_from_courses(s.id).await.expect("pull");
    assert_eq!(modified, 2);
    // Second pull is a no-op.
    assert_eq!(store.pull_student_from_courses(s.id).await.expect("pull"), 0);
}

#[tokio::test]
async fn find_students_executes_the_plan() {
    let store = MemoryStore::new();
    store.insert_student(ana()).await.expect("ana");
    store.insert_student(Student::new("Bo".into(), "bo@x.com".into(), 17, None)).await.expect("bo");

    let plan = student_plan(
        Some(StudentFilter { min_age: Some(18), ..Default::default() }),
        Some(ListOptions::default()),
    );
    let rows = store.find_students(&plan).await.expect("find");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Ana");
}

#[tokio::test]
async fn account_email_is_unique() {
    let store = MemoryStore::new();
    let acct = Account {
        id: Uuid::new_v4(),
        email: "ana@x.com".into(),
        password_hash: "phc".into(),
        created_at: chrono::Utc::now(),
    };
    store.insert_account(acct.clone()).await.expect("first");
    let mut dup = acct;
    dup.id = Uuid::new_v4();
    assert!(store.insert_account(dup).await.is_err());
}
