//! Query shaper unit tests: predicate construction, pagination clamping and
//! plan evaluation semantics.

use super::*;
use crate::model::{Course, Student};

fn student(name: &str, age: i32, major: Option<&str>) -> Student {
    Student::new(name.into(), format!("{}@x.com", name.to_lowercase()), age, major.map(|m| m.to_string()))
}

fn course(title: &str, code: &str, credits: i32, instructor: &str) -> Course {
    Course::new(title.into(), code.into(), credits, instructor.into())
}

#[test]
fn no_filter_and_no_options_yields_defaults() {
    let plan = student_plan(None, None);
    assert!(plan.predicates.is_empty());
    assert!(plan.sort.is_none());
    assert_eq!(plan.limit, DEFAULT_LIMIT);
    assert_eq!(plan.offset, 0);
}

#[test]
fn omitted_filter_fields_add_no_predicates() {
    let plan = student_plan(Some(StudentFilter { min_age: Some(18), ..Default::default() }), None);
    assert_eq!(plan.predicates.len(), 1);
}

#[test]
fn limit_is_clamped_to_maximum() {
    let plan = student_plan(None, Some(ListOptions { limit: Some(1000), ..Default::default() }));
    assert_eq!(plan.limit, MAX_LIMIT);
}

#[test]
fn negative_limit_and_offset_clamp_to_zero() {
    let plan = student_plan(None, Some(ListOptions { limit: Some(-5), offset: Some(-3), ..Default::default() }));
    assert_eq!(plan.limit, 0);
    assert_eq!(plan.offset, 0);
}

#[test]
fn sort_is_ascending_unless_exactly_desc() {
    let plan = student_plan(None, Some(ListOptions { sort_by: Some("age".into()), ..Default::default() }));
    assert_eq!(plan.sort, Some(SortSpec { field: "age".into(), descending: false }));

    let plan = student_plan(
        None,
        Some(ListOptions { sort_by: Some("age".into()), sort_order: Some(SortOrder::Desc), ..Default::default() }),
    );
    assert!(plan.sort.as_ref().unwrap().descending);
}

#[test]
fn range_bounds_apply_independently() {
    let rows = vec![student("Ana", 20, None), student("Bo", 17, None), student("Cy", 31, None)];

    let lower_only = student_plan(Some(StudentFilter { min_age: Some(18), ..Default::default() }), None);
    let names: Vec<_> = lower_only.apply(rows.clone()).into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Ana", "Cy"]);

    let both = student_plan(
        Some(StudentFilter { min_age: Some(18), max_age: Some(25), ..Default::default() }),
        None,
    );
    let names: Vec<_> = both.apply(rows).into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Ana"]);
}

#[test]
fn zero_is_a_real_bound_not_unset() {
    // The loose-typed source treated 0 as "no constraint"; here it bounds.
    let rows = vec![student("Ana", 20, None), student("Newborn", 0, None)];
    let plan = student_plan(Some(StudentFilter { max_age: Some(0), ..Default::default() }), None);
    let names: Vec<_> = plan.apply(rows).into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Newborn"]);
}

#[test]
fn contains_is_case_insensitive_substring() {
    let rows = vec![student("Anabel", 20, None), student("Bo", 21, None)];
    let plan = student_plan(Some(StudentFilter { name_contains: Some("NAB".into()), ..Default::default() }), None);
    let names: Vec<_> = plan.apply(rows).into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Anabel"]);
}

#[test]
fn prefix_anchors_at_start_only() {
    let rows = vec![course("Algorithms", "CS101", 4, "Knuth"), course("Compilers", "ECS10", 3, "Aho")];
    let plan = course_plan(Some(CourseFilter { code_prefix: Some("cs".into()), ..Default::default() }), None);
    let codes: Vec<_> = plan.apply(rows).into_iter().map(|c| c.code).collect();
    // "ECS10" contains "cs" but does not start with it.
    assert_eq!(codes, vec!["CS101"]);
}

#[test]
fn major_is_exact_match_and_missing_never_matches() {
    let rows = vec![student("Ana", 20, Some("CS")), student("Bo", 21, Some("cs")), student("Cy", 22, None)];
    let plan = student_plan(Some(StudentFilter { major: Some("CS".into()), ..Default::default() }), None);
    let names: Vec<_> = plan.apply(rows).into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Ana"]);
}

#[test]
fn sort_and_window_compose() {
    let rows = vec![student("Ana", 20, None), student("Bo", 17, None), student("Cy", 31, None), student("Di", 25, None)];
    let plan = student_plan(
        None,
        Some(ListOptions {
            sort_by: Some("age".into()),
            sort_order: Some(SortOrder::Desc),
            limit: Some(2),
            offset: Some(1),
        }),
    );
    let names: Vec<_> = plan.apply(rows).into_iter().map(|s| s.name).collect();
    // Sorted desc by age: Cy(31), Di(25), Ana(20), Bo(17); window of 2 from offset 1.
    assert_eq!(names, vec!["Di", "Ana"]);
}

#[test]
fn unknown_sort_field_preserves_input_order() {
    let rows = vec![student("Zed", 20, None), student("Ana", 21, None)];
    let plan = student_plan(None, Some(ListOptions { sort_by: Some("gpa".into()), ..Default::default() }));
    let names: Vec<_> = plan.apply(rows).into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Zed", "Ana"]);
}

#[test]
fn credits_bounds_on_courses() {
    let rows = vec![course("A", "A1", 2, "X"), course("B", "B1", 4, "X"), course("C", "C1", 6, "X")];
    let plan = course_plan(
        Some(CourseFilter { min_credits: Some(3), max_credits: Some(5), ..Default::default() }),
        None,
    );
    let codes: Vec<_> = plan.apply(rows).into_iter().map(|c| c.code).collect();
    assert_eq!(codes, vec!["B1"]);
}
