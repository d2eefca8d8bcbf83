//! Query shaping: translate sparse, all-optional filter/sort/pagination
//! inputs into a [`QueryPlan`] the store executes.
//!
//! Absence of a filter field means "no constraint on this field", never
//! "match empty". Numeric range bounds combine independently; a bound of
//! literal 0 is a real bound, not "unset" (`Option` carries presence, so no
//! falsy-check ambiguity survives the wire types).

mod plan;

pub use plan::{FieldValue, Predicate, QueryPlan, Record, SortSpec};

use async_graphql::{Enum, InputObject};

use crate::model::{Course, Student};

/// Default page size when the caller sends no limit.
pub const DEFAULT_LIMIT: usize = 10;
/// Hard page-size ceiling; larger requests are clamped silently.
pub const MAX_LIMIT: usize = 50;

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(InputObject, Debug, Clone, Default)]
pub struct ListOptions {
    pub limit: Option<i32>,
    pub offset: Option<i32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(InputObject, Debug, Clone, Default)]
pub struct StudentFilter {
    /// Exact match on major.
    pub major: Option<String>,
    /// Case-insensitive substring match on name.
    pub name_contains: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

#[derive(InputObject, Debug, Clone, Default)]
pub struct CourseFilter {
    /// Case-insensitive match anchored at the start of the code.
    pub code_prefix: Option<String>,
    /// Case-insensitive substring match on title.
    pub title_contains: Option<String>,
    /// Exact match on instructor.
    pub instructor: Option<String>,
    pub min_credits: Option<i32>,
    pub max_credits: Option<i32>,
}

/// Sort and pagination shared by both entity lookups. Limit defaults to
/// [`DEFAULT_LIMIT`] and clamps to [`MAX_LIMIT`]; negative limit/offset
/// clamp to 0. Ascending unless the order is exactly `DESC`.
fn shape_page(options: Option<ListOptions>) -> (Option<SortSpec>, usize, usize) {
    let options = options.unwrap_or_default();
    let limit = options.limit.unwrap_or(DEFAULT_LIMIT as i32).clamp(0, MAX_LIMIT as i32) as usize;
    let offset = options.offset.unwrap_or(0).max(0) as usize;
    let sort = options.sort_by.map(|field| SortSpec {
        field,
        descending: options.sort_order == Some(SortOrder::Desc),
    });
    (sort, limit, offset)
}

/// Build the plan for a student lookup. Only fields present in the filter
/// contribute predicates.
pub fn student_plan(filter: Option<StudentFilter>, options: Option<ListOptions>) -> QueryPlan {
    let filter = filter.unwrap_or_default();
    let mut predicates = Vec::new();
    if let Some(major) = filter.major {
        predicates.push(Predicate::Equals { field: "major", value: major });
    }
    if let Some(needle) = filter.name_contains {
        predicates.push(Predicate::Contains { field: "name", needle });
    }
    if let Some(bound) = filter.min_age {
        predicates.push(Predicate::AtLeast { field: "age", bound: i64::from(bound) });
    }
    if let Some(bound) = filter.max_age {
        predicates.push(Predicate::AtMost { field: "age", bound: i64::from(bound) });
    }
    let (sort, limit, offset) = shape_page(options);
    QueryPlan { predicates, sort, limit, offset }
}

/// Build the plan for a course lookup.
pub fn course_plan(filter: Option<CourseFilter>, options: Option<ListOptions>) -> QueryPlan {
    let filter = filter.unwrap_or_default();
    let mut predicates = Vec::new();
    if let Some(prefix) = filter.code_prefix {
        predicates.push(Predicate::Prefix { field: "code", prefix });
    }
    if let Some(needle) = filter.title_contains {
        predicates.push(Predicate::Contains { field: "title", needle });
    }
    if let Some(value) = filter.instructor {
        predicates.push(Predicate::Equals { field: "instructor", value });
    }
    if let Some(bound) = filter.min_credits {
        predicates.push(Predicate::AtLeast { field: "credits", bound: i64::from(bound) });
    }
    if let Some(bound) = filter.max_credits {
        predicates.push(Predicate::AtMost { field: "credits", bound: i64::from(bound) });
    }
    let (sort, limit, offset) = shape_page(options);
    QueryPlan { predicates, sort, limit, offset }
}

impl Record for Student {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "email" => FieldValue::Text(&self.email),
            "age" => FieldValue::Int(i64::from(self.age)),
            "major" => match &self.major {
                Some(m) => FieldValue::Text(m),
                None => FieldValue::Missing,
            },
            _ => FieldValue::Missing,
        }
    }
}

impl Record for Course {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "title" => FieldValue::Text(&self.title),
            "code" => FieldValue::Text(&self.code),
            "instructor" => FieldValue::Text(&self.instructor),
            "credits" => FieldValue::Int(i64::from(self.credits)),
            _ => FieldValue::Missing,
        }
    }
}

#[cfg(test)]
mod shaper_tests;
