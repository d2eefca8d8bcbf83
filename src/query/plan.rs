//! Store-agnostic query plan: a predicate set plus sort and pagination.
//! The plan knows nothing about relationships or collections; a store
//! executes it against whatever rows it holds via the [`Record`] accessor.

use std::cmp::Ordering;

/// Single filter constraint over one named field.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Case-insensitive substring match.
    Contains { field: &'static str, needle: String },
    /// Case-insensitive match anchored at the start of the field only.
    Prefix { field: &'static str, prefix: String },
    /// Exact (case-sensitive) match.
    Equals { field: &'static str, value: String },
    /// Inclusive numeric lower bound.
    AtLeast { field: &'static str, bound: i64 },
    /// Inclusive numeric upper bound.
    AtMost { field: &'static str, bound: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub field: String,
    pub descending: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPlan {
    pub predicates: Vec<Predicate>,
    pub sort: Option<SortSpec>,
    pub limit: usize,
    pub offset: usize,
}

/// Field value as seen by the plan evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Int(i64),
    /// Absent on this row (unset optional field or unknown field name).
    Missing,
}

/// Row accessor the plan evaluates against.
pub trait Record {
    fn field(&self, name: &str) -> FieldValue<'_>;
}

impl Predicate {
    pub fn matches<R: Record>(&self, row: &R) -> bool {
        match self {
            Predicate::Contains { field, needle } => match row.field(field) {
                FieldValue::Text(s) => s.to_lowercase().contains(&needle.to_lowercase()),
                _ => false,
            },
            Predicate::Prefix { field, prefix } => match row.field(field) {
                FieldValue::Text(s) => s.to_lowercase().starts_with(&prefix.to_lowercase()),
                _ => false,
            },
            Predicate::Equals { field, value } => match row.field(field) {
                FieldValue::Text(s) => s == value,
                _ => false,
            },
            Predicate::AtLeast { field, bound } => match row.field(field) {
                FieldValue::Int(v) => v >= *bound,
                _ => false,
            },
            Predicate::AtMost { field, bound } => match row.field(field) {
                FieldValue::Int(v) => v <= *bound,
                _ => false,
            },
        }
    }
}

fn compare_fields(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Text(x), FieldValue::Text(y)) => x.cmp(y),
        (FieldValue::Int(x), FieldValue::Int(y)) => x.cmp(&y),
        // Missing or mixed-type fields compare equal; stable sort then
        // preserves the incoming order.
        _ => Ordering::Equal,
    }
}

impl QueryPlan {
    pub fn matches<R: Record>(&self, row: &R) -> bool {
        self.predicates.iter().all(|p| p.matches(row))
    }

    /// Execute the plan over an owned row set: filter, sort, then the
    /// offset/limit window.
    pub fn apply<R: Record>(&self, mut rows: Vec<R>) -> Vec<R> {
        rows.retain(|r| self.matches(r));
        if let Some(sort) = &self.sort {
            rows.sort_by(|a, b| {
                let ord = compare_fields(a.field(&sort.field), b.field(&sort.field));
                if sort.descending { ord.reverse() } else { ord }
            });
        }
        rows.into_iter().skip(self.offset).take(self.limit).collect()
    }
}
