//! Read resolvers. No auth gate; absence of a record is a null result, not
//! an error.

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use super::to_gql;
use super::types::{CourseObject, StudentObject};
use crate::query::{course_plan, student_plan, CourseFilter, ListOptions, StudentFilter};
use crate::store::SharedStore;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Shaped student lookup: optional filter, sort and pagination.
    async fn get_all_students(
        &self,
        ctx: &Context<'_>,
        filter: Option<StudentFilter>,
        options: Option<ListOptions>,
    ) -> Result<Vec<StudentObject>> {
        let store = ctx.data_unchecked::<SharedStore>();
        let plan = student_plan(filter, options);
        let rows = store.find_students(&plan).await.map_err(to_gql)?;
        Ok(rows.into_iter().map(StudentObject).collect())
    }

    async fn get_student(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<StudentObject>> {
        let store = ctx.data_unchecked::<SharedStore>();
        let row = store.find_student(id).await.map_err(to_gql)?;
        Ok(row.map(StudentObject))
    }

    /// Shaped course lookup: optional filter, sort and pagination.
    async fn get_all_courses(
        &self,
        ctx: &Context<'_>,
        filter: Option<CourseFilter>,
        options: Option<ListOptions>,
    ) -> Result<Vec<CourseObject>> {
        let store = ctx.data_unchecked::<SharedStore>();
        let plan = course_plan(filter, options);
        let rows = store.find_courses(&plan).await.map_err(to_gql)?;
        Ok(rows.into_iter().map(CourseObject).collect())
    }

    async fn get_course(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<CourseObject>> {
        let store = ctx.data_unchecked::<SharedStore>();
        let row = store.find_course(id).await.map_err(to_gql)?;
        Ok(row.map(CourseObject))
    }
}
