use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::courses::model::CourseWithStats;

/// An instructor profile with teaching aggregates.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Instructor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub title: Option<String>,
    pub courses_count: i64,
    pub students_count: i64,
    pub average_rating: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InstructorDetailResponse {
    #[serde(flatten)]
    pub instructor: Instructor,
    pub courses: Vec<CourseWithStats>,
}
