//! Course catalog models: the course entity, its aggregates, reviews,
//! enrollment/progress DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "course_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Enrollment lifecycle: `active` on enroll, `unsubscribed` on
/// unsubscribe (terminal for that row). Re-enrolling creates a new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "enrollment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Unsubscribed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "activity_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Enrollment,
    Unsubscribe,
    Completion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category_id: Option<Uuid>,
    pub instructor_id: Option<Uuid>,
    pub duration: Option<String>,
    pub level: Option<CourseLevel>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A catalog row: the course plus its category name and enrollment/review
/// aggregates.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CourseWithStats {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category_id: Option<Uuid>,
    pub instructor_id: Option<Uuid>,
    pub duration: Option<String>,
    pub level: Option<CourseLevel>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub category_name: Option<String>,
    pub enrolled_students: i64,
    pub average_rating: Option<f64>,
    pub review_count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CourseReview {
    pub id: Uuid,
    pub user_id: Uuid,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub user_avatar: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: CourseWithStats,
    pub reviews: Vec<CourseReview>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProgressDto {
    #[validate(range(min = 0, max = 100))]
    pub progress_percentage: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_deserialize() {
        assert_eq!(
            serde_json::from_str::<CourseLevel>("\"beginner\"").unwrap(),
            CourseLevel::Beginner
        );
        assert!(serde_json::from_str::<CourseLevel>("\"expert\"").is_err());
    }

    #[test]
    fn test_progress_dto_bounds() {
        assert!(UpdateProgressDto {
            progress_percentage: 0
        }
        .validate()
        .is_ok());
        assert!(UpdateProgressDto {
            progress_percentage: 100
        }
        .validate()
        .is_ok());
        assert!(UpdateProgressDto {
            progress_percentage: 101
        }
        .validate()
        .is_err());
        assert!(UpdateProgressDto {
            progress_percentage: -1
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_course_detail_flattens_course_fields() {
        let course = CourseWithStats {
            id: Uuid::new_v4(),
            title: "Intro to Rust".to_string(),
            description: "Ownership and borrowing".to_string(),
            price: 49.99,
            category_id: None,
            instructor_id: None,
            duration: None,
            level: Some(CourseLevel::Beginner),
            image_url: None,
            created_at: Utc::now(),
            category_name: Some("Programming".to_string()),
            enrolled_students: 3,
            average_rating: Some(4.5),
            review_count: 2,
        };
        let detail = CourseDetailResponse {
            course,
            reviews: vec![],
        };

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["title"], "Intro to Rust");
        assert_eq!(value["category_name"], "Programming");
        assert!(value["reviews"].as_array().unwrap().is_empty());
    }
}
