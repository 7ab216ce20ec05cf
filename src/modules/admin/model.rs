//! Admin dashboard models: login/stats responses and the flattened
//! listing rows backed by `admin_users_view` / `admin_courses_view`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::courses::model::CourseLevel;
use crate::modules::users::model::{User, UserRole, UserStatus};
use crate::utils::pagination::PaginationMeta;

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminLoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MonthlyEnrollments {
    /// Calendar month as `YYYY-MM`.
    pub month: String,
    pub enrollments: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub courses_count: i64,
    pub users_count: i64,
    pub categories_count: i64,
    pub average_rating: f64,
    pub enrollment_stats: Vec<MonthlyEnrollments>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AdminUserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub enrolled_courses: i64,
    pub last_enrollment: Option<DateTime<Utc>>,
    pub reviews_count: i64,
    pub last_review: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub users: Vec<AdminUserRow>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AdminCourseRow {
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
    pub category_name: String,
    pub instructor_name: String,
    pub enrolled_students: i64,
    pub average_rating: f64,
    pub review_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCoursesResponse {
    pub courses: Vec<AdminCourseRow>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserStatusDto {
    pub status: UserStatus,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub category_id: Uuid,
    pub instructor_id: Uuid,
    pub duration: Option<String>,
    pub level: Option<CourseLevel>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub category_id: Uuid,
    pub instructor_id: Uuid,
    pub duration: Option<String>,
    pub level: Option<CourseLevel>,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_course_dto_rejects_negative_price() {
        let dto = CreateCourseDto {
            title: "Course".to_string(),
            description: "Desc".to_string(),
            price: -1.0,
            category_id: Uuid::new_v4(),
            instructor_id: Uuid::new_v4(),
            duration: None,
            level: None,
            image_url: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_course_dto_accepts_free_course() {
        let dto = CreateCourseDto {
            title: "Course".to_string(),
            description: "Desc".to_string(),
            price: 0.0,
            category_id: Uuid::new_v4(),
            instructor_id: Uuid::new_v4(),
            duration: Some("6h".to_string()),
            level: Some(CourseLevel::Beginner),
            image_url: None,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_dashboard_stats_serializes_camel_case() {
        let stats = DashboardStats {
            courses_count: 2,
            users_count: 5,
            categories_count: 1,
            average_rating: 4.2,
            enrollment_stats: vec![MonthlyEnrollments {
                month: "2026-07".to_string(),
                enrollments: 3,
            }],
        };

        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["coursesCount"], 2);
        assert_eq!(value["usersCount"], 5);
        assert_eq!(value["categoriesCount"], 1);
        assert_eq!(value["enrollmentStats"][0]["month"], "2026-07");
    }

    #[test]
    fn test_status_dto_rejects_unknown_value() {
        assert!(serde_json::from_str::<UpdateUserStatusDto>(r#"{"status":"active"}"#).is_ok());
        assert!(serde_json::from_str::<UpdateUserStatusDto>(r#"{"status":"banned"}"#).is_err());
    }
}
