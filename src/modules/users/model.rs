//! User data models and DTOs.
//!
//! The [`User`] entity never exposes the password hash; queries that need
//! it use a private row struct inside the auth service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::courses::model::{CourseLevel, EnrollmentStatus};

/// System roles. `Admin` runs the dashboard, `Instructor` owns courses,
/// `User` enrolls in them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Instructor,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Instructor => "instructor",
            UserRole::User => "user",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Blocked,
}

/// A user account. Accounts are never hard-deleted; admins block them
/// through the status toggle instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateAvatarDto {
    #[validate(length(min = 1))]
    pub avatar: String,
}

/// A course the user is (or was) enrolled in, as shown on the profile.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CourseEnrollment {
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
    pub enrolled_at: DateTime<Utc>,
    pub status: EnrollmentStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: User,
    pub enrollments: Vec<CourseEnrollment>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvatarResponse {
    pub message: String,
    pub avatar: String,
}

/// An active enrollment with progress and review aggregates, as listed by
/// `GET /api/users/courses`. The rating fields are merged in from a second
/// query, so they default when absent from the row.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EnrolledCourse {
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
    pub enrolled_at: DateTime<Utc>,
    pub enrollment_status: EnrollmentStatus,
    pub progress: i32,
    pub last_accessed: DateTime<Utc>,
    #[sqlx(default)]
    pub average_rating: Option<f64>,
    #[sqlx(default)]
    pub review_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for (role, s) in [
            (UserRole::Admin, "admin"),
            (UserRole::Instructor, "instructor"),
            (UserRole::User, "user"),
        ] {
            assert_eq!(role.as_str(), s);
            assert_eq!(serde_json::to_string(&role).unwrap(), format!("\"{}\"", s));
        }
    }

    #[test]
    fn test_status_deserialize() {
        assert_eq!(
            serde_json::from_str::<UserStatus>("\"active\"").unwrap(),
            UserStatus::Active
        );
        assert_eq!(
            serde_json::from_str::<UserStatus>("\"blocked\"").unwrap(),
            UserStatus::Blocked
        );
        assert!(serde_json::from_str::<UserStatus>("\"suspended\"").is_err());
    }

    #[test]
    fn test_update_profile_dto_validation() {
        let dto = UpdateProfileDto {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            bio: None,
        };
        assert!(dto.validate().is_ok());

        let dto = UpdateProfileDto {
            name: "".to_string(),
            email: "jane@example.com".to_string(),
            bio: None,
        };
        assert!(dto.validate().is_err());

        let dto = UpdateProfileDto {
            name: "Jane".to_string(),
            email: "not-an-email".to_string(),
            bio: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_user_serialization_has_no_password() {
        let user = User {
            id: Uuid::new_v4(),
            name: "John".to_string(),
            email: "john@example.com".to_string(),
            role: UserRole::User,
            status: UserStatus::Active,
            bio: None,
            avatar: None,
            title: None,
            created_at: Utc::now(),
        };

        let serialized = serde_json::to_string(&user).unwrap();
        assert!(serialized.contains("john@example.com"));
        assert!(!serialized.contains("password"));
    }
}
