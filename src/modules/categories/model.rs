use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::courses::model::CourseWithStats;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A category with its course and enrolled-student counts.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CategoryWithCounts {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub course_count: i64,
    pub student_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDetailResponse {
    #[serde(flatten)]
    pub category: CategoryWithCounts,
    pub courses: Vec<CourseWithStats>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dto_rejects_empty_name() {
        let dto = CreateCategoryDto {
            name: "".to_string(),
            description: None,
        };
        assert!(dto.validate().is_err());

        let dto = CreateCategoryDto {
            name: "Data".to_string(),
            description: Some("Data engineering".to_string()),
        };
        assert!(dto.validate().is_ok());
    }
}
