use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::courses::model::{CourseDetailResponse, CourseWithStats, UpdateProgressDto};
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List the public course catalog
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Course catalog", body = Vec<CourseWithStats>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseWithStats>>, AppError> {
    let courses = CourseService::get_all_courses(&state.db).await?;
    Ok(Json(courses))
}

/// Get a course with its reviews
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course detail", body = CourseDetailResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseDetailResponse>, AppError> {
    let course = CourseService::get_course(&state.db, id).await?;
    Ok(Json(course))
}

/// Enroll the authenticated user in a course
#[utoipa::path(
    post,
    path = "/api/courses/{id}/enroll",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 201, description = "Enrolled", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 409, description = "Already enrolled", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn enroll(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth_user: AuthUser,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    CourseService::enroll(&state.db, auth_user.user_id()?, id).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Successfully enrolled in course".to_string(),
        }),
    ))
}

/// Unsubscribe the authenticated user from a course
#[utoipa::path(
    post,
    path = "/api/courses/{id}/unsubscribe",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Unsubscribed", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No active enrollment", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn unsubscribe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth_user: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::unsubscribe(&state.db, auth_user.user_id()?, id).await?;
    Ok(Json(MessageResponse {
        message: "Successfully unsubscribed from course".to_string(),
    }))
}

/// Update the authenticated user's progress in a course
#[utoipa::path(
    post,
    path = "/api/courses/{id}/progress",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateProgressDto,
    responses(
        (status = 200, description = "Progress updated", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Progress out of range", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn update_progress(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProgressDto>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::update_progress(&state.db, auth_user.user_id()?, id, dto.progress_percentage)
        .await?;
    Ok(Json(MessageResponse {
        message: "Progress updated successfully".to_string(),
    }))
}
