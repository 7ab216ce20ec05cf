use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::instructors::model::{Instructor, InstructorDetailResponse};
use crate::modules::instructors::service::InstructorService;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// List instructors with teaching aggregates
#[utoipa::path(
    get,
    path = "/api/instructors",
    responses(
        (status = 200, description = "Instructors", body = Vec<Instructor>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Instructors"
)]
#[instrument(skip(state))]
pub async fn get_instructors(
    State(state): State<AppState>,
) -> Result<Json<Vec<Instructor>>, AppError> {
    let instructors = InstructorService::get_all_instructors(&state.db).await?;
    Ok(Json(instructors))
}

/// Get an instructor with their courses
#[utoipa::path(
    get,
    path = "/api/instructors/{id}",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    responses(
        (status = 200, description = "Instructor detail", body = InstructorDetailResponse),
        (status = 404, description = "Instructor not found", body = ErrorResponse)
    ),
    tag = "Instructors"
)]
#[instrument(skip(state))]
pub async fn get_instructor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InstructorDetailResponse>, AppError> {
    let instructor = InstructorService::get_instructor(&state.db, id).await?;
    Ok(Json(instructor))
}
