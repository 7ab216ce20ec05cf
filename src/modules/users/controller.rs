use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::{
    AvatarResponse, EnrolledCourse, ProfileResponse, UpdateAvatarDto, UpdateProfileDto,
    UserResponse,
};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Get the authenticated user's profile with their enrollments
#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "User profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    let user = UserService::get_user(&state.db, user_id).await?;
    let enrollments = UserService::get_enrollments(&state.db, user_id).await?;

    Ok(Json(ProfileResponse { user, enrollments }))
}

/// Update the authenticated user's profile
#[utoipa::path(
    put,
    path = "/api/users/profile",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error or email already in use", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::update_profile(&state.db, auth_user.user_id()?, dto).await?;
    Ok(Json(UserResponse { user }))
}

/// Update the authenticated user's avatar
#[utoipa::path(
    patch,
    path = "/api/users/profile/avatar",
    request_body = UpdateAvatarDto,
    responses(
        (status = 200, description = "Avatar updated", body = AvatarResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_avatar(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateAvatarDto>,
) -> Result<Json<AvatarResponse>, AppError> {
    UserService::update_avatar(&state.db, auth_user.user_id()?, &dto.avatar).await?;
    Ok(Json(AvatarResponse {
        message: "Avatar updated successfully".to_string(),
        avatar: dto.avatar,
    }))
}

/// List the authenticated user's active enrollments with progress
#[utoipa::path(
    get,
    path = "/api/users/courses",
    responses(
        (status = 200, description = "Enrolled courses", body = Vec<EnrolledCourse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_enrolled_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<EnrolledCourse>>, AppError> {
    let courses = UserService::get_enrolled_courses(&state.db, auth_user.user_id()?).await?;
    Ok(Json(courses))
}
