use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::admin::model::{
    AdminCourseRow, AdminLoginResponse, CreateCourseDto, DashboardStats,
    PaginatedCoursesResponse, PaginatedUsersResponse, UpdateCourseDto, UpdateUserStatusDto,
};
use crate::modules::admin::service::AdminService;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, MessageResponse};
use crate::modules::users::model::User;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::SearchParams;
use crate::validator::ValidatedJson;

/// Login to the admin dashboard
#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AdminLoginResponse),
        (status = 401, description = "Invalid credentials or not an admin", body = ErrorResponse)
    ),
    tag = "Admin"
)]
#[instrument(skip(state, dto))]
pub async fn admin_login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<AdminLoginResponse>, AppError> {
    let response = AdminService::login(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Get the authenticated admin's profile
#[utoipa::path(
    get,
    path = "/api/admin/profile",
    responses(
        (status = 200, description = "Admin profile", body = User),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Admin not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_admin_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = AdminService::get_admin_profile(&state.db, auth_user.user_id()?).await?;
    Ok(Json(user))
}

/// Dashboard statistics: entity counts, average rating, enrollments by month
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = AdminService::get_dashboard_stats(&state.db).await?;
    Ok(Json(stats))
}

/// Paginated user listing with search
#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(SearchParams),
    responses(
        (status = 200, description = "Users page", body = PaginatedUsersResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<PaginatedUsersResponse>, AppError> {
    let response = AdminService::get_users(&state.db, params).await?;
    Ok(Json(response))
}

/// Toggle a user between active and blocked
#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/status",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserStatusDto,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 403, description = "Target is an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, dto))]
pub async fn update_user_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserStatusDto>,
) -> Result<Json<MessageResponse>, AppError> {
    AdminService::update_user_status(&state.db, id, dto.status).await?;
    Ok(Json(MessageResponse {
        message: "User status updated successfully".to_string(),
    }))
}

/// Paginated course listing with search
#[utoipa::path(
    get,
    path = "/api/admin/courses",
    params(SearchParams),
    responses(
        (status = 200, description = "Courses page", body = PaginatedCoursesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<PaginatedCoursesResponse>, AppError> {
    let response = AdminService::get_courses(&state.db, params).await?;
    Ok(Json(response))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/api/admin/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = AdminCourseRow),
        (status = 400, description = "Validation error or invalid references", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<AdminCourseRow>), AppError> {
    let course = AdminService::create_course(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/api/admin/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = AdminCourseRow),
        (status = 400, description = "Validation error or invalid references", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<AdminCourseRow>, AppError> {
    let course = AdminService::update_course(&state.db, id, dto).await?;
    Ok(Json(course))
}

/// Delete a course (refused while it has active enrollments)
#[utoipa::path(
    delete,
    path = "/api/admin/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 409, description = "Course has active enrollments", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    AdminService::delete_course(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Course deleted successfully".to_string(),
    }))
}
