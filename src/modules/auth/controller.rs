use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_token;
use crate::validator::ValidatedJson;

use super::model::{LoginRequest, RegisterRequest, TokenResponse, VerifyResponse};
use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = TokenResponse),
        (status = 400, description = "Validation error or email already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let user = AuthService::register_user(&state.db, dto).await?;
    let token = create_token(user.id, &user.email, &user.role, &state.jwt_config)?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// Login and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = AuthService::login_user(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(TokenResponse { token }))
}

/// Verify the presented token and return fresh user data
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    responses(
        (status = 200, description = "Token valid", body = VerifyResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, headers))]
pub async fn verify_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    auth_user: AuthUser,
) -> Result<Json<VerifyResponse>, AppError> {
    let user = AuthService::get_verified_user(&state.db, auth_user.user_id()?).await?;

    // Echo back the token the client presented.
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .unwrap_or_default()
        .to_string();

    Ok(Json(VerifyResponse { user, token }))
}
