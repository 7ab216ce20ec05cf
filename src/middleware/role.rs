//! Role-based authorization middleware.
//!
//! Routes compose zero, one, or two gates: the [`AuthUser`] extractor
//! authenticates, and [`require_admin`] (via [`require_roles`]) restricts
//! a whole subtree to a role.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Middleware function that checks if the authenticated user has one of
/// the required roles.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: Vec<UserRole>,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    let user_role = parse_role_from_string(auth_user.role())?;

    if !allowed_roles.contains(&user_role) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Access denied. Administrator privileges required."
        )));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Gate for the admin dashboard routes.
///
/// # Example
///
/// ```rust,ignore
/// let admin_routes = Router::new()
///     .route("/stats", get(stats_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![UserRole::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Check a single required role inside a handler.
pub fn check_role(auth_user: &AuthUser, required_role: UserRole) -> Result<(), AppError> {
    let user_role = parse_role_from_string(auth_user.role())?;

    if user_role != required_role {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Access denied. Required role: {:?}, but user has role: {:?}",
            required_role,
            user_role
        )));
    }

    Ok(())
}

/// Check that the user holds any of the allowed roles.
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    let user_role = parse_role_from_string(auth_user.role())?;

    if !allowed_roles.contains(&user_role) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Access denied. Required roles: {:?}, but user has role: {:?}",
            allowed_roles,
            user_role
        )));
    }

    Ok(())
}

/// Parse a role claim into a [`UserRole`].
///
/// An unknown value means the token was signed with a role this server
/// never issues, so it maps to an internal error rather than Forbidden.
pub fn parse_role_from_string(role_str: &str) -> Result<UserRole, AppError> {
    match role_str {
        "admin" => Ok(UserRole::Admin),
        "instructor" => Ok(UserRole::Instructor),
        "user" => Ok(UserRole::User),
        _ => Err(AppError::internal(anyhow::anyhow!(
            "Invalid role: {}",
            role_str
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_from_string() {
        assert!(matches!(parse_role_from_string("admin"), Ok(UserRole::Admin)));
        assert!(matches!(
            parse_role_from_string("instructor"),
            Ok(UserRole::Instructor)
        ));
        assert!(matches!(parse_role_from_string("user"), Ok(UserRole::User)));
        assert!(parse_role_from_string("superuser").is_err());
        assert!(parse_role_from_string("").is_err());
    }
}
