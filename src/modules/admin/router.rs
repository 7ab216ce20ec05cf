use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::middleware::role::require_admin;
use crate::modules::admin::controller::{
    admin_login, create_course, delete_course, get_admin_profile, get_courses,
    get_dashboard_stats, get_users, update_course, update_user_status,
};
use crate::state::AppState;

/// The `/api/admin` subtree. Everything except `/login` sits behind the
/// admin role gate.
pub fn init_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/login", post(admin_login))
        .merge(
            Router::new()
                .route("/profile", get(get_admin_profile))
                .route("/stats", get(get_dashboard_stats))
                .route("/users", get(get_users))
                .route("/users/{id}/status", patch(update_user_status))
                .route("/courses", get(get_courses).post(create_course))
                .route(
                    "/courses/{id}",
                    put(update_course).delete(delete_course),
                )
                .route_layer(middleware::from_fn_with_state(state, require_admin)),
        )
}
