use axum::{
    Router,
    routing::{get, patch},
};

use crate::modules::users::controller::{
    get_enrolled_courses, get_profile, update_avatar, update_profile,
};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/profile/avatar", patch(update_avatar))
        .route("/courses", get(get_enrolled_courses))
}
