use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::courses::controller::{
    enroll, get_course, get_courses, unsubscribe, update_progress,
};
use crate::state::AppState;

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_courses))
        .route("/{id}", get(get_course))
        .route("/{id}/enroll", post(enroll))
        .route("/{id}/unsubscribe", post(unsubscribe))
        .route("/{id}/progress", post(update_progress))
}
