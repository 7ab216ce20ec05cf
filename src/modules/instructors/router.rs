use axum::{Router, routing::get};

use crate::modules::instructors::controller::{get_instructor, get_instructors};
use crate::state::AppState;

pub fn init_instructors_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_instructors))
        .route("/{id}", get(get_instructor))
}
