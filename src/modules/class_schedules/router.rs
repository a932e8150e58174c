use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_schedule, delete_schedule, get_schedule, list_schedules};

pub fn init_class_schedules_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_schedules).post(create_schedule))
        .route("/{id}", get(get_schedule).delete(delete_schedule))
}
