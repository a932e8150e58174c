use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_current_semester;

/// Routes: GET /current
pub fn init_academic_semesters_router() -> Router<AppState> {
    Router::new().route("/current", get(get_current_semester))
}
