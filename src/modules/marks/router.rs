use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

use super::controller::{list_marks, update_final_marks, update_marks};

pub fn init_marks_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_marks))
        .route("/update-marks", patch(update_marks))
        .route("/update-final-marks", patch(update_final_marks))
}
