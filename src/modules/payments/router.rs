use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::list_payments;

pub fn init_payments_router() -> Router<AppState> {
    Router::new().route("/", get(list_payments))
}
