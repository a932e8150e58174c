use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::modules::enrollments::controller::{
    confirm_my_registration, enroll_into_course, withdraw_from_course,
};
use crate::state::AppState;

use super::controller::{
    advance_status, create_registration, delete_registration, get_my_registration,
    get_my_registration_courses, get_registration, list_registrations, start_my_registration,
    start_new_semester, update_registration,
};

pub fn init_semester_registrations_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_registration).get(list_registrations))
        .route("/start-registration", post(start_my_registration))
        .route("/my-registration", get(get_my_registration))
        .route("/my-registration-courses", get(get_my_registration_courses))
        .route("/enroll-into-course", post(enroll_into_course))
        .route("/withdraw-from-course", post(withdraw_from_course))
        .route("/confirm-my-registration", post(confirm_my_registration))
        .route(
            "/{id}",
            get(get_registration)
                .patch(update_registration)
                .delete(delete_registration),
        )
        .route("/{id}/status", patch(advance_status))
        .route("/{id}/start-new-semester", post(start_new_semester))
}
