use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use registrar_core::AppError;
use registrar_models::{
    EnrollCourseDto, MessageResponse, StudentSemesterRegistration,
    StudentSemesterRegistrationCourse,
};

use crate::metrics;
use crate::middleware::auth::RequireEnrollmentsSelf;
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Enroll into a section of an offered course
#[utoipa::path(
    post,
    path = "/api/semester-registrations/enroll-into-course",
    request_body = EnrollCourseDto,
    responses(
        (status = 201, description = "Enrolled into the section", body = StudentSemesterRegistrationCourse),
        (status = 400, description = "Section not part of the offered course, or registration not started"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires enrollments:self permission"),
        (status = 404, description = "Student, ongoing registration, offered course or section not found"),
        (status = 409, description = "Already enrolled, or maximum capacity exceeded")
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn enroll_into_course(
    State(state): State<AppState>,
    RequireEnrollmentsSelf(auth_user): RequireEnrollmentsSelf,
    ValidatedJson(dto): ValidatedJson<EnrollCourseDto>,
) -> Result<(StatusCode, Json<StudentSemesterRegistrationCourse>), AppError> {
    let user_id = auth_user.user_id()?;

    let link = EnrollmentService::enroll(&state.db, user_id, dto)
        .await
        .inspect_err(|err| metrics::track_enrollment_rejected(err.kind.as_str()))?;

    Ok((StatusCode::CREATED, Json(link)))
}

/// Withdraw from an offered course
#[utoipa::path(
    post,
    path = "/api/semester-registrations/withdraw-from-course",
    request_body = EnrollCourseDto,
    responses(
        (status = 200, description = "Withdrawn from the course", body = MessageResponse),
        (status = 400, description = "Enrolled in a different section, or counters already at zero"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires enrollments:self permission"),
        (status = 404, description = "Not enrolled in this course")
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn withdraw_from_course(
    State(state): State<AppState>,
    RequireEnrollmentsSelf(auth_user): RequireEnrollmentsSelf,
    ValidatedJson(dto): ValidatedJson<EnrollCourseDto>,
) -> Result<Json<MessageResponse>, AppError> {
    let user_id = auth_user.user_id()?;

    let response = EnrollmentService::withdraw(&state.db, user_id, dto).await?;

    Ok(Json(response))
}

/// Confirm the caller's registration for the ongoing window
#[utoipa::path(
    post,
    path = "/api/semester-registrations/confirm-my-registration",
    responses(
        (status = 200, description = "Registration confirmed", body = StudentSemesterRegistration),
        (status = 400, description = "No courses taken, or credits outside the allowed bounds"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires enrollments:self permission"),
        (status = 404, description = "No ongoing registration")
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn confirm_my_registration(
    State(state): State<AppState>,
    RequireEnrollmentsSelf(auth_user): RequireEnrollmentsSelf,
) -> Result<Json<StudentSemesterRegistration>, AppError> {
    let user_id = auth_user.user_id()?;

    let confirmed = EnrollmentService::confirm(&state.db, user_id).await?;

    Ok(Json(confirmed))
}
