use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use registrar_core::AppError;
use registrar_models::ids::SemesterRegistrationId;
use registrar_models::{
    CreateSemesterRegistrationDto, MessageResponse, MyRegistrationResponse,
    PaginatedSemesterRegistrationsResponse, RegistrationCourseDetails, SemesterRegistration,
    SemesterRegistrationFilterParams, StudentSemesterRegistration, UpdateRegistrationStatusDto,
    UpdateSemesterRegistrationDto,
};

use crate::middleware::auth::{
    RequireEnrollmentsSelf, RequireRegistrationsCreate, RequireRegistrationsDelete,
    RequireRegistrationsRead, RequireRegistrationsRollover, RequireRegistrationsUpdate,
};
use crate::modules::semester_registrations::rollover::SemesterRolloverService;
use crate::modules::semester_registrations::service::SemesterRegistrationService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Open a new registration window
#[utoipa::path(
    post,
    path = "/api/semester-registrations",
    request_body = CreateSemesterRegistrationDto,
    responses(
        (status = 201, description = "Registration created as UPCOMING", body = SemesterRegistration),
        (status = 400, description = "Invalid credit bounds or date window"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires semester_registrations:create permission"),
        (status = 404, description = "Academic semester not found"),
        (status = 409, description = "Another registration is UPCOMING or ONGOING")
    ),
    tag = "Semester Registrations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_registration(
    State(state): State<AppState>,
    RequireRegistrationsCreate(_auth_user): RequireRegistrationsCreate,
    ValidatedJson(dto): ValidatedJson<CreateSemesterRegistrationDto>,
) -> Result<(StatusCode, Json<SemesterRegistration>), AppError> {
    let registration = SemesterRegistrationService::create_registration(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(registration)))
}

#[utoipa::path(
    get,
    path = "/api/semester-registrations",
    params(SemesterRegistrationFilterParams),
    responses(
        (status = 200, description = "List of registrations", body = PaginatedSemesterRegistrationsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires semester_registrations:read permission")
    ),
    tag = "Semester Registrations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_registrations(
    State(state): State<AppState>,
    RequireRegistrationsRead(_auth_user): RequireRegistrationsRead,
    Query(filters): Query<SemesterRegistrationFilterParams>,
) -> Result<Json<PaginatedSemesterRegistrationsResponse>, AppError> {
    let registrations = SemesterRegistrationService::list_registrations(&state.db, filters).await?;

    Ok(Json(registrations))
}

#[utoipa::path(
    get,
    path = "/api/semester-registrations/{id}",
    params(
        ("id" = Uuid, Path, description = "Semester registration ID")
    ),
    responses(
        (status = 200, description = "Registration details", body = SemesterRegistration),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires semester_registrations:read permission"),
        (status = 404, description = "Semester registration not found")
    ),
    tag = "Semester Registrations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_registration(
    State(state): State<AppState>,
    RequireRegistrationsRead(_auth_user): RequireRegistrationsRead,
    Path(id): Path<SemesterRegistrationId>,
) -> Result<Json<SemesterRegistration>, AppError> {
    let registration = SemesterRegistrationService::get_registration(&state.db, id).await?;

    Ok(Json(registration))
}

#[utoipa::path(
    patch,
    path = "/api/semester-registrations/{id}",
    params(
        ("id" = Uuid, Path, description = "Semester registration ID")
    ),
    request_body = UpdateSemesterRegistrationDto,
    responses(
        (status = 200, description = "Registration updated", body = SemesterRegistration),
        (status = 400, description = "Registration has ended, or invalid bounds"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires semester_registrations:update permission"),
        (status = 404, description = "Semester registration not found")
    ),
    tag = "Semester Registrations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_registration(
    State(state): State<AppState>,
    RequireRegistrationsUpdate(_auth_user): RequireRegistrationsUpdate,
    Path(id): Path<SemesterRegistrationId>,
    ValidatedJson(dto): ValidatedJson<UpdateSemesterRegistrationDto>,
) -> Result<Json<SemesterRegistration>, AppError> {
    let registration = SemesterRegistrationService::update_registration(&state.db, id, dto).await?;

    Ok(Json(registration))
}

/// Move a registration to its next status
#[utoipa::path(
    patch,
    path = "/api/semester-registrations/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Semester registration ID")
    ),
    request_body = UpdateRegistrationStatusDto,
    responses(
        (status = 200, description = "Status changed", body = SemesterRegistration),
        (status = 400, description = "Only UPCOMING to ONGOING and ONGOING to ENDED are allowed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires semester_registrations:update permission"),
        (status = 404, description = "Semester registration not found")
    ),
    tag = "Semester Registrations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn advance_status(
    State(state): State<AppState>,
    RequireRegistrationsUpdate(_auth_user): RequireRegistrationsUpdate,
    Path(id): Path<SemesterRegistrationId>,
    ValidatedJson(dto): ValidatedJson<UpdateRegistrationStatusDto>,
) -> Result<Json<SemesterRegistration>, AppError> {
    let registration =
        SemesterRegistrationService::advance_status(&state.db, id, dto.status).await?;

    Ok(Json(registration))
}

#[utoipa::path(
    delete,
    path = "/api/semester-registrations/{id}",
    params(
        ("id" = Uuid, Path, description = "Semester registration ID")
    ),
    responses(
        (status = 204, description = "Registration deleted"),
        (status = 400, description = "Registration is not UPCOMING"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires semester_registrations:delete permission"),
        (status = 404, description = "Semester registration not found"),
        (status = 409, description = "Registration still has dependents")
    ),
    tag = "Semester Registrations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_registration(
    State(state): State<AppState>,
    RequireRegistrationsDelete(_auth_user): RequireRegistrationsDelete,
    Path(id): Path<SemesterRegistrationId>,
) -> Result<StatusCode, AppError> {
    SemesterRegistrationService::delete_registration(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Roll an ended registration into its academic semester
#[utoipa::path(
    post,
    path = "/api/semester-registrations/{id}/start-new-semester",
    params(
        ("id" = Uuid, Path, description = "Semester registration ID")
    ),
    responses(
        (status = 200, description = "Semester started", body = MessageResponse),
        (status = 400, description = "Registration has not ended, or the semester has already started"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires semester_registrations:rollover permission"),
        (status = 404, description = "Semester registration not found")
    ),
    tag = "Semester Registrations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn start_new_semester(
    State(state): State<AppState>,
    RequireRegistrationsRollover(_auth_user): RequireRegistrationsRollover,
    Path(id): Path<SemesterRegistrationId>,
) -> Result<Json<MessageResponse>, AppError> {
    let response = SemesterRolloverService::start_new_semester(&state.db, id).await?;

    Ok(Json(response))
}

/// Join the ongoing registration window
#[utoipa::path(
    post,
    path = "/api/semester-registrations/start-registration",
    responses(
        (status = 200, description = "The caller's participation row", body = StudentSemesterRegistration),
        (status = 400, description = "Registration is not started yet"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires enrollments:self permission"),
        (status = 404, description = "Student or open registration not found")
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn start_my_registration(
    State(state): State<AppState>,
    RequireEnrollmentsSelf(auth_user): RequireEnrollmentsSelf,
) -> Result<Json<StudentSemesterRegistration>, AppError> {
    let user_id = auth_user.user_id()?;

    let registration = SemesterRegistrationService::start_my_registration(&state.db, user_id).await?;

    Ok(Json(registration))
}

#[utoipa::path(
    get,
    path = "/api/semester-registrations/my-registration",
    responses(
        (status = 200, description = "Ongoing registration and the caller's participation", body = MyRegistrationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires enrollments:self permission"),
        (status = 404, description = "Student not found")
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_my_registration(
    State(state): State<AppState>,
    RequireEnrollmentsSelf(auth_user): RequireEnrollmentsSelf,
) -> Result<Json<MyRegistrationResponse>, AppError> {
    let user_id = auth_user.user_id()?;

    let registration = SemesterRegistrationService::get_my_registration(&state.db, user_id).await?;

    Ok(Json(registration))
}

#[utoipa::path(
    get,
    path = "/api/semester-registrations/my-registration-courses",
    responses(
        (status = 200, description = "Courses the caller is enrolled in", body = Vec<RegistrationCourseDetails>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires enrollments:self permission"),
        (status = 404, description = "Student or ongoing registration not found")
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_my_registration_courses(
    State(state): State<AppState>,
    RequireEnrollmentsSelf(auth_user): RequireEnrollmentsSelf,
) -> Result<Json<Vec<RegistrationCourseDetails>>, AppError> {
    let user_id = auth_user.user_id()?;

    let courses =
        SemesterRegistrationService::get_my_registration_courses(&state.db, user_id).await?;

    Ok(Json(courses))
}
