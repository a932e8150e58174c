use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use registrar_core::AppError;
use registrar_models::{
    MarkFilterParams, PaginatedMarksResponse, StudentEnrolledCourse, StudentEnrolledCourseMark,
    UpdateFinalMarksDto, UpdateMarksDto,
};

use crate::middleware::auth::{RequireMarksRead, RequireMarksUpdate};
use crate::modules::marks::service::MarkService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/student-enrolled-course-marks",
    params(MarkFilterParams),
    responses(
        (status = 200, description = "List of exam marks", body = PaginatedMarksResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires marks:read permission")
    ),
    tag = "Marks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_marks(
    State(state): State<AppState>,
    RequireMarksRead(_auth_user): RequireMarksRead,
    Query(filters): Query<MarkFilterParams>,
) -> Result<Json<PaginatedMarksResponse>, AppError> {
    let marks = MarkService::list_marks(&state.db, filters).await?;

    Ok(Json(marks))
}

/// Enter the mark of one exam
#[utoipa::path(
    patch,
    path = "/api/student-enrolled-course-marks/update-marks",
    request_body = UpdateMarksDto,
    responses(
        (status = 200, description = "Mark stored with its grade", body = StudentEnrolledCourseMark),
        (status = 400, description = "Marks outside 0..=100"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires marks:update permission"),
        (status = 404, description = "No mark row for this student, semester, course and exam")
    ),
    tag = "Marks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_marks(
    State(state): State<AppState>,
    RequireMarksUpdate(_auth_user): RequireMarksUpdate,
    ValidatedJson(dto): ValidatedJson<UpdateMarksDto>,
) -> Result<Json<StudentEnrolledCourseMark>, AppError> {
    let mark = MarkService::update_marks(&state.db, dto).await?;

    Ok(Json(mark))
}

/// Compute the course result from the midterm and final marks
#[utoipa::path(
    patch,
    path = "/api/student-enrolled-course-marks/update-final-marks",
    request_body = UpdateFinalMarksDto,
    responses(
        (status = 200, description = "Enrolled course completed", body = StudentEnrolledCourse),
        (status = 400, description = "Midterm or final marks missing"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires marks:update permission"),
        (status = 404, description = "Student enrolled course not found")
    ),
    tag = "Marks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_final_marks(
    State(state): State<AppState>,
    RequireMarksUpdate(_auth_user): RequireMarksUpdate,
    ValidatedJson(dto): ValidatedJson<UpdateFinalMarksDto>,
) -> Result<Json<StudentEnrolledCourse>, AppError> {
    let enrolled_course = MarkService::update_final_marks(&state.db, dto).await?;

    Ok(Json(enrolled_course))
}
