use axum::{Json, extract::State};
use tracing::instrument;

use registrar_core::AppError;
use registrar_models::AcademicSemester;

use crate::middleware::auth::RequireAcademicSemestersRead;
use crate::modules::academic_semesters::service::AcademicSemesterService;
use crate::state::AppState;

/// Get the academic semester currently in session
#[utoipa::path(
    get,
    path = "/api/academic-semesters/current",
    summary = "Get current academic semester",
    responses(
        (status = 200, description = "Current semester, or null before the first rollover", body = Option<AcademicSemester>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires academic_semesters:read permission")
    ),
    tag = "Academic Semesters",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_current_semester(
    State(state): State<AppState>,
    RequireAcademicSemestersRead(_auth_user): RequireAcademicSemestersRead,
) -> Result<Json<Option<AcademicSemester>>, AppError> {
    let semester = AcademicSemesterService::get_current(&state.db).await?;

    Ok(Json(semester))
}
