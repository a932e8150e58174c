use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use registrar_core::AppError;
use registrar_models::ids::ClassScheduleId;
use registrar_models::{
    ClassScheduleFilterParams, CreateClassScheduleDto, OfferedCourseClassSchedule,
    PaginatedClassSchedulesResponse,
};

use crate::middleware::auth::{
    RequireClassSchedulesCreate, RequireClassSchedulesDelete, RequireClassSchedulesRead,
};
use crate::modules::class_schedules::service::ClassScheduleService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Book a weekly class slot for a section
#[utoipa::path(
    post,
    path = "/api/offered-course-class-schedules",
    request_body = CreateClassScheduleDto,
    responses(
        (status = 201, description = "Class schedule created", body = OfferedCourseClassSchedule),
        (status = 400, description = "Start time is not before end time"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires class_schedules:create permission"),
        (status = 404, description = "Section, room or faculty not found"),
        (status = 409, description = "Room is already booked or faculty is already assigned")
    ),
    tag = "Class Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_schedule(
    State(state): State<AppState>,
    RequireClassSchedulesCreate(_auth_user): RequireClassSchedulesCreate,
    ValidatedJson(dto): ValidatedJson<CreateClassScheduleDto>,
) -> Result<(StatusCode, Json<OfferedCourseClassSchedule>), AppError> {
    let schedule = ClassScheduleService::create_schedule(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(schedule)))
}

#[utoipa::path(
    get,
    path = "/api/offered-course-class-schedules",
    params(ClassScheduleFilterParams),
    responses(
        (status = 200, description = "List of class schedules", body = PaginatedClassSchedulesResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires class_schedules:read permission")
    ),
    tag = "Class Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_schedules(
    State(state): State<AppState>,
    RequireClassSchedulesRead(_auth_user): RequireClassSchedulesRead,
    Query(filters): Query<ClassScheduleFilterParams>,
) -> Result<Json<PaginatedClassSchedulesResponse>, AppError> {
    let schedules = ClassScheduleService::list_schedules(&state.db, filters).await?;

    Ok(Json(schedules))
}

#[utoipa::path(
    get,
    path = "/api/offered-course-class-schedules/{id}",
    params(
        ("id" = Uuid, Path, description = "Class schedule ID")
    ),
    responses(
        (status = 200, description = "Class schedule details", body = OfferedCourseClassSchedule),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires class_schedules:read permission"),
        (status = 404, description = "Class schedule not found")
    ),
    tag = "Class Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_schedule(
    State(state): State<AppState>,
    RequireClassSchedulesRead(_auth_user): RequireClassSchedulesRead,
    Path(id): Path<ClassScheduleId>,
) -> Result<Json<OfferedCourseClassSchedule>, AppError> {
    let schedule = ClassScheduleService::get_schedule(&state.db, id).await?;

    Ok(Json(schedule))
}

#[utoipa::path(
    delete,
    path = "/api/offered-course-class-schedules/{id}",
    params(
        ("id" = Uuid, Path, description = "Class schedule ID")
    ),
    responses(
        (status = 204, description = "Class schedule deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires class_schedules:delete permission"),
        (status = 404, description = "Class schedule not found")
    ),
    tag = "Class Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_schedule(
    State(state): State<AppState>,
    RequireClassSchedulesDelete(_auth_user): RequireClassSchedulesDelete,
    Path(id): Path<ClassScheduleId>,
) -> Result<StatusCode, AppError> {
    ClassScheduleService::delete_schedule(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
