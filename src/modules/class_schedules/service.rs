use anyhow::anyhow;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use registrar_core::{AppError, PaginationMeta};
use registrar_models::ids::{ClassScheduleId, FacultyId, RoomId, SemesterRegistrationId};
use registrar_models::{
    ClassScheduleFilterParams, CreateClassScheduleDto, OfferedCourseClassSchedule,
    PaginatedClassSchedulesResponse, TimeSlot,
};

use super::conflict::has_conflict;

const SCHEDULE_COLUMNS: &str = r#"id, day_of_week, start_time, end_time, offered_course_section_id,
    semester_registration_id, room_id, faculty_id, created_at, updated_at"#;

pub struct ClassScheduleService;

fn apply_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &ClassScheduleFilterParams) {
    builder.push(" WHERE TRUE");
    if let Some(section_id) = filters.offered_course_section_id {
        builder
            .push(" AND offered_course_section_id = ")
            .push_bind(section_id);
    }
    if let Some(registration_id) = filters.semester_registration_id {
        builder
            .push(" AND semester_registration_id = ")
            .push_bind(registration_id);
    }
    if let Some(room_id) = filters.room_id {
        builder.push(" AND room_id = ").push_bind(room_id);
    }
    if let Some(faculty_id) = filters.faculty_id {
        builder.push(" AND faculty_id = ").push_bind(faculty_id);
    }
    if let Some(day_of_week) = filters.day_of_week {
        builder.push(" AND day_of_week = ").push_bind(day_of_week);
    }
}

impl ClassScheduleService {
    /// Books a weekly slot for a section after checking that neither the room
    /// nor the faculty is already taken at that time.
    ///
    /// The room and faculty rows stay locked until the insert commits, so two
    /// overlapping bookings cannot both pass the check.
    #[instrument(skip(db))]
    pub async fn create_schedule(
        db: &PgPool,
        dto: CreateClassScheduleDto,
    ) -> Result<OfferedCourseClassSchedule, AppError> {
        if dto.start_time >= dto.end_time {
            return Err(AppError::bad_request(anyhow!(
                "Start time must be before end time"
            )));
        }

        let mut tx = db.begin().await?;

        let registration_id = sqlx::query_scalar::<_, SemesterRegistrationId>(
            r#"SELECT oc.semester_registration_id
               FROM offered_course_sections s
               JOIN offered_courses oc ON oc.id = s.offered_course_id
               WHERE s.id = $1"#,
        )
        .bind(dto.offered_course_section_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Offered course section not found")))?;

        sqlx::query_scalar::<_, RoomId>("SELECT id FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(dto.room_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Room not found")))?;

        sqlx::query_scalar::<_, FacultyId>("SELECT id FROM faculties WHERE id = $1 FOR UPDATE")
            .bind(dto.faculty_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Faculty not found")))?;

        let candidate = dto.slot();

        let room_slots = sqlx::query_as::<_, TimeSlot>(
            r#"SELECT day_of_week, start_time, end_time FROM offered_course_class_schedules
               WHERE room_id = $1 AND day_of_week = $2"#,
        )
        .bind(dto.room_id)
        .bind(dto.day_of_week)
        .fetch_all(&mut *tx)
        .await?;

        if has_conflict(&room_slots, &candidate) {
            return Err(AppError::conflict(anyhow!("Room is already booked")));
        }

        let faculty_slots = sqlx::query_as::<_, TimeSlot>(
            r#"SELECT day_of_week, start_time, end_time FROM offered_course_class_schedules
               WHERE faculty_id = $1 AND day_of_week = $2"#,
        )
        .bind(dto.faculty_id)
        .bind(dto.day_of_week)
        .fetch_all(&mut *tx)
        .await?;

        if has_conflict(&faculty_slots, &candidate) {
            return Err(AppError::conflict(anyhow!("Faculty is already assigned")));
        }

        let schedule = sqlx::query_as::<_, OfferedCourseClassSchedule>(&format!(
            r#"INSERT INTO offered_course_class_schedules
                   (day_of_week, start_time, end_time, offered_course_section_id,
                    semester_registration_id, room_id, faculty_id)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING {SCHEDULE_COLUMNS}"#
        ))
        .bind(dto.day_of_week)
        .bind(dto.start_time)
        .bind(dto.end_time)
        .bind(dto.offered_course_section_id)
        .bind(registration_id)
        .bind(dto.room_id)
        .bind(dto.faculty_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(schedule)
    }

    #[instrument(skip(db))]
    pub async fn list_schedules(
        db: &PgPool,
        filters: ClassScheduleFilterParams,
    ) -> Result<PaginatedClassSchedulesResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut count =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM offered_course_class_schedules");
        apply_filters(&mut count, &filters);
        let total = count.build_query_scalar::<i64>().fetch_one(db).await?;

        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {SCHEDULE_COLUMNS} FROM offered_course_class_schedules"
        ));
        apply_filters(&mut query, &filters);
        query
            .push(" ORDER BY day_of_week, start_time LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let schedules = query
            .build_query_as::<OfferedCourseClassSchedule>()
            .fetch_all(db)
            .await?;

        Ok(PaginatedClassSchedulesResponse {
            data: schedules,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_schedule(
        db: &PgPool,
        id: ClassScheduleId,
    ) -> Result<OfferedCourseClassSchedule, AppError> {
        sqlx::query_as::<_, OfferedCourseClassSchedule>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM offered_course_class_schedules WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Class schedule not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_schedule(db: &PgPool, id: ClassScheduleId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM offered_course_class_schedules WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Class schedule not found")));
        }

        Ok(())
    }
}
