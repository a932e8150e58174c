use anyhow::anyhow;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::{info, instrument};

use registrar_core::{AppError, PaginationMeta};
use registrar_models::ids::{SemesterRegistrationId, UserId};
use registrar_models::{
    CreateSemesterRegistrationDto, MyRegistrationResponse, PaginatedSemesterRegistrationsResponse,
    RegistrationCourseDetails, SemesterRegistration, SemesterRegistrationFilterParams,
    SemesterRegistrationStatus, StudentSemesterRegistration, UpdateSemesterRegistrationDto,
    check_registration_bounds,
};

use crate::modules::academic_semesters::service::AcademicSemesterService;
use crate::modules::students::service::StudentService;

pub(crate) const REGISTRATION_COLUMNS: &str = r#"id, academic_semester_id, status, min_credit,
    max_credit, start_date, end_date, created_at, updated_at"#;

pub(crate) const STUDENT_REGISTRATION_COLUMNS: &str = r#"id, student_id, semester_registration_id,
    total_credits_taken, is_confirmed, created_at, updated_at"#;

pub struct SemesterRegistrationService;

fn apply_filters(
    builder: &mut QueryBuilder<'_, Postgres>,
    filters: &SemesterRegistrationFilterParams,
) {
    builder.push(" WHERE TRUE");
    if let Some(semester_id) = filters.academic_semester_id {
        builder
            .push(" AND academic_semester_id = ")
            .push_bind(semester_id);
    }
    if let Some(status) = filters.status {
        builder.push(" AND status = ").push_bind(status);
    }
}

impl SemesterRegistrationService {
    /// Opens a new UPCOMING registration window.
    ///
    /// Only one window may be UPCOMING or ONGOING at a time; the partial
    /// unique index on open windows settles concurrent creates.
    #[instrument(skip(db))]
    pub async fn create_registration(
        db: &PgPool,
        dto: CreateSemesterRegistrationDto,
    ) -> Result<SemesterRegistration, AppError> {
        check_registration_bounds(dto.min_credit, dto.max_credit, dto.start_date, dto.end_date)
            .map_err(|msg| AppError::bad_request(anyhow!(msg)))?;

        if !AcademicSemesterService::exists(db, dto.academic_semester_id).await? {
            return Err(AppError::not_found(anyhow!("Academic semester not found")));
        }

        if let Some(open) = Self::find_open(db).await? {
            return Err(AppError::conflict(anyhow!(
                "There is already an {} registration",
                open.status
            )));
        }

        let registration = sqlx::query_as::<_, SemesterRegistration>(&format!(
            r#"INSERT INTO semester_registrations
                   (academic_semester_id, status, min_credit, max_credit, start_date, end_date)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {REGISTRATION_COLUMNS}"#
        ))
        .bind(dto.academic_semester_id)
        .bind(SemesterRegistrationStatus::Upcoming)
        .bind(dto.min_credit)
        .bind(dto.max_credit)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if AppError::is_unique_violation(&e) {
                return AppError::conflict(anyhow!("There is already an open registration"));
            }
            if AppError::is_foreign_key_violation(&e) {
                return AppError::not_found(anyhow!("Academic semester not found"));
            }
            AppError::from(e)
        })?;

        info!(registration_id = %registration.id, "Semester registration created");

        Ok(registration)
    }

    #[instrument(skip(db))]
    pub async fn list_registrations(
        db: &PgPool,
        filters: SemesterRegistrationFilterParams,
    ) -> Result<PaginatedSemesterRegistrationsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM semester_registrations");
        apply_filters(&mut count, &filters);
        let total = count.build_query_scalar::<i64>().fetch_one(db).await?;

        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {REGISTRATION_COLUMNS} FROM semester_registrations"
        ));
        apply_filters(&mut query, &filters);
        query
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let registrations = query
            .build_query_as::<SemesterRegistration>()
            .fetch_all(db)
            .await?;

        Ok(PaginatedSemesterRegistrationsResponse {
            data: registrations,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_registration(
        db: &PgPool,
        id: SemesterRegistrationId,
    ) -> Result<SemesterRegistration, AppError> {
        sqlx::query_as::<_, SemesterRegistration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM semester_registrations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Semester registration not found")))
    }

    /// Changes the window or the credit bounds of a registration that has not
    /// ended yet.
    #[instrument(skip(db))]
    pub async fn update_registration(
        db: &PgPool,
        id: SemesterRegistrationId,
        dto: UpdateSemesterRegistrationDto,
    ) -> Result<SemesterRegistration, AppError> {
        let mut tx = db.begin().await?;

        let current = Self::lock_registration(&mut tx, id).await?;

        if current.status == SemesterRegistrationStatus::Ended {
            return Err(AppError::invalid_state(anyhow!(
                "An ended registration cannot be updated"
            )));
        }

        let min_credit = dto.min_credit.unwrap_or(current.min_credit);
        let max_credit = dto.max_credit.unwrap_or(current.max_credit);
        let start_date = dto.start_date.unwrap_or(current.start_date);
        let end_date = dto.end_date.unwrap_or(current.end_date);

        check_registration_bounds(min_credit, max_credit, start_date, end_date)
            .map_err(|msg| AppError::bad_request(anyhow!(msg)))?;

        let registration = sqlx::query_as::<_, SemesterRegistration>(&format!(
            r#"UPDATE semester_registrations
               SET min_credit = $2, max_credit = $3, start_date = $4, end_date = $5,
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {REGISTRATION_COLUMNS}"#
        ))
        .bind(id)
        .bind(min_credit)
        .bind(max_credit)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&mut *tx)
        .await?;

        // Confirmations that no longer fit the bounds must be made again.
        let unconfirmed = sqlx::query(
            r#"UPDATE student_semester_registrations
               SET is_confirmed = FALSE, updated_at = NOW()
               WHERE semester_registration_id = $1 AND is_confirmed
                 AND (total_credits_taken < $2 OR total_credits_taken > $3)"#,
        )
        .bind(id)
        .bind(min_credit)
        .bind(max_credit)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        if unconfirmed > 0 {
            info!(
                registration_id = %id,
                unconfirmed,
                "Cleared confirmations outside the new credit bounds"
            );
        }

        Ok(registration)
    }

    /// Moves a registration one step forward: UPCOMING to ONGOING, or
    /// ONGOING to ENDED.
    #[instrument(skip(db))]
    pub async fn advance_status(
        db: &PgPool,
        id: SemesterRegistrationId,
        next: SemesterRegistrationStatus,
    ) -> Result<SemesterRegistration, AppError> {
        let mut tx = db.begin().await?;

        let current = Self::lock_registration(&mut tx, id).await?;

        if !current.status.can_transition_to(next) {
            return Err(AppError::invalid_transition(anyhow!(
                "Cannot move a registration from {} to {}",
                current.status,
                next
            )));
        }

        let registration = sqlx::query_as::<_, SemesterRegistration>(&format!(
            r#"UPDATE semester_registrations SET status = $2, updated_at = NOW()
               WHERE id = $1
               RETURNING {REGISTRATION_COLUMNS}"#
        ))
        .bind(id)
        .bind(next)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            registration_id = %id,
            from = %current.status,
            to = %next,
            "Semester registration status changed"
        );

        Ok(registration)
    }

    /// Deletes a registration that has not started yet.
    #[instrument(skip(db))]
    pub async fn delete_registration(
        db: &PgPool,
        id: SemesterRegistrationId,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let current = Self::lock_registration(&mut tx, id).await?;

        if current.status != SemesterRegistrationStatus::Upcoming {
            return Err(AppError::invalid_state(anyhow!(
                "Only an UPCOMING registration can be deleted"
            )));
        }

        sqlx::query("DELETE FROM semester_registrations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if AppError::is_foreign_key_violation(&e) {
                    return AppError::conflict(anyhow!(
                        "Semester registration still has offered courses or students"
                    ));
                }
                AppError::from(e)
            })?;

        tx.commit().await?;

        Ok(())
    }

    /// Joins the student to the ongoing registration, or returns their
    /// existing participation.
    #[instrument(skip(db))]
    pub async fn start_my_registration(
        db: &PgPool,
        user_id: UserId,
    ) -> Result<StudentSemesterRegistration, AppError> {
        let student = StudentService::get_by_user_id(db, user_id).await?;

        let registration = Self::find_open(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("There is no open semester registration")))?;

        if registration.status == SemesterRegistrationStatus::Upcoming {
            return Err(AppError::invalid_state(anyhow!(
                "Registration is not started yet"
            )));
        }

        sqlx::query(
            r#"INSERT INTO student_semester_registrations (student_id, semester_registration_id)
               VALUES ($1, $2)
               ON CONFLICT (student_id, semester_registration_id) DO NOTHING"#,
        )
        .bind(student.id)
        .bind(registration.id)
        .execute(db)
        .await?;

        let student_registration = sqlx::query_as::<_, StudentSemesterRegistration>(&format!(
            r#"SELECT {STUDENT_REGISTRATION_COLUMNS} FROM student_semester_registrations
               WHERE student_id = $1 AND semester_registration_id = $2"#
        ))
        .bind(student.id)
        .bind(registration.id)
        .fetch_one(db)
        .await?;

        Ok(student_registration)
    }

    /// The ongoing registration, if any, and the caller's participation in it.
    #[instrument(skip(db))]
    pub async fn get_my_registration(
        db: &PgPool,
        user_id: UserId,
    ) -> Result<MyRegistrationResponse, AppError> {
        let student = StudentService::get_by_user_id(db, user_id).await?;

        let Some(registration) = Self::find_ongoing(db).await? else {
            return Ok(MyRegistrationResponse {
                semester_registration: None,
                student_semester_registration: None,
            });
        };

        let student_registration = sqlx::query_as::<_, StudentSemesterRegistration>(&format!(
            r#"SELECT {STUDENT_REGISTRATION_COLUMNS} FROM student_semester_registrations
               WHERE student_id = $1 AND semester_registration_id = $2"#
        ))
        .bind(student.id)
        .bind(registration.id)
        .fetch_optional(db)
        .await?;

        Ok(MyRegistrationResponse {
            semester_registration: Some(registration),
            student_semester_registration: student_registration,
        })
    }

    /// The caller's enrollment links in the ongoing registration.
    #[instrument(skip(db))]
    pub async fn get_my_registration_courses(
        db: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<RegistrationCourseDetails>, AppError> {
        let student = StudentService::get_by_user_id(db, user_id).await?;

        let registration = Self::find_ongoing(db).await?.ok_or_else(|| {
            AppError::not_found(anyhow!("There is no ongoing semester registration"))
        })?;

        let courses = sqlx::query_as::<_, RegistrationCourseDetails>(
            r#"SELECT l.offered_course_id, l.offered_course_section_id, s.title AS section_title,
                      c.id AS course_id, c.title AS course_title, c.code AS course_code, c.credits
               FROM student_semester_registration_courses l
               JOIN offered_course_sections s ON s.id = l.offered_course_section_id
               JOIN offered_courses oc ON oc.id = l.offered_course_id
               JOIN courses c ON c.id = oc.course_id
               WHERE l.student_id = $1 AND l.semester_registration_id = $2
               ORDER BY c.code"#,
        )
        .bind(student.id)
        .bind(registration.id)
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    /// Share-locks the ONGOING registration for the rest of `tx`, so it
    /// cannot be moved to ENDED while an enrollment is in flight.
    #[instrument(skip(tx))]
    pub async fn lock_ongoing(
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<SemesterRegistration, AppError> {
        sqlx::query_as::<_, SemesterRegistration>(&format!(
            r#"SELECT {REGISTRATION_COLUMNS} FROM semester_registrations
               WHERE status = $1
               FOR SHARE"#
        ))
        .bind(SemesterRegistrationStatus::Ongoing)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("There is no ongoing semester registration")))
    }

    async fn lock_registration(
        tx: &mut Transaction<'_, Postgres>,
        id: SemesterRegistrationId,
    ) -> Result<SemesterRegistration, AppError> {
        sqlx::query_as::<_, SemesterRegistration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM semester_registrations WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Semester registration not found")))
    }

    async fn find_open(db: &PgPool) -> Result<Option<SemesterRegistration>, AppError> {
        let registration = sqlx::query_as::<_, SemesterRegistration>(&format!(
            r#"SELECT {REGISTRATION_COLUMNS} FROM semester_registrations
               WHERE status IN ($1, $2)
               ORDER BY created_at DESC
               LIMIT 1"#
        ))
        .bind(SemesterRegistrationStatus::Upcoming)
        .bind(SemesterRegistrationStatus::Ongoing)
        .fetch_optional(db)
        .await?;

        Ok(registration)
    }

    async fn find_ongoing(db: &PgPool) -> Result<Option<SemesterRegistration>, AppError> {
        let registration = sqlx::query_as::<_, SemesterRegistration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM semester_registrations WHERE status = $1"
        ))
        .bind(SemesterRegistrationStatus::Ongoing)
        .fetch_optional(db)
        .await?;

        Ok(registration)
    }
}
