use anyhow::anyhow;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{info, instrument};

use registrar_core::AppError;
use registrar_models::ids::{OfferedCourseSectionId, UserId};
use registrar_models::{
    EnrollCourseDto, MessageResponse, OfferedCourseWithCredits, SemesterRegistration,
    StudentSemesterRegistration, StudentSemesterRegistrationCourse,
};

use crate::metrics;
use crate::modules::offered_courses::service::OfferedCourseService;
use crate::modules::semester_registrations::service::{
    STUDENT_REGISTRATION_COLUMNS, SemesterRegistrationService,
};
use crate::modules::students::service::StudentService;

pub struct EnrollmentService;

/// Resolves the offered course and section named by `dto` and checks that
/// both belong to `registration`.
async fn resolve_offering(
    tx: &mut Transaction<'_, Postgres>,
    registration: &SemesterRegistration,
    dto: &EnrollCourseDto,
) -> Result<OfferedCourseWithCredits, AppError> {
    let offered_course =
        OfferedCourseService::get_with_credits(&mut **tx, dto.offered_course_id).await?;
    let section =
        OfferedCourseService::get_section(&mut **tx, dto.offered_course_section_id).await?;

    if section.offered_course_id != offered_course.id {
        return Err(AppError::bad_request(anyhow!(
            "Section does not belong to the offered course"
        )));
    }
    if offered_course.semester_registration_id != registration.id {
        return Err(AppError::bad_request(anyhow!(
            "Offered course is not part of the ongoing registration"
        )));
    }

    Ok(offered_course)
}

impl EnrollmentService {
    /// Enrolls the student into a section of an offered course.
    ///
    /// The link insert, the seat increment and the credit increment commit
    /// together; a full section or a student who never started the
    /// registration leaves nothing behind. Any change to the credits clears a
    /// previous confirmation.
    #[instrument(skip(db))]
    pub async fn enroll(
        db: &PgPool,
        user_id: UserId,
        dto: EnrollCourseDto,
    ) -> Result<StudentSemesterRegistrationCourse, AppError> {
        let mut tx = db.begin().await?;

        let student = StudentService::get_by_user_id(&mut *tx, user_id).await?;
        let registration = SemesterRegistrationService::lock_ongoing(&mut tx).await?;
        let offered_course = resolve_offering(&mut tx, &registration, &dto).await?;

        let link = sqlx::query_as::<_, StudentSemesterRegistrationCourse>(
            r#"INSERT INTO student_semester_registration_courses
                   (semester_registration_id, student_id, offered_course_id, offered_course_section_id)
               VALUES ($1, $2, $3, $4)
               RETURNING semester_registration_id, student_id, offered_course_id,
                         offered_course_section_id, created_at"#,
        )
        .bind(registration.id)
        .bind(student.id)
        .bind(offered_course.id)
        .bind(dto.offered_course_section_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if AppError::is_unique_violation(&e) {
                return AppError::conflict(anyhow!("Student is already enrolled in this course"));
            }
            AppError::from(e)
        })?;

        let seat = sqlx::query(
            r#"UPDATE offered_course_sections
               SET currently_enrolled_student = currently_enrolled_student + 1, updated_at = NOW()
               WHERE id = $1 AND currently_enrolled_student < max_capacity"#,
        )
        .bind(dto.offered_course_section_id)
        .execute(&mut *tx)
        .await?;

        if seat.rows_affected() == 0 {
            return Err(AppError::capacity_exceeded(anyhow!(
                "Maximum capacity exceeded"
            )));
        }

        let credits = sqlx::query(
            r#"UPDATE student_semester_registrations
               SET total_credits_taken = total_credits_taken + $3, is_confirmed = FALSE,
                   updated_at = NOW()
               WHERE student_id = $1 AND semester_registration_id = $2"#,
        )
        .bind(student.id)
        .bind(registration.id)
        .bind(offered_course.credits)
        .execute(&mut *tx)
        .await?;

        if credits.rows_affected() == 0 {
            return Err(AppError::bad_request(anyhow!(
                "Student semester registration not recognized"
            )));
        }

        tx.commit().await?;

        info!(
            student_id = %student.id,
            offered_course_id = %offered_course.id,
            section_id = %dto.offered_course_section_id,
            "Student enrolled into course"
        );
        metrics::track_enrollment();

        Ok(link)
    }

    /// Removes the student from an offered course and gives back the seat and
    /// the credits.
    ///
    /// Counters are never clamped: a decrement that would go below zero
    /// rejects the whole withdrawal.
    #[instrument(skip(db))]
    pub async fn withdraw(
        db: &PgPool,
        user_id: UserId,
        dto: EnrollCourseDto,
    ) -> Result<MessageResponse, AppError> {
        let mut tx = db.begin().await?;

        let student = StudentService::get_by_user_id(&mut *tx, user_id).await?;
        let registration = SemesterRegistrationService::lock_ongoing(&mut tx).await?;
        let offered_course = resolve_offering(&mut tx, &registration, &dto).await?;

        let section_id = sqlx::query_scalar::<_, OfferedCourseSectionId>(
            r#"DELETE FROM student_semester_registration_courses
               WHERE semester_registration_id = $1 AND student_id = $2 AND offered_course_id = $3
               RETURNING offered_course_section_id"#,
        )
        .bind(registration.id)
        .bind(student.id)
        .bind(offered_course.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Student is not enrolled in this course")))?;

        if section_id != dto.offered_course_section_id {
            return Err(AppError::bad_request(anyhow!(
                "Student is enrolled in a different section of this course"
            )));
        }

        let seat = sqlx::query(
            r#"UPDATE offered_course_sections
               SET currently_enrolled_student = currently_enrolled_student - 1, updated_at = NOW()
               WHERE id = $1 AND currently_enrolled_student > 0"#,
        )
        .bind(section_id)
        .execute(&mut *tx)
        .await?;

        if seat.rows_affected() == 0 {
            return Err(AppError::invalid_state(anyhow!(
                "Section enrollment count is already zero"
            )));
        }

        let credits = sqlx::query(
            r#"UPDATE student_semester_registrations
               SET total_credits_taken = total_credits_taken - $3, is_confirmed = FALSE,
                   updated_at = NOW()
               WHERE student_id = $1 AND semester_registration_id = $2
                 AND total_credits_taken >= $3"#,
        )
        .bind(student.id)
        .bind(registration.id)
        .bind(offered_course.credits)
        .execute(&mut *tx)
        .await?;

        if credits.rows_affected() == 0 {
            return Err(AppError::invalid_state(anyhow!(
                "Student has fewer credits than the course carries"
            )));
        }

        tx.commit().await?;

        info!(
            student_id = %student.id,
            offered_course_id = %offered_course.id,
            "Student withdrew from course"
        );
        metrics::track_withdrawal();

        Ok(MessageResponse::new("Successfully withdrawn from course"))
    }

    /// Confirms the student's registration once their credits fall within
    /// the window's bounds.
    #[instrument(skip(db))]
    pub async fn confirm(
        db: &PgPool,
        user_id: UserId,
    ) -> Result<StudentSemesterRegistration, AppError> {
        let mut tx = db.begin().await?;

        let student = StudentService::get_by_user_id(&mut *tx, user_id).await?;
        let registration = SemesterRegistrationService::lock_ongoing(&mut tx).await?;

        let student_registration = sqlx::query_as::<_, StudentSemesterRegistration>(&format!(
            r#"SELECT {STUDENT_REGISTRATION_COLUMNS} FROM student_semester_registrations
               WHERE student_id = $1 AND semester_registration_id = $2
               FOR UPDATE"#
        ))
        .bind(student.id)
        .bind(registration.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::bad_request(anyhow!("Student semester registration not recognized"))
        })?;

        let credits = student_registration.total_credits_taken;
        if credits == 0 {
            return Err(AppError::bad_request(anyhow!(
                "You are not enrolled in any course"
            )));
        }
        if credits < registration.min_credit || credits > registration.max_credit {
            return Err(AppError::bad_request(anyhow!(
                "You can only take {} to {} credits",
                registration.min_credit,
                registration.max_credit
            )));
        }

        let confirmed = sqlx::query_as::<_, StudentSemesterRegistration>(&format!(
            r#"UPDATE student_semester_registrations
               SET is_confirmed = TRUE, updated_at = NOW()
               WHERE id = $1
               RETURNING {STUDENT_REGISTRATION_COLUMNS}"#
        ))
        .bind(student_registration.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        metrics::track_registration_confirmed();

        Ok(confirmed)
    }
}
