use std::collections::HashMap;

use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};

use registrar_core::AppError;
use registrar_models::ids::{AcademicSemesterId, CourseId, SemesterRegistrationId, StudentId};
use registrar_models::{MessageResponse, SemesterRegistrationStatus};

use crate::metrics;
use crate::modules::academic_semesters::service::AcademicSemesterService;
use crate::modules::marks::service::MarkService;
use crate::modules::payments::service::{PaymentService, TUITION_PER_CREDIT};

pub struct SemesterRolloverService;

impl SemesterRolloverService {
    /// Turns the confirmed enrollments of an ended registration into
    /// permanent records for its academic semester.
    ///
    /// The semester becomes current, every confirmed student is charged for
    /// the credits they took, and each enrolled course gets a
    /// `StudentEnrolledCourse` with empty MIDTERM and FINAL marks. All of it
    /// commits together. The registration row is locked for the whole
    /// transaction, and a semester that is already current is rejected, so a
    /// second run is refused rather than repeated.
    #[instrument(skip(db))]
    pub async fn start_new_semester(
        db: &PgPool,
        id: SemesterRegistrationId,
    ) -> Result<MessageResponse, AppError> {
        let mut tx = db.begin().await?;

        let (status, semester_id, is_current) =
            sqlx::query_as::<_, (SemesterRegistrationStatus, AcademicSemesterId, bool)>(
                r#"SELECT sr.status, sr.academic_semester_id, s.is_current
                   FROM semester_registrations sr
                   JOIN academic_semesters s ON s.id = sr.academic_semester_id
                   WHERE sr.id = $1
                   FOR UPDATE OF sr"#,
            )
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Semester registration not found")))?;

        if status != SemesterRegistrationStatus::Ended {
            return Err(AppError::bad_request(anyhow!(
                "Semester registration has not ended yet"
            )));
        }
        if is_current {
            return Err(AppError::bad_request(anyhow!("Semester has already started")));
        }

        AcademicSemesterService::set_current(&mut tx, semester_id).await?;

        let confirmed = sqlx::query_as::<_, (StudentId, i32)>(
            r#"SELECT student_id, total_credits_taken FROM student_semester_registrations
               WHERE semester_registration_id = $1 AND is_confirmed
               ORDER BY student_id"#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let student_ids: Vec<StudentId> = confirmed
            .iter()
            .map(|(student_id, _)| *student_id)
            .collect();

        let links = sqlx::query_as::<_, (StudentId, CourseId)>(
            r#"SELECT l.student_id, oc.course_id
               FROM student_semester_registration_courses l
               JOIN offered_courses oc ON oc.id = l.offered_course_id
               WHERE l.semester_registration_id = $1 AND l.student_id = ANY($2)"#,
        )
        .bind(id)
        .bind(&student_ids)
        .fetch_all(&mut *tx)
        .await?;

        let mut courses_by_student: HashMap<StudentId, Vec<CourseId>> = HashMap::new();
        for (student_id, course_id) in links {
            courses_by_student.entry(student_id).or_default().push(course_id);
        }

        let mut enrolled_courses = 0;
        for (student_id, total_credits_taken) in &confirmed {
            if *total_credits_taken > 0 {
                let amount = i64::from(*total_credits_taken) * TUITION_PER_CREDIT;
                PaymentService::record_payment(&mut tx, *student_id, semester_id, amount).await?;
            }

            let Some(course_ids) = courses_by_student.get(student_id) else {
                continue;
            };

            for course_id in course_ids {
                let created =
                    MarkService::create_enrolled_course(&mut tx, *student_id, *course_id, semester_id)
                        .await?;

                if let Some(enrolled_course_id) = created {
                    MarkService::initialize_default_marks(
                        &mut tx,
                        *student_id,
                        enrolled_course_id,
                        semester_id,
                    )
                    .await?;
                    enrolled_courses += 1;
                }
            }
        }

        tx.commit().await?;

        info!(
            registration_id = %id,
            academic_semester_id = %semester_id,
            students = confirmed.len(),
            enrolled_courses,
            "Semester started"
        );
        metrics::track_semester_rollover(confirmed.len(), enrolled_courses);

        Ok(MessageResponse::new("Semester started successfully"))
    }
}
