use anyhow::anyhow;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::instrument;

use registrar_core::{AppError, PaginationMeta};
use registrar_models::ids::{AcademicSemesterId, CourseId, StudentEnrolledCourseId, StudentId};
use registrar_models::{
    EnrolledCourseStatus, ExamType, MarkFilterParams, PaginatedMarksResponse,
    StudentEnrolledCourse, StudentEnrolledCourseMark, UpdateFinalMarksDto, UpdateMarksDto,
};

use super::grading::{final_mark, grade_of};

pub struct MarkService;

fn apply_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &MarkFilterParams) {
    builder.push(" WHERE TRUE");
    if let Some(student_id) = filters.student_id {
        builder.push(" AND m.student_id = ").push_bind(student_id);
    }
    if let Some(semester_id) = filters.academic_semester_id {
        builder
            .push(" AND m.academic_semester_id = ")
            .push_bind(semester_id);
    }
    if let Some(course_id) = filters.course_id {
        builder.push(" AND e.course_id = ").push_bind(course_id);
    }
}

impl MarkService {
    /// Creates the permanent enrollment record unless it already exists.
    ///
    /// Returns the new id, or `None` when the row was already there.
    #[instrument(skip(tx))]
    pub async fn create_enrolled_course(
        tx: &mut Transaction<'_, Postgres>,
        student_id: StudentId,
        course_id: CourseId,
        semester_id: AcademicSemesterId,
    ) -> Result<Option<StudentEnrolledCourseId>, AppError> {
        let id = sqlx::query_scalar::<_, StudentEnrolledCourseId>(
            r#"INSERT INTO student_enrolled_courses (student_id, course_id, academic_semester_id)
               VALUES ($1, $2, $3)
               ON CONFLICT (student_id, course_id, academic_semester_id) DO NOTHING
               RETURNING id"#,
        )
        .bind(student_id)
        .bind(course_id)
        .bind(semester_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(id)
    }

    /// Inserts the empty MIDTERM and FINAL mark rows of a new enrollment.
    ///
    /// Calling it twice for the same enrollment fails with a conflict.
    #[instrument(skip(tx))]
    pub async fn initialize_default_marks(
        tx: &mut Transaction<'_, Postgres>,
        student_id: StudentId,
        enrolled_course_id: StudentEnrolledCourseId,
        semester_id: AcademicSemesterId,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"INSERT INTO student_enrolled_course_marks
                   (student_id, student_enrolled_course_id, academic_semester_id, exam_type)
               VALUES ($1, $2, $3, $4), ($1, $2, $3, $5)"#,
        )
        .bind(student_id)
        .bind(enrolled_course_id)
        .bind(semester_id)
        .bind(ExamType::Midterm)
        .bind(ExamType::Final)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            if AppError::is_unique_violation(&e) {
                return AppError::conflict(anyhow!(
                    "Marks are already initialized for this enrolled course"
                ));
            }
            AppError::from(e)
        })?;

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn list_marks(
        db: &PgPool,
        filters: MarkFilterParams,
    ) -> Result<PaginatedMarksResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut count = QueryBuilder::<Postgres>::new(
            r#"SELECT COUNT(*) FROM student_enrolled_course_marks m
               JOIN student_enrolled_courses e ON e.id = m.student_enrolled_course_id"#,
        );
        apply_filters(&mut count, &filters);
        let total = count.build_query_scalar::<i64>().fetch_one(db).await?;

        let mut query = QueryBuilder::<Postgres>::new(
            r#"SELECT m.id, m.student_id, m.student_enrolled_course_id, m.academic_semester_id,
                      m.exam_type, m.marks, m.grade, m.point, m.created_at, m.updated_at
               FROM student_enrolled_course_marks m
               JOIN student_enrolled_courses e ON e.id = m.student_enrolled_course_id"#,
        );
        apply_filters(&mut query, &filters);
        query
            .push(" ORDER BY m.created_at DESC, m.exam_type LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let marks = query
            .build_query_as::<StudentEnrolledCourseMark>()
            .fetch_all(db)
            .await?;

        Ok(PaginatedMarksResponse {
            data: marks,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    /// Stores one exam mark together with its grade.
    #[instrument(skip(db))]
    pub async fn update_marks(
        db: &PgPool,
        dto: UpdateMarksDto,
    ) -> Result<StudentEnrolledCourseMark, AppError> {
        if !(0..=100).contains(&dto.marks) {
            return Err(AppError::bad_request(anyhow!(
                "Marks must be between 0 and 100"
            )));
        }

        let grade = grade_of(dto.marks);

        sqlx::query_as::<_, StudentEnrolledCourseMark>(
            r#"UPDATE student_enrolled_course_marks m
               SET marks = $1, grade = $2, point = $3, updated_at = NOW()
               FROM student_enrolled_courses e
               WHERE e.id = m.student_enrolled_course_id
                 AND m.student_id = $4
                 AND m.academic_semester_id = $5
                 AND e.course_id = $6
                 AND m.exam_type = $7
               RETURNING m.id, m.student_id, m.student_enrolled_course_id, m.academic_semester_id,
                         m.exam_type, m.marks, m.grade, m.point, m.created_at, m.updated_at"#,
        )
        .bind(dto.marks)
        .bind(grade.letter)
        .bind(grade.point)
        .bind(dto.student_id)
        .bind(dto.academic_semester_id)
        .bind(dto.course_id)
        .bind(dto.exam_type)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Student enrolled course mark not found")))
    }

    /// Combines the MIDTERM and FINAL marks into the course result and
    /// completes the enrollment.
    #[instrument(skip(db))]
    pub async fn update_final_marks(
        db: &PgPool,
        dto: UpdateFinalMarksDto,
    ) -> Result<StudentEnrolledCourse, AppError> {
        let mut tx = db.begin().await?;

        let enrolled_course_id = sqlx::query_scalar::<_, StudentEnrolledCourseId>(
            r#"SELECT id FROM student_enrolled_courses
               WHERE student_id = $1 AND academic_semester_id = $2 AND course_id = $3
               FOR UPDATE"#,
        )
        .bind(dto.student_id)
        .bind(dto.academic_semester_id)
        .bind(dto.course_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Student enrolled course not found")))?;

        let marks = sqlx::query_as::<_, (ExamType, Option<i32>)>(
            r#"SELECT exam_type, marks FROM student_enrolled_course_marks
               WHERE student_enrolled_course_id = $1"#,
        )
        .bind(enrolled_course_id)
        .fetch_all(&mut *tx)
        .await?;

        let marks_for = |exam_type: ExamType| {
            marks
                .iter()
                .find(|(t, _)| *t == exam_type)
                .and_then(|(_, m)| *m)
        };

        let midterm = marks_for(ExamType::Midterm)
            .ok_or_else(|| AppError::bad_request(anyhow!("Midterm marks have not been entered")))?;
        let final_exam = marks_for(ExamType::Final)
            .ok_or_else(|| AppError::bad_request(anyhow!("Final marks have not been entered")))?;

        let total = final_mark(midterm, final_exam);
        let grade = grade_of(total);

        let enrolled_course = sqlx::query_as::<_, StudentEnrolledCourse>(
            r#"UPDATE student_enrolled_courses
               SET total_marks = $2, grade = $3, point = $4, status = $5, updated_at = NOW()
               WHERE id = $1
               RETURNING id, student_id, course_id, academic_semester_id, total_marks, grade,
                         point, status, created_at, updated_at"#,
        )
        .bind(enrolled_course_id)
        .bind(total)
        .bind(grade.letter)
        .bind(grade.point)
        .bind(EnrolledCourseStatus::Completed)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(enrolled_course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_core::{ErrorKind, PaginationParams};
    use registrar_models::SemesterRegistrationStatus;

    use crate::modules::fixtures;

    struct Enrolled {
        student_id: StudentId,
        course_id: CourseId,
        semester_id: AcademicSemesterId,
        enrolled_course_id: StudentEnrolledCourseId,
    }

    async fn setup(pool: &PgPool) -> Enrolled {
        let semester_id = fixtures::create_semester(pool, true).await;
        let registration_id = fixtures::create_registration(
            pool,
            semester_id,
            SemesterRegistrationStatus::Ended,
            0,
            20,
        )
        .await;
        let offering = fixtures::create_offering(pool, registration_id, 3, 30).await;
        let student = fixtures::create_student(pool).await;

        let mut tx = pool.begin().await.unwrap();
        let enrolled_course_id =
            MarkService::create_enrolled_course(&mut tx, student.id, offering.course_id, semester_id)
                .await
                .unwrap()
                .unwrap();
        MarkService::initialize_default_marks(&mut tx, student.id, enrolled_course_id, semester_id)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        Enrolled {
            student_id: student.id,
            course_id: offering.course_id,
            semester_id,
            enrolled_course_id,
        }
    }

    fn marks_dto(enrolled: &Enrolled, exam_type: ExamType, marks: i32) -> UpdateMarksDto {
        UpdateMarksDto {
            student_id: enrolled.student_id,
            academic_semester_id: enrolled.semester_id,
            course_id: enrolled.course_id,
            exam_type,
            marks,
        }
    }

    fn final_dto(enrolled: &Enrolled) -> UpdateFinalMarksDto {
        UpdateFinalMarksDto {
            student_id: enrolled.student_id,
            academic_semester_id: enrolled.semester_id,
            course_id: enrolled.course_id,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_enrolled_course_is_idempotent(pool: PgPool) {
        let enrolled = setup(&pool).await;

        let mut tx = pool.begin().await.unwrap();
        let again = MarkService::create_enrolled_course(
            &mut tx,
            enrolled.student_id,
            enrolled.course_id,
            enrolled.semester_id,
        )
        .await
        .unwrap();
        assert!(again.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_initialize_default_marks_twice_conflicts(pool: PgPool) {
        let enrolled = setup(&pool).await;

        let mut tx = pool.begin().await.unwrap();
        let err = MarkService::initialize_default_marks(
            &mut tx,
            enrolled.student_id,
            enrolled.enrolled_course_id,
            enrolled.semester_id,
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        drop(tx);

        let filters = MarkFilterParams {
            student_id: Some(enrolled.student_id),
            ..Default::default()
        };
        let marks = MarkService::list_marks(&pool, filters).await.unwrap();
        assert_eq!(marks.meta.total, 2);
        assert!(marks.data.iter().all(|m| m.marks.is_none()));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_marks_stores_grade(pool: PgPool) {
        let enrolled = setup(&pool).await;

        let mark = MarkService::update_marks(&pool, marks_dto(&enrolled, ExamType::Midterm, 73))
            .await
            .unwrap();

        assert_eq!(mark.exam_type, ExamType::Midterm);
        assert_eq!(mark.marks, Some(73));
        assert_eq!(mark.grade.as_deref(), Some("C-"));
        assert_eq!(mark.point, Some(2.0));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_marks_rejects_out_of_range(pool: PgPool) {
        let enrolled = setup(&pool).await;

        let err = MarkService::update_marks(&pool, marks_dto(&enrolled, ExamType::Final, 101))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_marks_unknown_course(pool: PgPool) {
        let enrolled = setup(&pool).await;
        let mut dto = marks_dto(&enrolled, ExamType::Final, 50);
        dto.course_id = CourseId::new();

        let err = MarkService::update_marks(&pool, dto).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_final_marks_requires_both_exams(pool: PgPool) {
        let enrolled = setup(&pool).await;
        MarkService::update_marks(&pool, marks_dto(&enrolled, ExamType::Midterm, 80))
            .await
            .unwrap();

        let err = MarkService::update_final_marks(&pool, final_dto(&enrolled))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(err.to_string(), "Final marks have not been entered");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_final_marks_completes_course(pool: PgPool) {
        let enrolled = setup(&pool).await;
        MarkService::update_marks(&pool, marks_dto(&enrolled, ExamType::Midterm, 80))
            .await
            .unwrap();
        MarkService::update_marks(&pool, marks_dto(&enrolled, ExamType::Final, 90))
            .await
            .unwrap();

        let course = MarkService::update_final_marks(&pool, final_dto(&enrolled))
            .await
            .unwrap();

        assert_eq!(course.id, enrolled.enrolled_course_id);
        assert_eq!(course.total_marks, Some(86));
        assert_eq!(course.grade.as_deref(), Some("B"));
        assert_eq!(course.point, Some(3.0));
        assert_eq!(course.status, EnrolledCourseStatus::Completed);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_final_marks_not_found(pool: PgPool) {
        let enrolled = setup(&pool).await;
        let mut dto = final_dto(&enrolled);
        dto.student_id = StudentId::new();

        let err = MarkService::update_final_marks(&pool, dto)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_marks_filters_by_course(pool: PgPool) {
        let enrolled = setup(&pool).await;

        let filters = MarkFilterParams {
            course_id: Some(enrolled.course_id),
            pagination: PaginationParams {
                limit: Some(1),
                offset: None,
                page: None,
            },
            ..Default::default()
        };
        let page = MarkService::list_marks(&pool, filters).await.unwrap();
        assert_eq!(page.meta.total, 2);
        assert_eq!(page.data.len(), 1);
        assert!(page.meta.has_more);

        let filters = MarkFilterParams {
            course_id: Some(CourseId::new()),
            ..Default::default()
        };
        let empty = MarkService::list_marks(&pool, filters).await.unwrap();
        assert_eq!(empty.meta.total, 0);
    }
}
