use sqlx::PgExecutor;
use tracing::instrument;

use registrar_core::AppError;
use registrar_models::ids::{OfferedCourseId, OfferedCourseSectionId};
use registrar_models::{OfferedCourseSection, OfferedCourseWithCredits};

pub struct OfferedCourseService;

impl OfferedCourseService {
    #[instrument(skip(executor))]
    pub async fn get_with_credits<'e, E>(
        executor: E,
        id: OfferedCourseId,
    ) -> Result<OfferedCourseWithCredits, AppError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, OfferedCourseWithCredits>(
            r#"SELECT oc.id, oc.course_id, oc.academic_department_id, oc.semester_registration_id, c.credits
               FROM offered_courses oc
               JOIN courses c ON c.id = oc.course_id
               WHERE oc.id = $1"#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Offered course not found")))
    }

    #[instrument(skip(executor))]
    pub async fn get_section<'e, E>(
        executor: E,
        id: OfferedCourseSectionId,
    ) -> Result<OfferedCourseSection, AppError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, OfferedCourseSection>(
            r#"SELECT id, title, offered_course_id, max_capacity, currently_enrolled_student
               FROM offered_course_sections WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Offered course section not found")))
    }
}
