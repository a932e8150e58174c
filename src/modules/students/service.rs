use sqlx::PgExecutor;
use tracing::instrument;

use registrar_core::AppError;
use registrar_models::Student;
use registrar_models::ids::UserId;

pub struct StudentService;

impl StudentService {
    /// Resolves the student profile owned by an authenticated user.
    #[instrument(skip(executor))]
    pub async fn get_by_user_id<'e, E>(executor: E, user_id: UserId) -> Result<Student, AppError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Student>(
            r#"SELECT id, user_id, student_code, first_name, last_name
               FROM students WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }
}
