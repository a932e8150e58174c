use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use registrar_core::AppError;
use registrar_models::AcademicSemester;
use registrar_models::ids::AcademicSemesterId;

pub struct AcademicSemesterService;

impl AcademicSemesterService {
    #[instrument(skip(db))]
    pub async fn get_current(db: &PgPool) -> Result<Option<AcademicSemester>, AppError> {
        let semester = sqlx::query_as::<_, AcademicSemester>(
            r#"SELECT id, title, year, code, is_current, created_at, updated_at
               FROM academic_semesters WHERE is_current"#,
        )
        .fetch_optional(db)
        .await?;

        Ok(semester)
    }

    #[instrument(skip(db))]
    pub async fn exists(db: &PgPool, id: AcademicSemesterId) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM academic_semesters WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(db)
        .await?;

        Ok(exists)
    }

    /// Makes `id` the only current semester.
    ///
    /// The flag is cleared everywhere first so the partial unique index on
    /// `is_current` never sees two rows.
    #[instrument(skip(tx))]
    pub async fn set_current(
        tx: &mut Transaction<'_, Postgres>,
        id: AcademicSemesterId,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE academic_semesters SET is_current = FALSE, updated_at = NOW() WHERE is_current",
        )
        .execute(&mut **tx)
        .await?;

        let updated = sqlx::query(
            "UPDATE academic_semesters SET is_current = TRUE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&mut **tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Academic semester not found"
            )));
        }

        Ok(())
    }
}
