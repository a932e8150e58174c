use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::instrument;

use registrar_core::{AppError, PaginationMeta};
use registrar_models::ids::{AcademicSemesterId, StudentId};
use registrar_models::{PaginatedPaymentsResponse, PaymentFilterParams, StudentSemesterPayment};

/// Tuition charged per credit taken, in whole currency units.
pub const TUITION_PER_CREDIT: i64 = 5000;

pub struct PaymentService;

fn apply_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &PaymentFilterParams) {
    builder.push(" WHERE TRUE");
    if let Some(student_id) = filters.student_id {
        builder.push(" AND student_id = ").push_bind(student_id);
    }
    if let Some(semester_id) = filters.academic_semester_id {
        builder
            .push(" AND academic_semester_id = ")
            .push_bind(semester_id);
    }
}

impl PaymentService {
    /// Records the tuition a student owes for a semester.
    ///
    /// Half of the amount is offered as the partial payment. Returns `false`
    /// when a payment row for this student and semester already exists.
    #[instrument(skip(tx))]
    pub async fn record_payment(
        tx: &mut Transaction<'_, Postgres>,
        student_id: StudentId,
        semester_id: AcademicSemesterId,
        amount: i64,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"INSERT INTO student_semester_payments
                   (student_id, academic_semester_id, full_payment_amount,
                    partial_payment_amount, total_due_amount, total_paid_amount)
               VALUES ($1, $2, $3, $4, $3, 0)
               ON CONFLICT (student_id, academic_semester_id) DO NOTHING"#,
        )
        .bind(student_id)
        .bind(semester_id)
        .bind(amount)
        .bind(amount / 2)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(db))]
    pub async fn list_payments(
        db: &PgPool,
        filters: PaymentFilterParams,
    ) -> Result<PaginatedPaymentsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM student_semester_payments");
        apply_filters(&mut count, &filters);
        let total = count.build_query_scalar::<i64>().fetch_one(db).await?;

        let mut query = QueryBuilder::<Postgres>::new(
            r#"SELECT id, student_id, academic_semester_id, full_payment_amount,
                      partial_payment_amount, total_due_amount, total_paid_amount,
                      created_at, updated_at
               FROM student_semester_payments"#,
        );
        apply_filters(&mut query, &filters);
        query
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let payments = query
            .build_query_as::<StudentSemesterPayment>()
            .fetch_all(db)
            .await?;

        Ok(PaginatedPaymentsResponse {
            data: payments,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }
}
