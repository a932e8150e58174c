use crate::ids::{AcademicSemesterId, StudentId, StudentSemesterPaymentId};
use chrono::{DateTime, Utc};
use registrar_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Tuition owed by a student for one academic semester. Amounts are whole
/// currency units.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentSemesterPayment {
    pub id: StudentSemesterPaymentId,
    pub student_id: StudentId,
    pub academic_semester_id: AcademicSemesterId,
    pub full_payment_amount: i64,
    /// Half of the full amount
    pub partial_payment_amount: i64,
    pub total_due_amount: i64,
    pub total_paid_amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct PaymentFilterParams {
    pub student_id: Option<StudentId>,
    pub academic_semester_id: Option<AcademicSemesterId>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedPaymentsResponse {
    pub data: Vec<StudentSemesterPayment>,
    pub meta: PaginationMeta,
}
