use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use registrar_core::AppError;
use registrar_models::{PaginatedPaymentsResponse, PaymentFilterParams};

use crate::middleware::auth::RequirePaymentsRead;
use crate::modules::payments::service::PaymentService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/student-semester-payments",
    params(PaymentFilterParams),
    responses(
        (status = 200, description = "List of semester payments", body = PaginatedPaymentsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires payments:read permission")
    ),
    tag = "Payments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_payments(
    State(state): State<AppState>,
    RequirePaymentsRead(_auth_user): RequirePaymentsRead,
    Query(filters): Query<PaymentFilterParams>,
) -> Result<Json<PaginatedPaymentsResponse>, AppError> {
    let payments = PaymentService::list_payments(&state.db, filters).await?;

    Ok(Json(payments))
}
