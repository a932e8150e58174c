use crate::ids::{StudentId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Student profile, resolved from the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: StudentId,
    pub user_id: UserId,
    /// Institutional student number
    pub student_code: String,
    pub first_name: String,
    pub last_name: String,
}
