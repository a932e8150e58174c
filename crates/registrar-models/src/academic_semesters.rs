//! Academic semester rows, as far as the registration workflow reads them.

use crate::ids::AcademicSemesterId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AcademicSemester {
    pub id: AcademicSemesterId,
    /// Semester title (e.g. "Autumn", "Summer", "Fall")
    pub title: String,
    pub year: i32,
    /// Short code (e.g. "01")
    pub code: String,
    /// Whether this is the semester currently in session
    pub is_current: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
