//! Semester registration window models and DTOs.
//!
//! A registration window moves strictly forward through
//! `UPCOMING -> ONGOING -> ENDED`. While it is ONGOING, students enroll into
//! offered course sections; once ENDED, the window can be rolled into the
//! next academic semester.

use crate::ids::{
    AcademicSemesterId, SemesterRegistrationId, StudentId, StudentSemesterRegistrationId,
};
use chrono::{DateTime, Utc};
use registrar_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Lifecycle status of a registration window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "semester_registration_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SemesterRegistrationStatus {
    Upcoming,
    Ongoing,
    Ended,
}

impl SemesterRegistrationStatus {
    /// Returns true only for the two forward steps of the lifecycle.
    pub fn can_transition_to(self, next: SemesterRegistrationStatus) -> bool {
        use SemesterRegistrationStatus::*;
        matches!((self, next), (Upcoming, Ongoing) | (Ongoing, Ended))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SemesterRegistrationStatus::Upcoming => "UPCOMING",
            SemesterRegistrationStatus::Ongoing => "ONGOING",
            SemesterRegistrationStatus::Ended => "ENDED",
        }
    }
}

impl fmt::Display for SemesterRegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A semester registration window.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SemesterRegistration {
    /// Unique identifier for the registration window
    pub id: SemesterRegistrationId,
    /// Academic semester the window enrolls students into
    pub academic_semester_id: AcademicSemesterId,
    /// Current lifecycle status
    pub status: SemesterRegistrationStatus,
    /// Minimum credits a student must take to confirm
    pub min_credit: i32,
    /// Maximum credits a student may take to confirm
    pub max_credit: i32,
    /// When the window opens
    pub start_date: DateTime<Utc>,
    /// When the window closes
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Checks the credit bounds and the date window of a registration.
pub fn check_registration_bounds(
    min_credit: i32,
    max_credit: i32,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<(), &'static str> {
    if min_credit < 0 || max_credit < 0 {
        return Err("Credit bounds cannot be negative");
    }
    if min_credit > max_credit {
        return Err("Minimum credit cannot exceed maximum credit");
    }
    if start_date >= end_date {
        return Err("Start date must be before end date");
    }
    Ok(())
}

/// DTO for opening a new registration window.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSemesterRegistrationDto {
    pub academic_semester_id: AcademicSemesterId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[validate(range(min = 0))]
    pub min_credit: i32,
    #[validate(range(min = 0))]
    pub max_credit: i32,
}

/// DTO for updating a registration window. Status changes go through
/// [`UpdateRegistrationStatusDto`] instead.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSemesterRegistrationDto {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[validate(range(min = 0))]
    pub min_credit: Option<i32>,
    #[validate(range(min = 0))]
    pub max_credit: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateRegistrationStatusDto {
    pub status: SemesterRegistrationStatus,
}

/// Query parameters for filtering registration windows.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct SemesterRegistrationFilterParams {
    /// Filter by academic semester
    pub academic_semester_id: Option<AcademicSemesterId>,
    /// Filter by status
    pub status: Option<SemesterRegistrationStatus>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedSemesterRegistrationsResponse {
    pub data: Vec<SemesterRegistration>,
    pub meta: PaginationMeta,
}

/// A student's participation in a registration window.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentSemesterRegistration {
    pub id: StudentSemesterRegistrationId,
    pub student_id: StudentId,
    pub semester_registration_id: SemesterRegistrationId,
    /// Sum of the credits of every enrolled offered course
    pub total_credits_taken: i32,
    /// Set once the student confirms within the credit bounds
    pub is_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The caller's view of the ongoing registration window.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MyRegistrationResponse {
    pub semester_registration: Option<SemesterRegistration>,
    pub student_semester_registration: Option<StudentSemesterRegistration>,
}
