//! Permanent enrollment records and their exam marks.
//!
//! Rows are created by the semester rollover; marks entry only fills in the
//! values.

use crate::ids::{
    AcademicSemesterId, CourseId, StudentEnrolledCourseId, StudentEnrolledCourseMarkId, StudentId,
};
use chrono::{DateTime, Utc};
use registrar_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "exam_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExamType {
    Midterm,
    Final,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "enrolled_course_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrolledCourseStatus {
    #[default]
    Ongoing,
    Completed,
    Withdrawn,
}

/// A course a student took in an academic semester.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentEnrolledCourse {
    pub id: StudentEnrolledCourseId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub academic_semester_id: AcademicSemesterId,
    /// Combined result, set once the final marks are computed
    pub total_marks: Option<i32>,
    pub grade: Option<String>,
    pub point: Option<f64>,
    pub status: EnrolledCourseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentEnrolledCourseMark {
    pub id: StudentEnrolledCourseMarkId,
    pub student_id: StudentId,
    pub student_enrolled_course_id: StudentEnrolledCourseId,
    pub academic_semester_id: AcademicSemesterId,
    pub exam_type: ExamType,
    /// Raw score in [0, 100]; null until entered
    pub marks: Option<i32>,
    pub grade: Option<String>,
    pub point: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for entering one exam mark.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateMarksDto {
    pub student_id: StudentId,
    pub academic_semester_id: AcademicSemesterId,
    pub course_id: CourseId,
    pub exam_type: ExamType,
    /// Score in [0, 100]
    #[validate(range(min = 0, max = 100))]
    pub marks: i32,
}

/// DTO for computing a course's final result from its MIDTERM and FINAL marks.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateFinalMarksDto {
    pub student_id: StudentId,
    pub academic_semester_id: AcademicSemesterId,
    pub course_id: CourseId,
}

/// Query parameters for filtering marks.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct MarkFilterParams {
    pub student_id: Option<StudentId>,
    pub academic_semester_id: Option<AcademicSemesterId>,
    /// Filter by the catalog course of the enrolled course
    pub course_id: Option<CourseId>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedMarksResponse {
    pub data: Vec<StudentEnrolledCourseMark>,
    pub meta: PaginationMeta,
}
