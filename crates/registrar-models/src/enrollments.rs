//! Enrollment DTOs and the temporary enrollment links of a registration window.

use crate::ids::{
    CourseId, OfferedCourseId, OfferedCourseSectionId, SemesterRegistrationId, StudentId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Body of the enroll and withdraw endpoints.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EnrollCourseDto {
    pub offered_course_id: OfferedCourseId,
    pub offered_course_section_id: OfferedCourseSectionId,
}

/// Link between a student and the section they took for an offered course.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentSemesterRegistrationCourse {
    pub semester_registration_id: SemesterRegistrationId,
    pub student_id: StudentId,
    pub offered_course_id: OfferedCourseId,
    pub offered_course_section_id: OfferedCourseSectionId,
    pub created_at: DateTime<Utc>,
}

/// A student's enrollment link with the course it points at.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RegistrationCourseDetails {
    pub offered_course_id: OfferedCourseId,
    pub offered_course_section_id: OfferedCourseSectionId,
    pub section_title: String,
    pub course_id: CourseId,
    pub course_title: String,
    pub course_code: String,
    pub credits: i32,
}
