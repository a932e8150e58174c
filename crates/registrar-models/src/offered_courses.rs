//! Offered courses and their sections.
//!
//! Both are maintained by the course catalog; the registration workflow only
//! reads them and owns the section's `currently_enrolled_student` counter.

use crate::ids::{
    AcademicDepartmentId, CourseId, OfferedCourseId, OfferedCourseSectionId,
    SemesterRegistrationId,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// An offered course joined with the credit value of its catalog course.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OfferedCourseWithCredits {
    pub id: OfferedCourseId,
    pub course_id: CourseId,
    pub academic_department_id: AcademicDepartmentId,
    pub semester_registration_id: SemesterRegistrationId,
    pub credits: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OfferedCourseSection {
    pub id: OfferedCourseSectionId,
    pub title: String,
    pub offered_course_id: OfferedCourseId,
    pub max_capacity: i32,
    /// Seats taken; never below zero nor above `max_capacity`
    pub currently_enrolled_student: i32,
}
