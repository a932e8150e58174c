//! # Registrar Models
//!
//! Database entities, request/response DTOs and filter parameters for the
//! Registrar API.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed UUID newtypes
//! - [`academic_semesters`]: Academic semester rows
//! - [`semester_registrations`]: Registration windows and student participation
//! - [`enrollments`]: Enroll/withdraw DTOs and enrollment links
//! - [`offered_courses`]: Offered courses and sections
//! - [`class_schedules`]: Weekly class schedules
//! - [`marks`]: Permanent enrollment records and exam marks
//! - [`payments`]: Semester payments
//! - [`students`]: Student profiles

pub mod academic_semesters;
pub mod class_schedules;
pub mod enrollments;
pub mod ids;
pub mod marks;
pub mod offered_courses;
pub mod payments;
pub mod semester_registrations;
pub mod students;

use serde::Serialize;
use utoipa::ToSchema;

/// Generic message response for operations that return no entity.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub use academic_semesters::AcademicSemester;
pub use class_schedules::{
    ClassScheduleFilterParams, CreateClassScheduleDto, OfferedCourseClassSchedule,
    PaginatedClassSchedulesResponse, TimeSlot, WeekDay,
};
pub use enrollments::{EnrollCourseDto, RegistrationCourseDetails, StudentSemesterRegistrationCourse};
pub use marks::{
    EnrolledCourseStatus, ExamType, MarkFilterParams, PaginatedMarksResponse,
    StudentEnrolledCourse, StudentEnrolledCourseMark, UpdateFinalMarksDto, UpdateMarksDto,
};
pub use offered_courses::{OfferedCourseSection, OfferedCourseWithCredits};
pub use payments::{PaginatedPaymentsResponse, PaymentFilterParams, StudentSemesterPayment};
pub use semester_registrations::{
    CreateSemesterRegistrationDto, MyRegistrationResponse, PaginatedSemesterRegistrationsResponse,
    SemesterRegistration, SemesterRegistrationFilterParams, SemesterRegistrationStatus,
    StudentSemesterRegistration, UpdateRegistrationStatusDto, UpdateSemesterRegistrationDto,
    check_registration_bounds,
};
pub use students::Student;
