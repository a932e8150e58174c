use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use registrar_core::{ErrorResponse, PaginationMeta, PaginationParams};
use registrar_models::{
    AcademicSemester, ClassScheduleFilterParams, CreateClassScheduleDto,
    CreateSemesterRegistrationDto, EnrollCourseDto, EnrolledCourseStatus, ExamType,
    MarkFilterParams, MessageResponse, MyRegistrationResponse, OfferedCourseClassSchedule,
    PaginatedClassSchedulesResponse, PaginatedMarksResponse, PaginatedPaymentsResponse,
    PaginatedSemesterRegistrationsResponse, PaymentFilterParams, RegistrationCourseDetails,
    SemesterRegistration, SemesterRegistrationFilterParams, SemesterRegistrationStatus,
    StudentEnrolledCourse, StudentEnrolledCourseMark, StudentSemesterPayment,
    StudentSemesterRegistration, StudentSemesterRegistrationCourse, UpdateFinalMarksDto,
    UpdateMarksDto, UpdateRegistrationStatusDto, UpdateSemesterRegistrationDto, WeekDay,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::semester_registrations::controller::create_registration,
        crate::modules::semester_registrations::controller::list_registrations,
        crate::modules::semester_registrations::controller::get_registration,
        crate::modules::semester_registrations::controller::update_registration,
        crate::modules::semester_registrations::controller::advance_status,
        crate::modules::semester_registrations::controller::delete_registration,
        crate::modules::semester_registrations::controller::start_new_semester,
        crate::modules::semester_registrations::controller::start_my_registration,
        crate::modules::semester_registrations::controller::get_my_registration,
        crate::modules::semester_registrations::controller::get_my_registration_courses,
        crate::modules::enrollments::controller::enroll_into_course,
        crate::modules::enrollments::controller::withdraw_from_course,
        crate::modules::enrollments::controller::confirm_my_registration,
        crate::modules::class_schedules::controller::create_schedule,
        crate::modules::class_schedules::controller::list_schedules,
        crate::modules::class_schedules::controller::get_schedule,
        crate::modules::class_schedules::controller::delete_schedule,
        crate::modules::marks::controller::list_marks,
        crate::modules::marks::controller::update_marks,
        crate::modules::marks::controller::update_final_marks,
        crate::modules::payments::controller::list_payments,
        crate::modules::academic_semesters::controller::get_current_semester,
    ),
    components(
        schemas(
            SemesterRegistration,
            SemesterRegistrationStatus,
            CreateSemesterRegistrationDto,
            UpdateSemesterRegistrationDto,
            UpdateRegistrationStatusDto,
            SemesterRegistrationFilterParams,
            PaginatedSemesterRegistrationsResponse,
            StudentSemesterRegistration,
            MyRegistrationResponse,
            EnrollCourseDto,
            StudentSemesterRegistrationCourse,
            RegistrationCourseDetails,
            OfferedCourseClassSchedule,
            CreateClassScheduleDto,
            ClassScheduleFilterParams,
            PaginatedClassSchedulesResponse,
            WeekDay,
            StudentEnrolledCourse,
            StudentEnrolledCourseMark,
            EnrolledCourseStatus,
            ExamType,
            UpdateMarksDto,
            UpdateFinalMarksDto,
            MarkFilterParams,
            PaginatedMarksResponse,
            StudentSemesterPayment,
            PaymentFilterParams,
            PaginatedPaymentsResponse,
            AcademicSemester,
            MessageResponse,
            ErrorResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Semester Registrations", description = "Registration window lifecycle and semester rollover"),
        (name = "Enrollments", description = "Student self-service enrollment in the ongoing window"),
        (name = "Class Schedules", description = "Weekly class schedules with room and faculty conflict checks"),
        (name = "Marks", description = "Exam marks and final results"),
        (name = "Payments", description = "Semester tuition records"),
        (name = "Academic Semesters", description = "Academic semester lookups")
    ),
    info(
        title = "Registrar API",
        version = "0.1.0",
        description = "Semester registration, course enrollment and semester rollover for a university registrar, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_registration_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/semester-registrations",
            "/api/semester-registrations/{id}/start-new-semester",
            "/api/semester-registrations/enroll-into-course",
            "/api/offered-course-class-schedules/{id}",
            "/api/student-enrolled-course-marks/update-final-marks",
            "/api/student-semester-payments",
            "/api/academic-semesters/current",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_openapi_has_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
