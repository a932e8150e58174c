//! Permission constants for the Registrar API.
//!
//! Route extractors check these strings against the `permissions` claim of the
//! caller's access token.
//!
//! # Example
//!
//! ```ignore
//! use registrar_core::permissions;
//!
//! if auth_user.has_permission(permissions::SEMESTER_REGISTRATIONS_ROLLOVER) {
//!     // Start the new semester
//! }
//! ```

// =============================================================================
// Semester registrations permissions
// =============================================================================

/// Permission to open a new semester registration window
pub const SEMESTER_REGISTRATIONS_CREATE: &str = "semester_registrations:create";
/// Permission to read semester registrations
pub const SEMESTER_REGISTRATIONS_READ: &str = "semester_registrations:read";
/// Permission to update semester registrations and advance their status
pub const SEMESTER_REGISTRATIONS_UPDATE: &str = "semester_registrations:update";
/// Permission to delete upcoming semester registrations
pub const SEMESTER_REGISTRATIONS_DELETE: &str = "semester_registrations:delete";
/// Permission to roll an ended registration into the next semester
pub const SEMESTER_REGISTRATIONS_ROLLOVER: &str = "semester_registrations:rollover";

// =============================================================================
// Student self-service
// =============================================================================

/// Permission for a student to start, enroll, withdraw and confirm their own registration
pub const ENROLLMENTS_SELF: &str = "enrollments:self";

// =============================================================================
// Class schedules permissions
// =============================================================================

pub const CLASS_SCHEDULES_CREATE: &str = "class_schedules:create";
pub const CLASS_SCHEDULES_READ: &str = "class_schedules:read";
pub const CLASS_SCHEDULES_DELETE: &str = "class_schedules:delete";

// =============================================================================
// Marks, payments, academic semesters
// =============================================================================

pub const MARKS_READ: &str = "marks:read";
pub const MARKS_UPDATE: &str = "marks:update";
pub const PAYMENTS_READ: &str = "payments:read";
pub const ACADEMIC_SEMESTERS_READ: &str = "academic_semesters:read";

/// Every permission known to the API, used by tests and token tooling.
pub const ALL: &[&str] = &[
    SEMESTER_REGISTRATIONS_CREATE,
    SEMESTER_REGISTRATIONS_READ,
    SEMESTER_REGISTRATIONS_UPDATE,
    SEMESTER_REGISTRATIONS_DELETE,
    SEMESTER_REGISTRATIONS_ROLLOVER,
    ENROLLMENTS_SELF,
    CLASS_SCHEDULES_CREATE,
    CLASS_SCHEDULES_READ,
    CLASS_SCHEDULES_DELETE,
    MARKS_READ,
    MARKS_UPDATE,
    PAYMENTS_READ,
    ACADEMIC_SEMESTERS_READ,
];
