pub mod academic_semesters;
pub mod class_schedules;
pub mod enrollments;
pub mod marks;
pub mod offered_courses;
pub mod payments;
pub mod semester_registrations;
pub mod students;

#[cfg(test)]
pub(crate) mod fixtures;
