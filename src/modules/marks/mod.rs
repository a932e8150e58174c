//! Permanent enrollment records and exam marks.
//!
//! Rows are created by the semester rollover ([`service::MarkService::create_enrolled_course`]
//! and [`service::MarkService::initialize_default_marks`]); the endpoints here
//! enter marks and compute final results.

pub mod controller;
pub mod grading;
pub mod router;
pub mod service;
