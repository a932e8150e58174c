//! Weekly class schedules and room/faculty double-booking checks.

pub mod conflict;
pub mod controller;
pub mod router;
pub mod service;
