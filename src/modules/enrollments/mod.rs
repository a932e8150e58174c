//! Student enrollment into offered course sections during an ongoing
//! registration window.
//!
//! Routes are mounted under `/semester-registrations`.

pub mod controller;
pub mod service;
