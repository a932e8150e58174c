//! Offered course and section lookups used by enrollment.

pub mod service;
