//! Student lookups. Profiles are managed elsewhere; the registration
//! workflow only resolves the authenticated user to a student row.

pub mod service;
