//! Academic semester lookups and the current-semester flag.

pub mod controller;
pub mod router;
pub mod service;
