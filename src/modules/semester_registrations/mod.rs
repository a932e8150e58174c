//! Registration windows, student participation and the end-of-window
//! rollover into permanent enrollment records.

pub mod controller;
pub mod rollover;
pub mod router;
pub mod service;
