//! # Registrar Core
//!
//! Core types, errors, and utilities for the Registrar API.
//!
//! - [`errors`]: Application error kinds with HTTP response conversion
//! - [`pagination`]: Pagination utilities for list endpoints
//! - [`permissions`]: Permission string constants checked by route extractors
//! - [`serde`]: Custom serde helpers (time-of-day format)
//!
//! # Example
//!
//! ```ignore
//! use registrar_core::{AppError, ErrorKind};
//!
//! let error = AppError::capacity_exceeded(anyhow::anyhow!("Maximum capacity exceeded"));
//! assert_eq!(error.kind, ErrorKind::CapacityExceeded);
//! ```

pub mod errors;
pub mod pagination;
pub mod permissions;
pub mod serde;

pub use errors::{AppError, ErrorKind, ErrorResponse};
pub use pagination::{PaginationMeta, PaginationParams};
