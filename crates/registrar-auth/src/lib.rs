//! # Registrar Auth
//!
//! Access-token claims and JWT helpers.
//!
//! Tokens are issued by an external identity service; this crate only needs to
//! verify them, but [`create_access_token`] is kept for the CLI and for tests.
//!
//! # Example
//!
//! ```ignore
//! use registrar_auth::{create_access_token, verify_token};
//! use registrar_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(
//!     user_id,
//!     "student@university.edu",
//!     "student",
//!     vec!["enrollments:self".to_string()],
//!     &config,
//! )?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
