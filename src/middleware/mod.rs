//! Request extractors for authentication and permission checks.
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::AuthUser`] verifies the JWT and exposes its claims
//! 3. A `Require*` extractor checks for one permission
//! 4. The handler runs only if both succeed
//!
//! ```ignore
//! async fn enroll(
//!     RequireEnrollmentsSelf(auth_user): RequireEnrollmentsSelf,
//! ) -> impl IntoResponse {
//!     let user_id = auth_user.user_id()?;
//!     // ...
//! }
//! ```

pub mod auth;
