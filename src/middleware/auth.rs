use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use registrar_auth::{Claims, verify_token};
use registrar_core::{AppError, permissions};
use registrar_models::ids::UserId;

use crate::state::AppState;

/// Extractor that validates the bearer token and provides its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.0.has_permission(permission)
    }

    /// The authenticated user's id, parsed from the `sub` claim.
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    pub fn role(&self) -> &str {
        &self.0.role
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format".to_string())
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Declares an extractor that authenticates the caller and requires one
/// permission.
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = registrar_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;

                if !auth_user.has_permission($permission) {
                    return Err(registrar_core::AppError::forbidden(format!(
                        "Access denied. Missing required permission: {}",
                        $permission
                    )));
                }

                Ok($name(auth_user))
            }
        }
    };
}

// Semester registrations
require_permission!(
    RequireRegistrationsCreate,
    permissions::SEMESTER_REGISTRATIONS_CREATE
);
require_permission!(
    RequireRegistrationsRead,
    permissions::SEMESTER_REGISTRATIONS_READ
);
require_permission!(
    RequireRegistrationsUpdate,
    permissions::SEMESTER_REGISTRATIONS_UPDATE
);
require_permission!(
    RequireRegistrationsDelete,
    permissions::SEMESTER_REGISTRATIONS_DELETE
);
require_permission!(
    RequireRegistrationsRollover,
    permissions::SEMESTER_REGISTRATIONS_ROLLOVER
);

// Student self-service
require_permission!(RequireEnrollmentsSelf, permissions::ENROLLMENTS_SELF);

// Class schedules
require_permission!(RequireClassSchedulesCreate, permissions::CLASS_SCHEDULES_CREATE);
require_permission!(RequireClassSchedulesRead, permissions::CLASS_SCHEDULES_READ);
require_permission!(RequireClassSchedulesDelete, permissions::CLASS_SCHEDULES_DELETE);

// Marks
require_permission!(RequireMarksRead, permissions::MARKS_READ);
require_permission!(RequireMarksUpdate, permissions::MARKS_UPDATE);

// Payments
require_permission!(RequirePaymentsRead, permissions::PAYMENTS_READ);

// Academic semesters
require_permission!(
    RequireAcademicSemestersRead,
    permissions::ACADEMIC_SEMESTERS_READ
);
