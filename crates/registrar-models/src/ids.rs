//! Strongly-typed ID newtypes for domain entities.
//!
//! Every table key is a `Uuid`, but a `StudentId` can never be passed where an
//! `OfferedCourseSectionId` is expected. The wrappers encode to Postgres `uuid`
//! and to JSON strings exactly like the inner value.
//!
//! # Example
//!
//! ```ignore
//! use registrar_models::ids::{OfferedCourseId, OfferedCourseSectionId};
//!
//! fn enroll(course: OfferedCourseId, section: OfferedCourseSectionId) { /* ... */ }
//!
//! let course = OfferedCourseId::new();
//! let section = OfferedCourseSectionId::new();
//! enroll(course, section);
//! // enroll(section, course); // Compile error
//! ```

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Postgres, Type,
    postgres::{PgHasArrayType, PgTypeInfo},
};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(transparent)]
        #[schema(value_type = String, format = "uuid")]
        pub struct $name(pub Uuid);

        impl $name {
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[inline]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            #[inline]
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl Type<Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <Uuid as Type<Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <Uuid as Type<Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <Uuid as Encode<'q, Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(
                value: <Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <Uuid as Decode<'r, Postgres>>::decode(value).map(Self)
            }
        }

        // Needed for `= ANY($1)` binds.
        impl PgHasArrayType for $name {
            fn array_type_info() -> PgTypeInfo {
                <Uuid as PgHasArrayType>::array_type_info()
            }
        }
    };
}

define_id!(
    /// Identity-provider user; the `sub` claim of an access token.
    UserId
);
define_id!(StudentId);
define_id!(FacultyId);
define_id!(RoomId);
define_id!(CourseId);
define_id!(AcademicSemesterId);
define_id!(AcademicDepartmentId);
define_id!(OfferedCourseId);
define_id!(OfferedCourseSectionId);
define_id!(SemesterRegistrationId);
define_id!(StudentSemesterRegistrationId);
define_id!(
    /// Offered course class schedule.
    ClassScheduleId
);
define_id!(StudentEnrolledCourseId);
define_id!(StudentEnrolledCourseMarkId);
define_id!(StudentSemesterPaymentId);
