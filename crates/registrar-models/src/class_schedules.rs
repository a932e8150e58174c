//! Class schedule models.
//!
//! Times are time-of-day values serialized as `HH:MM`.

use crate::ids::{
    ClassScheduleId, FacultyId, OfferedCourseSectionId, RoomId, SemesterRegistrationId,
};
use chrono::{DateTime, NaiveTime, Utc};
use registrar_core::serde::time_of_day;
use registrar_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "week_day", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeekDay {
    Saturday,
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

/// A booked (or proposed) interval on one day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct TimeSlot {
    pub day_of_week: WeekDay,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OfferedCourseClassSchedule {
    pub id: ClassScheduleId,
    pub day_of_week: WeekDay,
    #[serde(with = "time_of_day")]
    #[schema(value_type = String, example = "09:00")]
    pub start_time: NaiveTime,
    #[serde(with = "time_of_day")]
    #[schema(value_type = String, example = "10:30")]
    pub end_time: NaiveTime,
    pub offered_course_section_id: OfferedCourseSectionId,
    pub semester_registration_id: SemesterRegistrationId,
    pub room_id: RoomId,
    pub faculty_id: FacultyId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for booking a class schedule. The registration window is taken from
/// the section's offered course.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClassScheduleDto {
    pub day_of_week: WeekDay,
    #[serde(with = "time_of_day")]
    #[schema(value_type = String, example = "09:00")]
    pub start_time: NaiveTime,
    #[serde(with = "time_of_day")]
    #[schema(value_type = String, example = "10:30")]
    pub end_time: NaiveTime,
    pub offered_course_section_id: OfferedCourseSectionId,
    pub room_id: RoomId,
    pub faculty_id: FacultyId,
}

impl CreateClassScheduleDto {
    pub fn slot(&self) -> TimeSlot {
        TimeSlot {
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// Query parameters for filtering class schedules.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ClassScheduleFilterParams {
    pub offered_course_section_id: Option<OfferedCourseSectionId>,
    pub semester_registration_id: Option<SemesterRegistrationId>,
    pub room_id: Option<RoomId>,
    pub faculty_id: Option<FacultyId>,
    pub day_of_week: Option<WeekDay>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedClassSchedulesResponse {
    pub data: Vec<OfferedCourseClassSchedule>,
    pub meta: PaginationMeta,
}
