//! Schedule transfer form.

use serde::{Deserialize, Serialize};
use timetable_core::rules::not_blank;
use timetable_core::{GroupId, NewSchedule, Schedule, ScheduleId};
use utoipa::ToSchema;
use validator::Validate;

/// A single lesson.
///
/// `group_number` and `date` are only filled in for lessons resolved from
/// the external schedule feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDto {
    #[serde(default)]
    pub id: Option<ScheduleId>,

    #[validate(custom(function = "not_blank", message = "Subject cannot be blank"))]
    pub subject: String,

    #[validate(custom(function = "not_blank", message = "Lesson type cannot be blank"))]
    pub lesson_type: String,

    #[validate(custom(function = "not_blank", message = "Time cannot be blank"))]
    pub time: String,

    #[validate(custom(function = "not_blank", message = "Auditorium cannot be blank"))]
    pub auditorium: String,

    #[validate(required(message = "Group ID cannot be null"))]
    pub group_id: Option<GroupId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl ScheduleDto {
    /// Converts a validated transfer form into an insertable schedule.
    ///
    /// Returns `None` when the group id is missing.
    #[must_use]
    pub fn to_new_schedule(&self) -> Option<NewSchedule> {
        Some(NewSchedule {
            subject: self.subject.clone(),
            lesson_type: self.lesson_type.clone(),
            time: self.time.clone(),
            auditorium: self.auditorium.clone(),
            group_id: self.group_id?,
        })
    }
}

impl From<Schedule> for ScheduleDto {
    fn from(schedule: Schedule) -> Self {
        Self {
            id: Some(schedule.id),
            subject: schedule.subject,
            lesson_type: schedule.lesson_type,
            time: schedule.time,
            auditorium: schedule.auditorium,
            group_id: Some(schedule.group_id),
            group_number: None,
            date: None,
        }
    }
}
