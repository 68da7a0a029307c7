//! Group transfer form.

use super::ScheduleDto;
use serde::{Deserialize, Serialize};
use timetable_core::rules::not_blank;
use timetable_core::{Group, GroupId};
use utoipa::ToSchema;
use validator::Validate;

/// A student group with its schedules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupDto {
    #[serde(default)]
    pub id: Option<GroupId>,

    #[validate(custom(function = "not_blank", message = "Group number cannot be blank"))]
    pub group_number: String,

    #[serde(default)]
    pub schedules: Vec<ScheduleDto>,
}

impl GroupDto {
    /// Creates a transfer form for a group that is not yet persisted.
    #[must_use]
    pub fn new(group_number: impl Into<String>) -> Self {
        Self {
            id: None,
            group_number: group_number.into(),
            schedules: Vec::new(),
        }
    }
}

impl From<Group> for GroupDto {
    fn from(group: Group) -> Self {
        Self {
            id: Some(group.id),
            group_number: group.group_number,
            schedules: group.schedules.into_iter().map(ScheduleDto::from).collect(),
        }
    }
}
