//! Student group entity.

use super::Schedule;
use crate::{Entity, GroupId};
use serde::{Deserialize, Serialize};

/// A student cohort with its timetabled lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier for the group.
    pub id: GroupId,

    /// Unique human-readable group number (e.g. `"350501"`).
    pub group_number: String,

    /// Lessons owned by this group.
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

impl Group {
    /// Creates a group without schedules.
    #[must_use]
    pub fn new(id: GroupId, group_number: impl Into<String>) -> Self {
        Self {
            id,
            group_number: group_number.into(),
            schedules: Vec::new(),
        }
    }

    /// Attaches the given schedules to this group.
    #[must_use]
    pub fn with_schedules(mut self, schedules: Vec<Schedule>) -> Self {
        self.schedules = schedules;
        self
    }
}

impl Entity<GroupId> for Group {
    fn id(&self) -> &GroupId {
        &self.id
    }
}

/// A group that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    pub group_number: String,
}

impl NewGroup {
    #[must_use]
    pub fn new(group_number: impl Into<String>) -> Self {
        Self {
            group_number: group_number.into(),
        }
    }
}
