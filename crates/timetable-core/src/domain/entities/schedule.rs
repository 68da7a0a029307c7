//! Schedule entity.

use crate::{Entity, GroupId, ScheduleId};
use serde::{Deserialize, Serialize};

/// A single timetabled lesson belonging to one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Unique identifier for the lesson.
    pub id: ScheduleId,

    /// Subject name.
    pub subject: String,

    /// Lesson type code (e.g. `LK`, `PZ`, `LR`).
    pub lesson_type: String,

    /// Time range, `HH:MM-HH:MM`.
    pub time: String,

    /// Room.
    pub auditorium: String,

    /// Owning group.
    pub group_id: GroupId,
}

impl Entity<ScheduleId> for Schedule {
    fn id(&self) -> &ScheduleId {
        &self.id
    }
}

/// A schedule entry that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchedule {
    pub subject: String,
    pub lesson_type: String,
    pub time: String,
    pub auditorium: String,
    pub group_id: GroupId,
}

impl NewSchedule {
    /// Attaches an identifier, producing the persisted form.
    #[must_use]
    pub fn into_schedule(self, id: ScheduleId) -> Schedule {
        Schedule {
            id,
            subject: self.subject,
            lesson_type: self.lesson_type,
            time: self.time,
            auditorium: self.auditorium,
            group_id: self.group_id,
        }
    }
}
