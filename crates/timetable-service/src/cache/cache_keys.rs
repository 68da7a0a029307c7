//! Cache key generators for consistent key naming.

use timetable_core::GroupId;

/// Key of the full group list and the full schedule list.
pub const FIND_ALL: &str = "findAll";

/// Key of the single-element group list for a group number.
#[must_use]
pub fn group_by_number(group_number: &str) -> String {
    format!("findByGroupNumber:{}", group_number)
}

/// Key of the schedules of a group.
#[must_use]
pub fn schedules_by_group_id(group_id: GroupId) -> String {
    format!("findByGroupId:{}", group_id)
}

/// Key of the stored schedules of a group whose time matches a date.
#[must_use]
pub fn schedules_by_group_number_and_date(group_number: &str, date: &str) -> String {
    format!("findByGroupNumberAndDate:{}:{}", group_number, date)
}

/// Key of the schedules fetched from the external feed.
#[must_use]
pub fn external_schedule(group_number: &str, date: &str) -> String {
    format!("getSchedule:{}:{}", group_number, date)
}
