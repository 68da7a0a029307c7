//! Repository trait definitions.

use async_trait::async_trait;
use timetable_core::{
    Group, GroupId, Interface, NewGroup, NewSchedule, Schedule, ScheduleId, TimetableResult,
};

/// Student group repository.
///
/// Every returned [`Group`] carries its schedules.
#[async_trait]
pub trait GroupRepository: Interface + Send + Sync {
    /// Finds all groups.
    async fn find_all(&self) -> TimetableResult<Vec<Group>>;

    /// Finds a group by ID.
    async fn find_by_id(&self, id: GroupId) -> TimetableResult<Option<Group>>;

    /// Finds a group by its unique number.
    async fn find_by_group_number(&self, group_number: &str) -> TimetableResult<Option<Group>>;

    /// Checks if a group exists.
    async fn exists_by_id(&self, id: GroupId) -> TimetableResult<bool>;

    /// Saves a new group.
    async fn save(&self, group: &NewGroup) -> TimetableResult<Group>;

    /// Saves several new groups in one transaction.
    async fn save_all(&self, groups: &[NewGroup]) -> TimetableResult<Vec<Group>>;

    /// Updates the group number of an existing group.
    async fn update(&self, group: &Group) -> TimetableResult<Group>;

    /// Updates several groups in one transaction.
    async fn update_all(&self, groups: &[Group]) -> TimetableResult<Vec<Group>>;

    /// Deletes a group and, by cascade, its schedules.
    async fn delete_by_id(&self, id: GroupId) -> TimetableResult<bool>;
}

/// Schedule repository.
#[async_trait]
pub trait ScheduleRepository: Interface + Send + Sync {
    /// Finds all schedule entries.
    async fn find_all(&self) -> TimetableResult<Vec<Schedule>>;

    /// Finds a schedule entry by ID.
    async fn find_by_id(&self, id: ScheduleId) -> TimetableResult<Option<Schedule>>;

    /// Finds the schedule entries of a group.
    async fn find_by_group_id(&self, group_id: GroupId) -> TimetableResult<Vec<Schedule>>;

    /// Finds the entries of a group whose time contains `date` as a substring.
    async fn find_by_group_number_and_date(
        &self,
        group_number: &str,
        date: &str,
    ) -> TimetableResult<Vec<Schedule>>;

    /// Checks if a schedule entry exists.
    async fn exists_by_id(&self, id: ScheduleId) -> TimetableResult<bool>;

    /// Saves a new schedule entry.
    async fn save(&self, schedule: &NewSchedule) -> TimetableResult<Schedule>;

    /// Saves several new entries in one transaction.
    async fn save_all(&self, schedules: &[NewSchedule]) -> TimetableResult<Vec<Schedule>>;

    /// Updates an existing schedule entry.
    async fn update(&self, schedule: &Schedule) -> TimetableResult<Schedule>;

    /// Updates several entries in one transaction.
    async fn update_all(&self, schedules: &[Schedule]) -> TimetableResult<Vec<Schedule>>;

    /// Deletes a schedule entry by ID.
    async fn delete_by_id(&self, id: ScheduleId) -> TimetableResult<bool>;
}
