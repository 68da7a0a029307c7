//! Schedule service trait definition.

use crate::dto::ScheduleDto;
use async_trait::async_trait;
use timetable_core::{GroupId, Interface, ScheduleId, TimetableResult};

/// Schedule service trait.
#[async_trait]
pub trait ScheduleService: Interface + Send + Sync {
    /// Lists all stored schedules.
    async fn find_all(&self) -> TimetableResult<Vec<ScheduleDto>>;

    /// Gets a schedule by ID.
    async fn find_by_id(&self, id: ScheduleId) -> TimetableResult<ScheduleDto>;

    /// Lists the stored schedules of a group.
    async fn find_by_group_id(&self, group_id: GroupId) -> TimetableResult<Vec<ScheduleDto>>;

    /// Lists the stored schedules of a group whose time contains `date`.
    async fn find_by_group_number_and_date(
        &self,
        group_number: &str,
        date: &str,
    ) -> TimetableResult<Vec<ScheduleDto>>;

    /// Fetches the lessons of a group on an ISO date from the external feed.
    async fn get_schedule(&self, group_number: &str, date: &str) -> TimetableResult<Vec<ScheduleDto>>;

    /// Creates a schedule for an existing group.
    async fn create(&self, dto: ScheduleDto) -> TimetableResult<ScheduleDto>;

    /// Replaces a schedule.
    async fn update(&self, id: ScheduleId, dto: ScheduleDto) -> TimetableResult<ScheduleDto>;

    /// Deletes a schedule.
    async fn delete(&self, id: ScheduleId) -> TimetableResult<()>;

    /// Creates several schedules in one transaction.
    async fn create_bulk(&self, dtos: Vec<ScheduleDto>) -> TimetableResult<Vec<ScheduleDto>>;

    /// Updates several schedules. Every DTO must carry the ID of an existing schedule.
    async fn update_bulk(&self, dtos: Vec<ScheduleDto>) -> TimetableResult<Vec<ScheduleDto>>;
}
