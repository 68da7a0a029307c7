//! Group service trait definition.

use crate::dto::GroupDto;
use async_trait::async_trait;
use timetable_core::{GroupId, Interface, TimetableResult};

/// Group service trait.
///
/// Every call counts as one request. Reads go through the group caches;
/// writes clear them.
#[async_trait]
pub trait GroupService: Interface + Send + Sync {
    /// Lists all groups with their schedules.
    async fn find_all(&self) -> TimetableResult<Vec<GroupDto>>;

    /// Gets a group by ID.
    async fn find_by_id(&self, id: GroupId) -> TimetableResult<GroupDto>;

    /// Gets a group by its group number.
    async fn find_by_group_number(&self, group_number: &str) -> TimetableResult<GroupDto>;

    /// Creates a group.
    async fn create(&self, dto: GroupDto) -> TimetableResult<GroupDto>;

    /// Renames a group.
    async fn update(&self, id: GroupId, dto: GroupDto) -> TimetableResult<GroupDto>;

    /// Deletes a group and, by cascade, its schedules.
    async fn delete(&self, id: GroupId) -> TimetableResult<()>;

    /// Creates several groups in one transaction.
    async fn create_bulk(&self, dtos: Vec<GroupDto>) -> TimetableResult<Vec<GroupDto>>;

    /// Updates several groups. Every DTO must carry the ID of an existing group.
    async fn update_bulk(&self, dtos: Vec<GroupDto>) -> TimetableResult<Vec<GroupDto>>;
}
