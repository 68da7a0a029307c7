//! Group service implementation.

use crate::cache::{cache_keys, CacheManagerInterface};
use crate::counter::RequestCounterInterface;
use crate::dto::GroupDto;
use crate::group_service::GroupService;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use timetable_core::{GroupId, NewGroup, TimetableError, TimetableResult, ValidateExt};
use timetable_repository::GroupRepository;
use tracing::{debug, info};

/// Shaku-compatible group service component.
///
/// Reads go through the group caches; every mutation clears them before
/// returning.
#[derive(Component)]
#[shaku(interface = GroupService)]
pub struct GroupServiceComponent {
    #[shaku(inject)]
    group_repository: Arc<dyn GroupRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheManagerInterface>,
    #[shaku(inject)]
    request_counter: Arc<dyn RequestCounterInterface>,
}

impl GroupServiceComponent {
    /// Loads every group from the store and caches the list under `findAll`.
    async fn load_all(&self) -> TimetableResult<Vec<GroupDto>> {
        let groups: Vec<GroupDto> = self
            .group_repository
            .find_all()
            .await?
            .into_iter()
            .map(GroupDto::from)
            .collect();

        self.cache.put_group_list(cache_keys::FIND_ALL, groups.clone());
        Ok(groups)
    }

    /// Caches bulk results by id and number, then rebuilds `findAll`.
    async fn cache_bulk_result(&self, groups: &[GroupDto]) -> TimetableResult<()> {
        for dto in groups {
            if let Some(id) = dto.id {
                self.cache.put_group(id, dto.clone());
            }
            self.cache.put_group_list(
                &cache_keys::group_by_number(&dto.group_number),
                vec![dto.clone()],
            );
        }

        self.load_all().await?;
        Ok(())
    }

    fn clear_caches(&self) {
        self.cache.clear_group_cache();
        self.cache.clear_schedule_cache();
    }
}

#[async_trait]
impl GroupService for GroupServiceComponent {
    async fn find_all(&self) -> TimetableResult<Vec<GroupDto>> {
        self.request_counter.increment();
        debug!("Finding all groups");

        if let Some(groups) = self.cache.get_group_list(cache_keys::FIND_ALL) {
            return Ok(groups);
        }

        self.load_all().await
    }

    async fn find_by_id(&self, id: GroupId) -> TimetableResult<GroupDto> {
        self.request_counter.increment();
        debug!("Finding group: {}", id);

        if let Some(group) = self.cache.get_group(id) {
            return Ok(group);
        }

        let group = self
            .group_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| TimetableError::not_found("Group", id))?;

        let dto = GroupDto::from(group);
        self.cache.put_group(id, dto.clone());
        Ok(dto)
    }

    async fn find_by_group_number(&self, group_number: &str) -> TimetableResult<GroupDto> {
        self.request_counter.increment();
        debug!("Finding group by number: {}", group_number);

        let key = cache_keys::group_by_number(group_number);
        if let Some(group) = self
            .cache
            .get_group_list(&key)
            .and_then(|groups| groups.into_iter().next())
        {
            return Ok(group);
        }

        let group = self
            .group_repository
            .find_by_group_number(group_number)
            .await?
            .ok_or_else(|| TimetableError::group_number_not_found(group_number))?;

        let id = group.id;
        let dto = GroupDto::from(group);
        self.cache.put_group_list(&key, vec![dto.clone()]);
        self.cache.put_group(id, dto.clone());
        Ok(dto)
    }

    async fn create(&self, dto: GroupDto) -> TimetableResult<GroupDto> {
        self.request_counter.increment();
        debug!("Creating group: {}", dto.group_number);

        dto.validate_request()?;

        let saved = self
            .group_repository
            .save(&NewGroup::new(dto.group_number))
            .await?;

        info!("Group created: {} ({})", saved.id, saved.group_number);
        let result = GroupDto::from(saved);
        self.cache.clear_group_cache();
        Ok(result)
    }

    async fn update(&self, id: GroupId, dto: GroupDto) -> TimetableResult<GroupDto> {
        self.request_counter.increment();
        debug!("Updating group: {}", id);

        dto.validate_request()?;

        let mut group = self
            .group_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| TimetableError::not_found("Group", id))?;
        group.group_number = dto.group_number;

        let updated = self.group_repository.update(&group).await?;

        info!("Group updated: {}", id);
        let result = GroupDto::from(updated);
        self.clear_caches();
        Ok(result)
    }

    async fn delete(&self, id: GroupId) -> TimetableResult<()> {
        self.request_counter.increment();
        debug!("Deleting group: {}", id);

        if !self.group_repository.exists_by_id(id).await? {
            return Err(TimetableError::not_found("Group", id));
        }

        self.group_repository.delete_by_id(id).await?;

        info!("Group deleted: {}", id);
        self.clear_caches();
        Ok(())
    }

    async fn create_bulk(&self, dtos: Vec<GroupDto>) -> TimetableResult<Vec<GroupDto>> {
        self.request_counter.increment();
        debug!("Creating {} groups", dtos.len());

        for dto in &dtos {
            dto.validate_request()?;
        }

        let new_groups: Vec<NewGroup> = dtos
            .into_iter()
            .map(|dto| NewGroup::new(dto.group_number))
            .collect();

        let saved = self.group_repository.save_all(&new_groups).await?;

        info!("Groups created: {}", saved.len());
        self.cache.clear_group_cache();

        let result: Vec<GroupDto> = saved.into_iter().map(GroupDto::from).collect();
        self.cache_bulk_result(&result).await?;
        Ok(result)
    }

    async fn update_bulk(&self, dtos: Vec<GroupDto>) -> TimetableResult<Vec<GroupDto>> {
        self.request_counter.increment();
        debug!("Updating {} groups", dtos.len());

        let mut groups = Vec::with_capacity(dtos.len());
        for dto in dtos {
            dto.validate_request()?;

            let id = dto
                .id
                .ok_or_else(|| TimetableError::validation("Group ID is required for bulk update"))?;

            let mut group = self
                .group_repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| TimetableError::not_found("Group", id))?;
            group.group_number = dto.group_number;
            groups.push(group);
        }

        let updated = self.group_repository.update_all(&groups).await?;

        info!("Groups updated: {}", updated.len());
        self.clear_caches();

        let result: Vec<GroupDto> = updated.into_iter().map(GroupDto::from).collect();
        self.cache_bulk_result(&result).await?;
        Ok(result)
    }
}

impl std::fmt::Debug for GroupServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupServiceComponent").finish_non_exhaustive()
    }
}
