//! Cache manager holding the group and schedule caches.

use super::bounded::BoundedCache;
use crate::dto::{GroupDto, ScheduleDto};
use shaku::{Component, Interface};
use std::time::Duration;
use timetable_config::CacheConfig;
use timetable_core::{GroupId, ScheduleId};
use tracing::debug;

/// Cache manager interface for dependency injection.
///
/// Each entity type has an item cache keyed by id and a list cache keyed by
/// an operation key from [`super::cache_keys`].
pub trait CacheManagerInterface: Interface {
    fn put_group(&self, id: GroupId, group: GroupDto);
    fn get_group(&self, id: GroupId) -> Option<GroupDto>;
    fn contains_group(&self, id: GroupId) -> bool;
    fn remove_group(&self, id: GroupId);

    fn put_group_list(&self, key: &str, groups: Vec<GroupDto>);
    fn get_group_list(&self, key: &str) -> Option<Vec<GroupDto>>;
    fn contains_group_list(&self, key: &str) -> bool;

    fn put_schedule(&self, id: ScheduleId, schedule: ScheduleDto);
    fn get_schedule(&self, id: ScheduleId) -> Option<ScheduleDto>;
    fn contains_schedule(&self, id: ScheduleId) -> bool;
    fn remove_schedule(&self, id: ScheduleId);

    fn put_schedule_list(&self, key: &str, schedules: Vec<ScheduleDto>);
    fn get_schedule_list(&self, key: &str) -> Option<Vec<ScheduleDto>>;
    fn contains_schedule_list(&self, key: &str) -> bool;

    /// Clears the group item and list caches.
    fn clear_group_cache(&self);

    /// Clears the schedule item and list caches.
    fn clear_schedule_cache(&self);
}

/// In-memory cache manager component.
#[derive(Component, Debug, Default)]
#[shaku(interface = CacheManagerInterface)]
pub struct CacheManager {
    groups: BoundedCache<GroupId, GroupDto>,
    group_lists: BoundedCache<String, Vec<GroupDto>>,
    schedules: BoundedCache<ScheduleId, ScheduleDto>,
    schedule_lists: BoundedCache<String, Vec<ScheduleDto>>,
}

impl CacheManager {
    /// Creates a cache manager whose caches share a capacity and TTL.
    #[must_use]
    pub fn new(capacity: usize, ttl: Option<Duration>) -> Self {
        Self {
            groups: BoundedCache::new(capacity, ttl),
            group_lists: BoundedCache::new(capacity, ttl),
            schedules: BoundedCache::new(capacity, ttl),
            schedule_lists: BoundedCache::new(capacity, ttl),
        }
    }

    /// Builds the DI parameters from configuration.
    #[must_use]
    pub fn parameters(config: &CacheConfig) -> CacheManagerParameters {
        let ttl = config.ttl();
        CacheManagerParameters {
            groups: BoundedCache::new(config.capacity, ttl),
            group_lists: BoundedCache::new(config.capacity, ttl),
            schedules: BoundedCache::new(config.capacity, ttl),
            schedule_lists: BoundedCache::new(config.capacity, ttl),
        }
    }
}

impl CacheManagerInterface for CacheManager {
    fn put_group(&self, id: GroupId, group: GroupDto) {
        self.groups.put(id, group);
    }

    fn get_group(&self, id: GroupId) -> Option<GroupDto> {
        self.groups.get(&id)
    }

    fn contains_group(&self, id: GroupId) -> bool {
        self.groups.contains(&id)
    }

    fn remove_group(&self, id: GroupId) {
        self.groups.remove(&id);
    }

    fn put_group_list(&self, key: &str, groups: Vec<GroupDto>) {
        self.group_lists.put(key.to_string(), groups);
    }

    fn get_group_list(&self, key: &str) -> Option<Vec<GroupDto>> {
        self.group_lists.get(&key.to_string())
    }

    fn contains_group_list(&self, key: &str) -> bool {
        self.group_lists.contains(&key.to_string())
    }

    fn put_schedule(&self, id: ScheduleId, schedule: ScheduleDto) {
        self.schedules.put(id, schedule);
    }

    fn get_schedule(&self, id: ScheduleId) -> Option<ScheduleDto> {
        self.schedules.get(&id)
    }

    fn contains_schedule(&self, id: ScheduleId) -> bool {
        self.schedules.contains(&id)
    }

    fn remove_schedule(&self, id: ScheduleId) {
        self.schedules.remove(&id);
    }

    fn put_schedule_list(&self, key: &str, schedules: Vec<ScheduleDto>) {
        self.schedule_lists.put(key.to_string(), schedules);
    }

    fn get_schedule_list(&self, key: &str) -> Option<Vec<ScheduleDto>> {
        self.schedule_lists.get(&key.to_string())
    }

    fn contains_schedule_list(&self, key: &str) -> bool {
        self.schedule_lists.contains(&key.to_string())
    }

    fn clear_group_cache(&self) {
        debug!("Clearing group caches");
        self.groups.clear();
        self.group_lists.clear();
    }

    fn clear_schedule_cache(&self) {
        debug!("Clearing schedule caches");
        self.schedules.clear();
        self.schedule_lists.clear();
    }
}
