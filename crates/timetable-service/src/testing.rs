//! In-memory test doubles shared by the service tests.

use crate::cache::CacheManager;
use crate::counter::RequestCounter;
use crate::external::{ScheduleFeed, ScheduleFeedClient, FEED_SERVICE_NAME};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use timetable_core::{
    Group, GroupId, NewGroup, NewSchedule, Schedule, ScheduleId, TimetableError, TimetableResult,
};
use timetable_repository::{GroupRepository, ScheduleRepository};

#[derive(Default)]
struct Tables {
    groups: BTreeMap<GroupId, String>,
    schedules: BTreeMap<ScheduleId, Schedule>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn group(&self, id: GroupId) -> Option<Group> {
        let number = self.groups.get(&id)?;
        let schedules = self
            .schedules
            .values()
            .filter(|s| s.group_id == id)
            .cloned()
            .collect();
        Some(Group::new(id, number.clone()).with_schedules(schedules))
    }

    fn insert_group(&mut self, group: &NewGroup) -> TimetableResult<Group> {
        if self.groups.values().any(|n| *n == group.group_number) {
            return Err(TimetableError::conflict(format!(
                "Duplicate entry '{}'",
                group.group_number
            )));
        }
        let id = GroupId::new(self.next_id());
        self.groups.insert(id, group.group_number.clone());
        Ok(Group::new(id, group.group_number.clone()))
    }

    fn insert_schedule(&mut self, schedule: &NewSchedule) -> TimetableResult<Schedule> {
        if !self.groups.contains_key(&schedule.group_id) {
            return Err(TimetableError::Database("foreign key constraint fails".to_string()));
        }
        let id = ScheduleId::new(self.next_id());
        let saved = schedule.clone().into_schedule(id);
        self.schedules.insert(id, saved.clone());
        Ok(saved)
    }
}

/// Shared in-memory store implementing both repositories.
///
/// Counts every repository call so tests can assert that a cache hit never
/// reaches the store.
#[derive(Default)]
pub(crate) struct InMemoryStore {
    tables: Mutex<Tables>,
    calls: AtomicUsize,
}

impl InMemoryStore {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn seed_group(&self, number: &str) -> GroupId {
        self.tables.lock().unwrap().insert_group(&NewGroup::new(number)).unwrap().id
    }

    pub(crate) fn seed_schedule(&self, group_id: GroupId, subject: &str, time: &str) -> ScheduleId {
        let schedule = NewSchedule {
            subject: subject.to_string(),
            lesson_type: "LK".to_string(),
            time: time.to_string(),
            auditorium: "101-1".to_string(),
            group_id,
        };
        self.tables.lock().unwrap().insert_schedule(&schedule).unwrap().id
    }

    pub(crate) fn group_count(&self) -> usize {
        self.tables.lock().unwrap().groups.len()
    }

    pub(crate) fn schedule_count(&self) -> usize {
        self.tables.lock().unwrap().schedules.len()
    }
}

#[async_trait]
impl GroupRepository for InMemoryStore {
    async fn find_all(&self) -> TimetableResult<Vec<Group>> {
        self.record();
        let tables = self.tables.lock().unwrap();
        Ok(tables.groups.keys().filter_map(|id| tables.group(*id)).collect())
    }

    async fn find_by_id(&self, id: GroupId) -> TimetableResult<Option<Group>> {
        self.record();
        Ok(self.tables.lock().unwrap().group(id))
    }

    async fn find_by_group_number(&self, group_number: &str) -> TimetableResult<Option<Group>> {
        self.record();
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .groups
            .iter()
            .find(|(_, n)| n.as_str() == group_number)
            .and_then(|(id, _)| tables.group(*id)))
    }

    async fn exists_by_id(&self, id: GroupId) -> TimetableResult<bool> {
        self.record();
        Ok(self.tables.lock().unwrap().groups.contains_key(&id))
    }

    async fn save(&self, group: &NewGroup) -> TimetableResult<Group> {
        self.record();
        self.tables.lock().unwrap().insert_group(group)
    }

    async fn save_all(&self, groups: &[NewGroup]) -> TimetableResult<Vec<Group>> {
        self.record();
        let mut tables = self.tables.lock().unwrap();
        groups.iter().map(|g| tables.insert_group(g)).collect()
    }

    async fn update(&self, group: &Group) -> TimetableResult<Group> {
        self.record();
        let mut tables = self.tables.lock().unwrap();
        if !tables.groups.contains_key(&group.id) {
            return Err(TimetableError::not_found("Group", group.id));
        }
        tables.groups.insert(group.id, group.group_number.clone());
        tables
            .group(group.id)
            .ok_or_else(|| TimetableError::not_found("Group", group.id))
    }

    async fn update_all(&self, groups: &[Group]) -> TimetableResult<Vec<Group>> {
        let mut updated = Vec::with_capacity(groups.len());
        for group in groups {
            updated.push(GroupRepository::update(self, group).await?);
        }
        Ok(updated)
    }

    async fn delete_by_id(&self, id: GroupId) -> TimetableResult<bool> {
        self.record();
        let mut tables = self.tables.lock().unwrap();
        tables.schedules.retain(|_, s| s.group_id != id);
        Ok(tables.groups.remove(&id).is_some())
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryStore {
    async fn find_all(&self) -> TimetableResult<Vec<Schedule>> {
        self.record();
        Ok(self.tables.lock().unwrap().schedules.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ScheduleId) -> TimetableResult<Option<Schedule>> {
        self.record();
        Ok(self.tables.lock().unwrap().schedules.get(&id).cloned())
    }

    async fn find_by_group_id(&self, group_id: GroupId) -> TimetableResult<Vec<Schedule>> {
        self.record();
        Ok(self
            .tables
            .lock()
            .unwrap()
            .schedules
            .values()
            .filter(|s| s.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn find_by_group_number_and_date(
        &self,
        group_number: &str,
        date: &str,
    ) -> TimetableResult<Vec<Schedule>> {
        self.record();
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .schedules
            .values()
            .filter(|s| {
                tables.groups.get(&s.group_id).map(String::as_str) == Some(group_number)
                    && s.time.contains(date)
            })
            .cloned()
            .collect())
    }

    async fn exists_by_id(&self, id: ScheduleId) -> TimetableResult<bool> {
        self.record();
        Ok(self.tables.lock().unwrap().schedules.contains_key(&id))
    }

    async fn save(&self, schedule: &NewSchedule) -> TimetableResult<Schedule> {
        self.record();
        self.tables.lock().unwrap().insert_schedule(schedule)
    }

    async fn save_all(&self, schedules: &[NewSchedule]) -> TimetableResult<Vec<Schedule>> {
        self.record();
        let mut tables = self.tables.lock().unwrap();
        schedules.iter().map(|s| tables.insert_schedule(s)).collect()
    }

    async fn update(&self, schedule: &Schedule) -> TimetableResult<Schedule> {
        self.record();
        let mut tables = self.tables.lock().unwrap();
        if !tables.schedules.contains_key(&schedule.id) {
            return Err(TimetableError::not_found("Schedule", schedule.id));
        }
        tables.schedules.insert(schedule.id, schedule.clone());
        Ok(schedule.clone())
    }

    async fn update_all(&self, schedules: &[Schedule]) -> TimetableResult<Vec<Schedule>> {
        let mut updated = Vec::with_capacity(schedules.len());
        for schedule in schedules {
            updated.push(ScheduleRepository::update(self, schedule).await?);
        }
        Ok(updated)
    }

    async fn delete_by_id(&self, id: ScheduleId) -> TimetableResult<bool> {
        self.record();
        Ok(self.tables.lock().unwrap().schedules.remove(&id).is_some())
    }
}

/// Feed client returning a canned document, or a fetch failure when empty.
#[derive(Default)]
pub(crate) struct StaticFeedClient {
    feed: Mutex<Option<ScheduleFeed>>,
    calls: AtomicUsize,
}

impl StaticFeedClient {
    pub(crate) fn with_json(json: &str) -> Arc<Self> {
        Arc::new(Self {
            feed: Mutex::new(Some(serde_json::from_str(json).unwrap())),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScheduleFeedClient for StaticFeedClient {
    async fn fetch(&self, _group_number: &str) -> TimetableResult<ScheduleFeed> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.feed
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| TimetableError::external_fetch(FEED_SERVICE_NAME, "connection refused"))
    }
}

pub(crate) fn cache() -> Arc<CacheManager> {
    Arc::new(CacheManager::default())
}

pub(crate) fn counter() -> Arc<RequestCounter> {
    Arc::new(RequestCounter::new())
}
