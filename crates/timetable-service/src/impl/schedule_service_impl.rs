//! Schedule service implementation.

use crate::cache::{cache_keys, CacheManagerInterface};
use crate::counter::RequestCounterInterface;
use crate::dto::ScheduleDto;
use crate::external::applicability::{lesson_applies, localized_day_name};
use crate::external::{FeedLesson, ScheduleFeedClient};
use crate::schedule_service::ScheduleService;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use shaku::Component;
use std::sync::Arc;
use timetable_config::ExternalApiConfig;
use timetable_core::{
    GroupId, NewSchedule, Schedule, ScheduleId, TimetableError, TimetableResult, ValidateExt,
};
use timetable_repository::{GroupRepository, ScheduleRepository};
use tracing::{debug, info};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Shaku-compatible schedule service component.
///
/// Schedule mutations clear the group caches as well, since cached groups
/// embed their schedules.
#[derive(Component)]
#[shaku(interface = ScheduleService)]
pub struct ScheduleServiceComponent {
    #[shaku(inject)]
    schedule_repository: Arc<dyn ScheduleRepository>,
    #[shaku(inject)]
    group_repository: Arc<dyn GroupRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheManagerInterface>,
    #[shaku(inject)]
    request_counter: Arc<dyn RequestCounterInterface>,
    #[shaku(inject)]
    feed_client: Arc<dyn ScheduleFeedClient>,
    /// First day of week 1.
    semester_start: NaiveDate,
}

impl ScheduleServiceComponent {
    /// Builds the DI parameters from the external API configuration.
    pub fn parameters(
        config: &ExternalApiConfig,
    ) -> TimetableResult<ScheduleServiceComponentParameters> {
        let semester_start = config.semester_start_date().map_err(|e| {
            TimetableError::Configuration(format!(
                "Invalid semester start '{}': {}",
                config.semester_start, e
            ))
        })?;

        Ok(ScheduleServiceComponentParameters { semester_start })
    }

    async fn load_all(&self) -> TimetableResult<Vec<ScheduleDto>> {
        let schedules = to_dtos(self.schedule_repository.find_all().await?);
        self.cache.put_schedule_list(cache_keys::FIND_ALL, schedules.clone());
        Ok(schedules)
    }

    async fn ensure_group_exists(&self, group_id: GroupId) -> TimetableResult<()> {
        if self.group_repository.exists_by_id(group_id).await? {
            Ok(())
        } else {
            Err(TimetableError::not_found("Group", group_id))
        }
    }

    fn validated(dto: &ScheduleDto) -> TimetableResult<NewSchedule> {
        dto.validate_request()?;
        dto.to_new_schedule()
            .ok_or_else(|| TimetableError::validation("groupId: Group ID cannot be null"))
    }

    /// Validates a DTO and checks that its group exists.
    async fn prepare(&self, dto: &ScheduleDto) -> TimetableResult<NewSchedule> {
        let schedule = Self::validated(dto)?;
        self.ensure_group_exists(schedule.group_id).await?;
        Ok(schedule)
    }

    /// Resolves the stored schedule a DTO updates. The schedule is looked up
    /// before its group.
    async fn prepare_update(&self, id: ScheduleId, dto: &ScheduleDto) -> TimetableResult<Schedule> {
        let changes = Self::validated(dto)?;

        if !self.schedule_repository.exists_by_id(id).await? {
            return Err(TimetableError::not_found("Schedule", id));
        }
        self.ensure_group_exists(changes.group_id).await?;

        Ok(changes.into_schedule(id))
    }

    async fn cache_bulk_result(&self, schedules: &[ScheduleDto]) -> TimetableResult<()> {
        for dto in schedules {
            if let Some(id) = dto.id {
                self.cache.put_schedule(id, dto.clone());
            }
        }

        self.load_all().await?;
        Ok(())
    }

    fn clear_caches(&self) {
        self.cache.clear_schedule_cache();
        self.cache.clear_group_cache();
    }

    fn lesson_to_dto(lesson: &FeedLesson, group_id: GroupId, group_number: &str, date: &str) -> ScheduleDto {
        ScheduleDto {
            id: None,
            subject: lesson.subject_full_name.clone().unwrap_or_default(),
            lesson_type: lesson.lesson_type_abbrev.clone().unwrap_or_default(),
            time: lesson.time_range(),
            auditorium: lesson.first_auditorium(),
            group_id: Some(group_id),
            group_number: Some(group_number.to_string()),
            date: Some(date.to_string()),
        }
    }
}

fn to_dtos(schedules: Vec<Schedule>) -> Vec<ScheduleDto> {
    schedules.into_iter().map(ScheduleDto::from).collect()
}

#[async_trait]
impl ScheduleService for ScheduleServiceComponent {
    async fn find_all(&self) -> TimetableResult<Vec<ScheduleDto>> {
        self.request_counter.increment();
        debug!("Finding all schedules");

        if let Some(schedules) = self.cache.get_schedule_list(cache_keys::FIND_ALL) {
            return Ok(schedules);
        }

        self.load_all().await
    }

    async fn find_by_id(&self, id: ScheduleId) -> TimetableResult<ScheduleDto> {
        self.request_counter.increment();
        debug!("Finding schedule: {}", id);

        if let Some(schedule) = self.cache.get_schedule(id) {
            return Ok(schedule);
        }

        let schedule = self
            .schedule_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| TimetableError::not_found("Schedule", id))?;

        let dto = ScheduleDto::from(schedule);
        self.cache.put_schedule(id, dto.clone());
        Ok(dto)
    }

    async fn find_by_group_id(&self, group_id: GroupId) -> TimetableResult<Vec<ScheduleDto>> {
        self.request_counter.increment();
        debug!("Finding schedules of group: {}", group_id);

        let key = cache_keys::schedules_by_group_id(group_id);
        if let Some(schedules) = self.cache.get_schedule_list(&key) {
            return Ok(schedules);
        }

        let schedules = to_dtos(self.schedule_repository.find_by_group_id(group_id).await?);
        self.cache.put_schedule_list(&key, schedules.clone());
        Ok(schedules)
    }

    async fn find_by_group_number_and_date(
        &self,
        group_number: &str,
        date: &str,
    ) -> TimetableResult<Vec<ScheduleDto>> {
        self.request_counter.increment();
        debug!("Finding schedules of group {} on {}", group_number, date);

        let key = cache_keys::schedules_by_group_number_and_date(group_number, date);
        if let Some(schedules) = self.cache.get_schedule_list(&key) {
            return Ok(schedules);
        }

        let schedules = to_dtos(
            self.schedule_repository
                .find_by_group_number_and_date(group_number, date)
                .await?,
        );
        self.cache.put_schedule_list(&key, schedules.clone());
        Ok(schedules)
    }

    async fn get_schedule(&self, group_number: &str, date: &str) -> TimetableResult<Vec<ScheduleDto>> {
        self.request_counter.increment();
        debug!("Getting external schedule of group {} on {}", group_number, date);

        let key = cache_keys::external_schedule(group_number, date);
        if let Some(schedules) = self.cache.get_schedule_list(&key) {
            return Ok(schedules);
        }

        let target = NaiveDate::parse_from_str(date, ISO_DATE_FORMAT).map_err(|_| {
            TimetableError::validation(format!("date: '{}' is not a yyyy-MM-dd date", date))
        })?;

        let group = self
            .group_repository
            .find_by_group_number(group_number)
            .await?
            .ok_or_else(|| TimetableError::group_number_not_found(group_number))?;

        let feed = self.feed_client.fetch(group_number).await?;
        if feed.is_empty() {
            debug!("Schedule feed for group {} is empty", group_number);
            return Ok(Vec::new());
        }

        let schedules: Vec<ScheduleDto> = feed
            .lessons_on(localized_day_name(target.weekday()))
            .iter()
            .filter(|lesson| lesson_applies(lesson, target, self.semester_start))
            .map(|lesson| Self::lesson_to_dto(lesson, group.id, group_number, date))
            .collect();

        info!(
            "Fetched {} lessons for group {} on {}",
            schedules.len(),
            group_number,
            date
        );
        self.cache.put_schedule_list(&key, schedules.clone());
        Ok(schedules)
    }

    async fn create(&self, dto: ScheduleDto) -> TimetableResult<ScheduleDto> {
        self.request_counter.increment();
        debug!("Creating schedule: {}", dto.subject);

        let schedule = self.prepare(&dto).await?;
        let saved = self.schedule_repository.save(&schedule).await?;

        info!("Schedule created: {} for group {}", saved.id, saved.group_id);
        let result = ScheduleDto::from(saved);
        self.clear_caches();
        Ok(result)
    }

    async fn update(&self, id: ScheduleId, dto: ScheduleDto) -> TimetableResult<ScheduleDto> {
        self.request_counter.increment();
        debug!("Updating schedule: {}", id);

        let schedule = self.prepare_update(id, &dto).await?;
        let updated = self.schedule_repository.update(&schedule).await?;

        info!("Schedule updated: {}", id);
        let result = ScheduleDto::from(updated);
        self.clear_caches();
        Ok(result)
    }

    async fn delete(&self, id: ScheduleId) -> TimetableResult<()> {
        self.request_counter.increment();
        debug!("Deleting schedule: {}", id);

        if !self.schedule_repository.exists_by_id(id).await? {
            return Err(TimetableError::not_found("Schedule", id));
        }

        self.schedule_repository.delete_by_id(id).await?;

        info!("Schedule deleted: {}", id);
        self.clear_caches();
        Ok(())
    }

    async fn create_bulk(&self, dtos: Vec<ScheduleDto>) -> TimetableResult<Vec<ScheduleDto>> {
        self.request_counter.increment();
        debug!("Creating {} schedules", dtos.len());

        let mut schedules = Vec::with_capacity(dtos.len());
        for dto in &dtos {
            schedules.push(self.prepare(dto).await?);
        }

        let saved = self.schedule_repository.save_all(&schedules).await?;

        info!("Schedules created: {}", saved.len());
        self.clear_caches();

        let result = to_dtos(saved);
        self.cache_bulk_result(&result).await?;
        Ok(result)
    }

    async fn update_bulk(&self, dtos: Vec<ScheduleDto>) -> TimetableResult<Vec<ScheduleDto>> {
        self.request_counter.increment();
        debug!("Updating {} schedules", dtos.len());

        let mut schedules = Vec::with_capacity(dtos.len());
        for dto in &dtos {
            let id = dto.id.ok_or_else(|| {
                TimetableError::validation("Schedule ID is required for bulk update")
            })?;
            schedules.push(self.prepare_update(id, dto).await?);
        }

        let updated = self.schedule_repository.update_all(&schedules).await?;

        info!("Schedules updated: {}", updated.len());
        self.clear_caches();

        let result = to_dtos(updated);
        self.cache_bulk_result(&result).await?;
        Ok(result)
    }
}

impl std::fmt::Debug for ScheduleServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleServiceComponent")
            .field("semester_start", &self.semester_start)
            .finish_non_exhaustive()
    }
}
