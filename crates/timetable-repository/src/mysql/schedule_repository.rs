//! MySQL schedule repository implementation.

use crate::{traits::ScheduleRepository, DatabasePoolInterface};
use async_trait::async_trait;
use shaku::Component;
use sqlx::{FromRow, MySql, QueryBuilder};
use std::sync::Arc;
use timetable_core::{
    GroupId, NewSchedule, Schedule, ScheduleId, TimetableError, TimetableResult,
};
use tracing::debug;

pub(crate) const SCHEDULE_COLUMNS: &str =
    "s.id, s.subject, s.lesson_type, s.`time`, s.auditorium, s.group_id";

/// MySQL schedule repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = ScheduleRepository)]
pub struct MySqlScheduleRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlScheduleRepository {
    /// Creates a new MySQL schedule repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn find_by_ids(&self, ids: &[ScheduleId]) -> TimetableResult<Vec<Schedule>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<'_, MySql> = QueryBuilder::new(format!(
            "SELECT {SCHEDULE_COLUMNS} FROM schedules s WHERE s.id IN ("
        ));
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id.into_inner());
        }
        separated.push_unseparated(") ORDER BY s.id");

        let rows = query
            .build_query_as::<ScheduleRow>()
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Schedule::from).collect())
    }
}

/// Database row representation of a schedule entry.
#[derive(Debug, FromRow)]
pub(crate) struct ScheduleRow {
    id: i64,
    subject: String,
    lesson_type: String,
    time: String,
    auditorium: String,
    group_id: i64,
}

impl From<ScheduleRow> for Schedule {
    fn from(row: ScheduleRow) -> Self {
        Schedule {
            id: ScheduleId::new(row.id),
            subject: row.subject,
            lesson_type: row.lesson_type,
            time: row.time,
            auditorium: row.auditorium,
            group_id: GroupId::new(row.group_id),
        }
    }
}

pub(crate) fn last_insert_id(id: u64) -> TimetableResult<i64> {
    i64::try_from(id).map_err(|_| TimetableError::internal(format!("Generated id out of range: {id}")))
}

#[async_trait]
impl ScheduleRepository for MySqlScheduleRepository {
    async fn find_all(&self) -> TimetableResult<Vec<Schedule>> {
        debug!("Repository: finding all schedules");

        let rows = sqlx::query_as::<_, ScheduleRow>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM schedules s ORDER BY s.id"
        ))
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Schedule::from).collect())
    }

    async fn find_by_id(&self, id: ScheduleId) -> TimetableResult<Option<Schedule>> {
        debug!("Repository: finding schedule by id: {}", id);

        let row = sqlx::query_as::<_, ScheduleRow>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM schedules s WHERE s.id = ?"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Schedule::from))
    }

    async fn find_by_group_id(&self, group_id: GroupId) -> TimetableResult<Vec<Schedule>> {
        debug!("Repository: finding schedules by group id: {}", group_id);

        let rows = sqlx::query_as::<_, ScheduleRow>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM schedules s WHERE s.group_id = ? ORDER BY s.id"
        ))
        .bind(group_id.into_inner())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Schedule::from).collect())
    }

    async fn find_by_group_number_and_date(
        &self,
        group_number: &str,
        date: &str,
    ) -> TimetableResult<Vec<Schedule>> {
        debug!(
            "Repository: finding schedules by group number {} and date {}",
            group_number, date
        );

        let rows = sqlx::query_as::<_, ScheduleRow>(&format!(
            r#"
            SELECT {SCHEDULE_COLUMNS}
            FROM schedules s
            JOIN student_groups g ON g.id = s.group_id
            WHERE g.group_number = ? AND s.`time` LIKE CONCAT('%', ?, '%')
            ORDER BY s.id
            "#
        ))
        .bind(group_number)
        .bind(date)
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Schedule::from).collect())
    }

    async fn exists_by_id(&self, id: ScheduleId) -> TimetableResult<bool> {
        let result: Option<i32> = sqlx::query_scalar("SELECT 1 FROM schedules WHERE id = ? LIMIT 1")
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(result.is_some())
    }

    async fn save(&self, schedule: &NewSchedule) -> TimetableResult<Schedule> {
        debug!("Repository: saving schedule '{}' for group {}", schedule.subject, schedule.group_id);

        let result = sqlx::query(
            r#"
            INSERT INTO schedules (subject, lesson_type, `time`, auditorium, group_id)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&schedule.subject)
        .bind(&schedule.lesson_type)
        .bind(&schedule.time)
        .bind(&schedule.auditorium)
        .bind(schedule.group_id.into_inner())
        .execute(self.pool.inner())
        .await?;

        let id = ScheduleId::new(last_insert_id(result.last_insert_id())?);
        Ok(schedule.clone().into_schedule(id))
    }

    async fn save_all(&self, schedules: &[NewSchedule]) -> TimetableResult<Vec<Schedule>> {
        debug!("Repository: saving {} schedules", schedules.len());

        let mut tx = self.pool.inner().begin().await?;
        let mut saved = Vec::with_capacity(schedules.len());

        for schedule in schedules {
            let result = sqlx::query(
                r#"
                INSERT INTO schedules (subject, lesson_type, `time`, auditorium, group_id)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(&schedule.subject)
            .bind(&schedule.lesson_type)
            .bind(&schedule.time)
            .bind(&schedule.auditorium)
            .bind(schedule.group_id.into_inner())
            .execute(&mut *tx)
            .await?;

            let id = ScheduleId::new(last_insert_id(result.last_insert_id())?);
            saved.push(schedule.clone().into_schedule(id));
        }

        tx.commit().await?;
        Ok(saved)
    }

    async fn update(&self, schedule: &Schedule) -> TimetableResult<Schedule> {
        debug!("Repository: updating schedule: {}", schedule.id);

        sqlx::query(
            r#"
            UPDATE schedules
            SET subject = ?, lesson_type = ?, `time` = ?, auditorium = ?, group_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&schedule.subject)
        .bind(&schedule.lesson_type)
        .bind(&schedule.time)
        .bind(&schedule.auditorium)
        .bind(schedule.group_id.into_inner())
        .bind(schedule.id.into_inner())
        .execute(self.pool.inner())
        .await?;

        self.find_by_id(schedule.id)
            .await?
            .ok_or_else(|| TimetableError::not_found("Schedule", schedule.id))
    }

    async fn update_all(&self, schedules: &[Schedule]) -> TimetableResult<Vec<Schedule>> {
        debug!("Repository: updating {} schedules", schedules.len());

        let mut tx = self.pool.inner().begin().await?;

        for schedule in schedules {
            sqlx::query(
                r#"
                UPDATE schedules
                SET subject = ?, lesson_type = ?, `time` = ?, auditorium = ?, group_id = ?
                WHERE id = ?
                "#,
            )
            .bind(&schedule.subject)
            .bind(&schedule.lesson_type)
            .bind(&schedule.time)
            .bind(&schedule.auditorium)
            .bind(schedule.group_id.into_inner())
            .bind(schedule.id.into_inner())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let ids: Vec<ScheduleId> = schedules.iter().map(|s| s.id).collect();
        self.find_by_ids(&ids).await
    }

    async fn delete_by_id(&self, id: ScheduleId) -> TimetableResult<bool> {
        debug!("Repository: deleting schedule: {}", id);

        let result = sqlx::query("DELETE FROM schedules WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlScheduleRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlScheduleRepository").finish_non_exhaustive()
    }
}
