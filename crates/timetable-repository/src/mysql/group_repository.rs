//! MySQL student group repository implementation.

use super::schedule_repository::{last_insert_id, ScheduleRow, SCHEDULE_COLUMNS};
use crate::{traits::GroupRepository, DatabasePoolInterface};
use async_trait::async_trait;
use shaku::Component;
use sqlx::{FromRow, MySql, QueryBuilder};
use std::collections::HashMap;
use std::sync::Arc;
use timetable_core::{Group, GroupId, NewGroup, Schedule, TimetableError, TimetableResult};
use tracing::debug;

/// MySQL student group repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = GroupRepository)]
pub struct MySqlGroupRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

/// Database row representation of a group.
#[derive(Debug, FromRow)]
struct GroupRow {
    id: i64,
    group_number: String,
}

impl MySqlGroupRepository {
    /// Creates a new MySQL group repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    /// Loads the schedules of the given rows and assembles groups.
    async fn with_schedules(&self, rows: Vec<GroupRow>) -> TimetableResult<Vec<Group>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<'_, MySql> = QueryBuilder::new(format!(
            "SELECT {SCHEDULE_COLUMNS} FROM schedules s WHERE s.group_id IN ("
        ));
        let mut separated = query.separated(", ");
        for row in &rows {
            separated.push_bind(row.id);
        }
        separated.push_unseparated(") ORDER BY s.id");

        let schedule_rows = query
            .build_query_as::<ScheduleRow>()
            .fetch_all(self.pool.inner())
            .await?;

        Ok(assemble(rows, schedule_rows.into_iter().map(Schedule::from)))
    }

    async fn find_by_ids(&self, ids: &[GroupId]) -> TimetableResult<Vec<Group>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<'_, MySql> =
            QueryBuilder::new("SELECT id, group_number FROM student_groups WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id.into_inner());
        }
        separated.push_unseparated(") ORDER BY id");

        let rows = query
            .build_query_as::<GroupRow>()
            .fetch_all(self.pool.inner())
            .await?;

        self.with_schedules(rows).await
    }
}

/// Distributes schedules to their owning groups, preserving row order.
fn assemble(rows: Vec<GroupRow>, schedules: impl IntoIterator<Item = Schedule>) -> Vec<Group> {
    let mut by_group: HashMap<GroupId, Vec<Schedule>> = HashMap::new();
    for schedule in schedules {
        by_group.entry(schedule.group_id).or_default().push(schedule);
    }

    rows.into_iter()
        .map(|row| {
            let id = GroupId::new(row.id);
            let schedules = by_group.remove(&id).unwrap_or_default();
            Group::new(id, row.group_number).with_schedules(schedules)
        })
        .collect()
}

#[async_trait]
impl GroupRepository for MySqlGroupRepository {
    async fn find_all(&self) -> TimetableResult<Vec<Group>> {
        debug!("Repository: finding all groups");

        let rows = sqlx::query_as::<_, GroupRow>(
            "SELECT id, group_number FROM student_groups ORDER BY id",
        )
        .fetch_all(self.pool.inner())
        .await?;

        self.with_schedules(rows).await
    }

    async fn find_by_id(&self, id: GroupId) -> TimetableResult<Option<Group>> {
        debug!("Repository: finding group by id: {}", id);

        let row = sqlx::query_as::<_, GroupRow>(
            "SELECT id, group_number FROM student_groups WHERE id = ?",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        match row {
            Some(row) => Ok(self.with_schedules(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn find_by_group_number(&self, group_number: &str) -> TimetableResult<Option<Group>> {
        debug!("Repository: finding group by number: {}", group_number);

        let row = sqlx::query_as::<_, GroupRow>(
            "SELECT id, group_number FROM student_groups WHERE group_number = ?",
        )
        .bind(group_number)
        .fetch_optional(self.pool.inner())
        .await?;

        match row {
            Some(row) => Ok(self.with_schedules(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn exists_by_id(&self, id: GroupId) -> TimetableResult<bool> {
        let result: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM student_groups WHERE id = ? LIMIT 1")
                .bind(id.into_inner())
                .fetch_optional(self.pool.inner())
                .await?;

        Ok(result.is_some())
    }

    async fn save(&self, group: &NewGroup) -> TimetableResult<Group> {
        debug!("Repository: saving new group: {}", group.group_number);

        let result = sqlx::query("INSERT INTO student_groups (group_number) VALUES (?)")
            .bind(&group.group_number)
            .execute(self.pool.inner())
            .await?;

        let id = GroupId::new(last_insert_id(result.last_insert_id())?);
        Ok(Group::new(id, group.group_number.clone()))
    }

    async fn save_all(&self, groups: &[NewGroup]) -> TimetableResult<Vec<Group>> {
        debug!("Repository: saving {} groups", groups.len());

        let mut tx = self.pool.inner().begin().await?;
        let mut saved = Vec::with_capacity(groups.len());

        for group in groups {
            let result = sqlx::query("INSERT INTO student_groups (group_number) VALUES (?)")
                .bind(&group.group_number)
                .execute(&mut *tx)
                .await?;

            let id = GroupId::new(last_insert_id(result.last_insert_id())?);
            saved.push(Group::new(id, group.group_number.clone()));
        }

        tx.commit().await?;
        Ok(saved)
    }

    async fn update(&self, group: &Group) -> TimetableResult<Group> {
        debug!("Repository: updating group: {}", group.id);

        sqlx::query("UPDATE student_groups SET group_number = ? WHERE id = ?")
            .bind(&group.group_number)
            .bind(group.id.into_inner())
            .execute(self.pool.inner())
            .await?;

        self.find_by_id(group.id)
            .await?
            .ok_or_else(|| TimetableError::not_found("Group", group.id))
    }

    async fn update_all(&self, groups: &[Group]) -> TimetableResult<Vec<Group>> {
        debug!("Repository: updating {} groups", groups.len());

        let mut tx = self.pool.inner().begin().await?;

        for group in groups {
            sqlx::query("UPDATE student_groups SET group_number = ? WHERE id = ?")
                .bind(&group.group_number)
                .bind(group.id.into_inner())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        let ids: Vec<GroupId> = groups.iter().map(|g| g.id).collect();
        self.find_by_ids(&ids).await
    }

    async fn delete_by_id(&self, id: GroupId) -> TimetableResult<bool> {
        debug!("Repository: deleting group: {}", id);

        let result = sqlx::query("DELETE FROM student_groups WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlGroupRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlGroupRepository").finish_non_exhaustive()
    }
}
