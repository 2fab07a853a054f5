//! # Schedule Repository
//!
//! Repository implementation for Schedule entities, including the
//! month-grouped and upcoming calendar views.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};

use crate::models::schedule::{
    ActiveModel as ScheduleActiveModel, Column, Entity as Schedule, Model as ScheduleModel,
};

/// Data for creating a new schedule entry.
#[derive(Debug, Clone)]
pub struct CreateSchedule {
    pub title: String,
    pub description: Option<String>,
    pub schedule_date: NaiveDate,
    pub start_time: String,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub schedule_type: String,
    pub status: Option<String>,
}

/// Partial update applied field-by-field; absent fields keep prior values.
#[derive(Debug, Clone, Default)]
pub struct SchedulePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub schedule_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub schedule_type: Option<String>,
    pub status: Option<String>,
}

/// Optional list filters.
#[derive(Debug, Clone, Default)]
pub struct ScheduleFilter {
    pub status: Option<String>,
    pub schedule_type: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Repository for Schedule database operations
pub struct ScheduleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ScheduleRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, filter: ScheduleFilter) -> Result<Vec<ScheduleModel>, DbErr> {
        let mut query = Schedule::find().filter(Column::DeletedAt.is_null());

        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }
        if let Some(schedule_type) = filter.schedule_type {
            query = query.filter(Column::ScheduleType.eq(schedule_type));
        }
        if let Some(from) = filter.from {
            query = query.filter(Column::ScheduleDate.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(Column::ScheduleDate.lte(to));
        }

        query
            .order_by_asc(Column::ScheduleDate)
            .order_by_asc(Column::StartTime)
            .all(self.db)
            .await
    }

    /// Groups one calendar year's entries under `YYYY-MM` keys.
    ///
    /// `year` defaults to the current year when not given. Keys are
    /// naturally sorted by the BTreeMap, months without entries are absent.
    pub async fn grouped_by_month(
        &self,
        year: Option<i32>,
    ) -> Result<BTreeMap<String, Vec<ScheduleModel>>, DbErr> {
        let year = year.unwrap_or_else(|| Utc::now().year());
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| DbErr::Custom(format!("year {year} out of range")))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| DbErr::Custom(format!("year {year} out of range")))?;

        let rows = self
            .list(ScheduleFilter {
                from: Some(start),
                to: Some(end),
                ..Default::default()
            })
            .await?;

        let mut groups: BTreeMap<String, Vec<ScheduleModel>> = BTreeMap::new();
        for row in rows {
            let key = format!("{:04}-{:02}", row.schedule_date.year(), row.schedule_date.month());
            groups.entry(key).or_default().push(row);
        }
        Ok(groups)
    }

    /// Non-cancelled entries between today and today + `days` inclusive,
    /// ordered by date ascending. `days` defaults to 7; a window the
    /// calendar cannot represent is an error, never a panic.
    pub async fn upcoming(&self, days: Option<i64>) -> Result<Vec<ScheduleModel>, DbErr> {
        let days = days.unwrap_or(7);
        let today = Utc::now().date_naive();
        let horizon = Duration::try_days(days)
            .and_then(|window| today.checked_add_signed(window))
            .ok_or_else(|| DbErr::Custom(format!("upcoming window of {days} days out of range")))?;

        Schedule::find()
            .filter(Column::DeletedAt.is_null())
            .filter(Column::Status.ne("cancelled"))
            .filter(Column::ScheduleDate.gte(today))
            .filter(Column::ScheduleDate.lte(horizon))
            .order_by_asc(Column::ScheduleDate)
            .order_by_asc(Column::StartTime)
            .all(self.db)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<ScheduleModel>, DbErr> {
        Schedule::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    pub async fn create(&self, data: CreateSchedule) -> Result<ScheduleModel, DbErr> {
        let now = Utc::now();

        let schedule = ScheduleActiveModel {
            title: Set(data.title),
            description: Set(data.description),
            schedule_date: Set(data.schedule_date),
            start_time: Set(data.start_time),
            end_time: Set(data.end_time),
            location: Set(data.location),
            schedule_type: Set(data.schedule_type),
            status: Set(data.status.unwrap_or_else(|| "tentative".to_string())),
            completed_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            deleted_at: Set(None),
            ..Default::default()
        };

        schedule.insert(self.db).await
    }

    pub async fn update(
        &self,
        id: i32,
        patch: SchedulePatch,
    ) -> Result<Option<ScheduleModel>, DbErr> {
        let Some(schedule) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let already_completed_at = schedule.completed_at;

        let mut active = schedule.into_active_model();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(description) = patch.description {
            active.description = Set(Some(description));
        }
        if let Some(schedule_date) = patch.schedule_date {
            active.schedule_date = Set(schedule_date);
        }
        if let Some(start_time) = patch.start_time {
            active.start_time = Set(start_time);
        }
        if let Some(end_time) = patch.end_time {
            active.end_time = Set(Some(end_time));
        }
        if let Some(location) = patch.location {
            active.location = Set(Some(location));
        }
        if let Some(schedule_type) = patch.schedule_type {
            active.schedule_type = Set(schedule_type);
        }
        if let Some(status) = patch.status {
            // completed_at is stamped once and never overwritten.
            if status == "completed" && already_completed_at.is_none() {
                active.completed_at = Set(Some(Utc::now().into()));
            }
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now().into());

        active.update(self.db).await.map(Some)
    }

    pub async fn soft_delete(&self, id: i32) -> Result<Option<ScheduleModel>, DbErr> {
        let Some(schedule) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = schedule.into_active_model();
        active.deleted_at = Set(Some(Utc::now().into()));
        active.updated_at = Set(Utc::now().into());
        active.update(self.db).await.map(Some)
    }

    pub async fn restore(&self, id: i32) -> Result<Option<ScheduleModel>, DbErr> {
        let Some(schedule) = Schedule::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = schedule.into_active_model();
        active.deleted_at = Set(None);
        active.updated_at = Set(Utc::now().into());
        active.update(self.db).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::MigratorTrait;
    use sea_orm::Database;

    async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        db
    }

    fn rehearsal_on(date: NaiveDate) -> CreateSchedule {
        CreateSchedule {
            title: format!("Rehearsal {date}"),
            description: None,
            schedule_date: date,
            start_time: "18:30".to_string(),
            end_time: Some("20:30".to_string()),
            location: Some("Main hall".to_string()),
            schedule_type: "rehearsal".to_string(),
            status: None,
        }
    }

    #[tokio::test]
    async fn grouped_by_month_defaults_to_current_year() {
        let db = setup_test_db().await;
        let repo = ScheduleRepository::new(&db);

        let this_year = Utc::now().year();
        let in_march = NaiveDate::from_ymd_opt(this_year, 3, 14).unwrap();
        let also_march = NaiveDate::from_ymd_opt(this_year, 3, 21).unwrap();
        let in_october = NaiveDate::from_ymd_opt(this_year, 10, 2).unwrap();
        let last_year = NaiveDate::from_ymd_opt(this_year - 1, 6, 1).unwrap();

        for date in [in_march, also_march, in_october, last_year] {
            repo.create(rehearsal_on(date)).await.unwrap();
        }

        let groups = repo.grouped_by_month(None).await.unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&format!("{this_year}-03")].len(), 2);
        assert_eq!(groups[&format!("{this_year}-10")].len(), 1);

        // An explicit year returns only that year's rows.
        let previous = repo.grouped_by_month(Some(this_year - 1)).await.unwrap();
        assert_eq!(previous.len(), 1);
        assert_eq!(previous[&format!("{}-06", this_year - 1)].len(), 1);
    }

    #[tokio::test]
    async fn upcoming_window_excludes_cancelled_and_distant() {
        let db = setup_test_db().await;
        let repo = ScheduleRepository::new(&db);

        let today = Utc::now().date_naive();
        let soon = repo.create(rehearsal_on(today + Duration::days(3))).await.unwrap();
        let cancelled = repo
            .create(rehearsal_on(today + Duration::days(2)))
            .await
            .unwrap();
        repo.update(
            cancelled.id,
            SchedulePatch {
                status: Some("cancelled".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        // Outside the default 7-day window.
        repo.create(rehearsal_on(today + Duration::days(12)))
            .await
            .unwrap();
        // Yesterday is in the past.
        repo.create(rehearsal_on(today - Duration::days(1)))
            .await
            .unwrap();

        let window = repo.upcoming(None).await.unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].id, soon.id);

        let wider = repo.upcoming(Some(14)).await.unwrap();
        assert_eq!(wider.len(), 2);
        assert!(wider[0].schedule_date <= wider[1].schedule_date);
    }

    #[tokio::test]
    async fn unrepresentable_upcoming_window_is_an_error() {
        let db = setup_test_db().await;
        let repo = ScheduleRepository::new(&db);

        assert!(repo.upcoming(Some(1_000_000_000_000)).await.is_err());
        assert!(repo.upcoming(Some(i64::MAX)).await.is_err());
        assert!(repo.upcoming(Some(i64::MIN)).await.is_err());
    }

    #[tokio::test]
    async fn completed_at_is_stamped_once() {
        let db = setup_test_db().await;
        let repo = ScheduleRepository::new(&db);

        let entry = repo
            .create(rehearsal_on(Utc::now().date_naive()))
            .await
            .unwrap();
        assert_eq!(entry.status, "tentative");
        assert!(entry.completed_at.is_none());

        let done = repo
            .update(
                entry.id,
                SchedulePatch {
                    status: Some("completed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        let first_stamp = done.completed_at.unwrap();

        // A later bounce through another status keeps the original stamp.
        repo.update(
            entry.id,
            SchedulePatch {
                status: Some("confirmed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let again = repo
            .update(
                entry.id,
                SchedulePatch {
                    status: Some("completed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(again.completed_at.unwrap(), first_stamp);
    }
}
