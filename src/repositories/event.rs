//! # Event Repository
//!
//! Repository implementation for Event entities, including the date-range
//! and flag filters used by the public listing pages.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};

use crate::models::event::{ActiveModel as EventActiveModel, Column, Entity as Event, Model as EventModel};

/// Data for creating a new event.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: Option<String>,
    pub location: String,
    pub venue_type: String,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub organizer_id: Option<i32>,
}

/// Partial update applied field-by-field; absent fields keep prior values.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub venue_type: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub organizer_id: Option<i32>,
}

/// Optional list filters.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub venue_type: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Repository for Event database operations
pub struct EventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// List events by ascending date, excluding soft-deleted rows.
    pub async fn list(&self, filter: EventFilter) -> Result<Vec<EventModel>, DbErr> {
        let mut query = Event::find().filter(Column::DeletedAt.is_null());

        if let Some(is_active) = filter.is_active {
            query = query.filter(Column::IsActive.eq(is_active));
        }
        if let Some(is_featured) = filter.is_featured {
            query = query.filter(Column::IsFeatured.eq(is_featured));
        }
        if let Some(venue_type) = filter.venue_type {
            query = query.filter(Column::VenueType.eq(venue_type));
        }
        if let Some(from) = filter.from {
            query = query.filter(Column::EventDate.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(Column::EventDate.lte(to));
        }

        query
            .order_by_asc(Column::EventDate)
            .order_by_asc(Column::StartTime)
            .all(self.db)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<EventModel>, DbErr> {
        Event::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    pub async fn create(&self, data: CreateEvent) -> Result<EventModel, DbErr> {
        let now = Utc::now();

        let event = EventActiveModel {
            title: Set(data.title),
            description: Set(data.description),
            event_date: Set(data.event_date),
            start_time: Set(data.start_time),
            end_time: Set(data.end_time),
            location: Set(data.location),
            venue_type: Set(data.venue_type),
            image_url: Set(data.image_url),
            is_active: Set(data.is_active.unwrap_or(true)),
            is_featured: Set(data.is_featured.unwrap_or(false)),
            organizer_id: Set(data.organizer_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            deleted_at: Set(None),
            ..Default::default()
        };

        event.insert(self.db).await
    }

    pub async fn update(&self, id: i32, patch: EventPatch) -> Result<Option<EventModel>, DbErr> {
        let Some(event) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = event.into_active_model();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(event_date) = patch.event_date {
            active.event_date = Set(event_date);
        }
        if let Some(start_time) = patch.start_time {
            active.start_time = Set(start_time);
        }
        if let Some(end_time) = patch.end_time {
            active.end_time = Set(Some(end_time));
        }
        if let Some(location) = patch.location {
            active.location = Set(location);
        }
        if let Some(venue_type) = patch.venue_type {
            active.venue_type = Set(venue_type);
        }
        if let Some(image_url) = patch.image_url {
            active.image_url = Set(Some(image_url));
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(is_featured) = patch.is_featured {
            active.is_featured = Set(is_featured);
        }
        if let Some(organizer_id) = patch.organizer_id {
            active.organizer_id = Set(Some(organizer_id));
        }
        active.updated_at = Set(Utc::now().into());

        active.update(self.db).await.map(Some)
    }

    pub async fn soft_delete(&self, id: i32) -> Result<Option<EventModel>, DbErr> {
        let Some(event) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = event.into_active_model();
        active.deleted_at = Set(Some(Utc::now().into()));
        active.updated_at = Set(Utc::now().into());
        active.update(self.db).await.map(Some)
    }

    pub async fn restore(&self, id: i32) -> Result<Option<EventModel>, DbErr> {
        let Some(event) = Event::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = event.into_active_model();
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

    fn gala(date: NaiveDate) -> CreateEvent {
        CreateEvent {
            title: "Gala".to_string(),
            description: "Annual gala concert".to_string(),
            event_date: date,
            start_time: "19:00".to_string(),
            end_time: None,
            location: "Hall".to_string(),
            venue_type: "indoor".to_string(),
            image_url: None,
            is_active: None,
            is_featured: None,
            organizer_id: None,
        }
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let db = setup_test_db().await;
        let repo = EventRepository::new(&db);

        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let event = repo.create(gala(date)).await.unwrap();

        assert!(event.is_active);
        assert!(!event.is_featured);
        assert_eq!(event.start_time, "19:00");
    }

    #[tokio::test]
    async fn list_filters_by_date_range_and_venue() {
        let db = setup_test_db().await;
        let repo = EventRepository::new(&db);

        let june = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let december = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        repo.create(gala(june)).await.unwrap();
        let mut outdoor = gala(december);
        outdoor.venue_type = "outdoor".to_string();
        repo.create(outdoor).await.unwrap();

        let summer_only = repo
            .list(EventFilter {
                from: Some(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
                to: Some(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(summer_only.len(), 1);
        assert_eq!(summer_only[0].event_date, june);

        let outdoor_only = repo
            .list(EventFilter {
                venue_type: Some("outdoor".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(outdoor_only.len(), 1);
        assert_eq!(outdoor_only[0].event_date, december);
    }
}
