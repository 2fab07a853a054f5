//! # Booking Repository
//!
//! Repository implementation for Booking entities. Status updates stamp
//! `confirmed_at`/`completed_at` as side effects; an already-set timestamp is
//! never overwritten.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};

use crate::models::booking::{
    ActiveModel as BookingActiveModel, Column, Entity as Booking, Model as BookingModel,
};

/// Data for creating a new booking.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub client_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub message: Option<String>,
    pub commission_id: Option<i32>,
}

/// Partial update applied field-by-field; absent fields keep prior values.
#[derive(Debug, Clone, Default)]
pub struct BookingPatch {
    pub client_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub event_type: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub message: Option<String>,
    pub status: Option<String>,
    pub commission_id: Option<i32>,
}

/// Optional list filters.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<String>,
    pub commission_id: Option<i32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Repository for Booking database operations
pub struct BookingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BookingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// List bookings ordered by `created_at` descending, excluding
    /// soft-deleted rows.
    pub async fn list(&self, filter: BookingFilter) -> Result<Vec<BookingModel>, DbErr> {
        let mut query = Booking::find().filter(Column::DeletedAt.is_null());

        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }
        if let Some(commission_id) = filter.commission_id {
            query = query.filter(Column::CommissionId.eq(commission_id));
        }
        if let Some(from) = filter.from {
            query = query.filter(Column::EventDate.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(Column::EventDate.lte(to));
        }

        query.order_by_desc(Column::CreatedAt).all(self.db).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<BookingModel>, DbErr> {
        Booking::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    /// Get a booking joined with the commission it came from, if any.
    pub async fn find_with_commission(
        &self,
        id: i32,
    ) -> Result<Option<(BookingModel, Option<crate::models::commission::Model>)>, DbErr> {
        let mut rows = Booking::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .find_also_related(crate::models::Commission)
            .all(self.db)
            .await?;
        Ok(rows.pop())
    }

    pub async fn create(&self, data: CreateBooking) -> Result<BookingModel, DbErr> {
        let now = Utc::now();

        let booking = BookingActiveModel {
            client_name: Set(data.client_name),
            email: Set(data.email),
            phone: Set(data.phone),
            event_type: Set(data.event_type),
            event_date: Set(data.event_date),
            message: Set(data.message),
            status: Set("pending".to_string()),
            commission_id: Set(data.commission_id),
            confirmed_at: Set(None),
            completed_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            deleted_at: Set(None),
            ..Default::default()
        };

        booking.insert(self.db).await
    }

    /// Apply a partial patch. Setting the status to a terminal value stamps
    /// the matching timestamp if it is not already set; repeating the update
    /// leaves the earlier stamp untouched.
    pub async fn update(&self, id: i32, patch: BookingPatch) -> Result<Option<BookingModel>, DbErr> {
        let Some(booking) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let confirmed_at = booking.confirmed_at;
        let completed_at = booking.completed_at;

        let mut active = booking.into_active_model();
        if let Some(client_name) = patch.client_name {
            active.client_name = Set(client_name);
        }
        if let Some(email) = patch.email {
            active.email = Set(email);
        }
        if let Some(phone) = patch.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(event_type) = patch.event_type {
            active.event_type = Set(event_type);
        }
        if let Some(event_date) = patch.event_date {
            active.event_date = Set(event_date);
        }
        if let Some(message) = patch.message {
            active.message = Set(Some(message));
        }
        if let Some(commission_id) = patch.commission_id {
            active.commission_id = Set(Some(commission_id));
        }
        if let Some(status) = patch.status {
            if status == "confirmed" && confirmed_at.is_none() {
                active.confirmed_at = Set(Some(Utc::now().into()));
            }
            if status == "completed" && completed_at.is_none() {
                active.completed_at = Set(Some(Utc::now().into()));
            }
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now().into());

        active.update(self.db).await.map(Some)
    }

    pub async fn soft_delete(&self, id: i32) -> Result<Option<BookingModel>, DbErr> {
        let Some(booking) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = booking.into_active_model();
        active.deleted_at = Set(Some(Utc::now().into()));
        active.updated_at = Set(Utc::now().into());
        active.update(self.db).await.map(Some)
    }

    pub async fn restore(&self, id: i32) -> Result<Option<BookingModel>, DbErr> {
        let Some(booking) = Booking::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = booking.into_active_model();
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

    fn wedding() -> CreateBooking {
        CreateBooking {
            client_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            event_type: "wedding".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 9, 20).unwrap(),
            message: Some("Afternoon ceremony".to_string()),
            commission_id: None,
        }
    }

    #[tokio::test]
    async fn new_bookings_start_pending() {
        let db = setup_test_db().await;
        let repo = BookingRepository::new(&db);

        let booking = repo.create(wedding()).await.unwrap();
        assert_eq!(booking.status, "pending");
        assert!(booking.confirmed_at.is_none());
        assert!(booking.completed_at.is_none());
    }

    #[tokio::test]
    async fn confirming_stamps_timestamp_exactly_once() {
        let db = setup_test_db().await;
        let repo = BookingRepository::new(&db);

        let booking = repo.create(wedding()).await.unwrap();

        let confirmed = repo
            .update(
                booking.id,
                BookingPatch {
                    status: Some("confirmed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        let first_stamp = confirmed.confirmed_at.unwrap();

        // Repeating the update must not move the stamp.
        let again = repo
            .update(
                booking.id,
                BookingPatch {
                    status: Some("confirmed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(again.confirmed_at.unwrap(), first_stamp);

        // Bouncing through another status and back also keeps it.
        repo.update(
            booking.id,
            BookingPatch {
                status: Some("pending".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let reconfirmed = repo
            .update(
                booking.id,
                BookingPatch {
                    status: Some("confirmed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reconfirmed.confirmed_at.unwrap(), first_stamp);
    }

    #[tokio::test]
    async fn status_filter_and_order() {
        let db = setup_test_db().await;
        let repo = BookingRepository::new(&db);

        let first = repo.create(wedding()).await.unwrap();
        let second = repo.create(wedding()).await.unwrap();
        repo.update(
            first.id,
            BookingPatch {
                status: Some("confirmed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let pending = repo
            .list(BookingFilter {
                status: Some("pending".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, second.id);

        let all = repo.list(BookingFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        // Newest first
        assert!(all[0].created_at >= all[1].created_at);
    }

    #[tokio::test]
    async fn join_resolves_source_commission() {
        let db = setup_test_db().await;
        let commissions = crate::repositories::CommissionRepository::new(&db);
        let commission = commissions
            .create(crate::repositories::commission::CreateCommission {
                client_name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: None,
                commission_type: "performance".to_string(),
                description: "Choir for a gala".to_string(),
                budget: Some(1500.0),
            })
            .await
            .unwrap();

        let repo = BookingRepository::new(&db);
        let mut data = wedding();
        data.commission_id = Some(commission.id);
        let booking = repo.create(data).await.unwrap();

        let (found, joined) = repo
            .find_with_commission(booking.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, booking.id);
        assert_eq!(joined.unwrap().id, commission.id);
    }
}
