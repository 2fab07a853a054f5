//! Booking entity model
//!
//! Requests to book the choir for an event, optionally linked to a
//! commission. Terminal status changes stamp their timestamps exactly once.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::{Date, DateTimeWithTimeZone};

/// Booking statuses accepted by the API.
pub const STATUSES: &[&str] = &["pending", "confirmed", "completed", "cancelled"];

/// Booking entity representing a performance booking request
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    /// Unique identifier for the booking (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Name of the requesting client
    pub client_name: String,

    /// Client contact email
    pub email: String,

    /// Client phone number (optional)
    pub phone: Option<String>,

    /// Kind of event the choir is booked for (e.g. wedding, gala)
    pub event_type: String,

    /// Calendar date of the booked event
    pub event_date: Date,

    /// Free-form message from the client (optional)
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,

    /// Current status: pending, confirmed, completed or cancelled
    pub status: String,

    /// Commission this booking came from (optional)
    pub commission_id: Option<i32>,

    /// Stamped the first time the status is set to confirmed
    pub confirmed_at: Option<DateTimeWithTimeZone>,

    /// Stamped the first time the status is set to completed
    pub completed_at: Option<DateTimeWithTimeZone>,

    /// Timestamp when the booking was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the booking was last updated
    pub updated_at: DateTimeWithTimeZone,

    /// Soft-delete marker
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::commission::Entity",
        from = "Column::CommissionId",
        to = "super::commission::Column::Id"
    )]
    Commission,
}

impl Related<super::commission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Commission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
