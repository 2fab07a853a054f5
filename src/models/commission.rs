//! Commission entity model
//!
//! Custom work requested of the choir (arrangements, private performances),
//! submitted through the public site and managed from the dashboard.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Commission statuses accepted by the API.
pub const STATUSES: &[&str] = &["pending", "in_progress", "completed", "cancelled"];

/// Commission entity representing a custom work request
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "commissions")]
pub struct Model {
    /// Unique identifier for the commission (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Name of the requesting client
    pub client_name: String,

    /// Client contact email
    pub email: String,

    /// Client phone number (optional)
    pub phone: Option<String>,

    /// Kind of commission requested (e.g. arrangement, performance)
    pub commission_type: String,

    /// Free-form description of the request
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Offered budget; non-negative when present
    pub budget: Option<f64>,

    /// Current status: pending, in_progress, completed or cancelled
    pub status: String,

    /// Timestamp when the commission was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the commission was last updated
    pub updated_at: DateTimeWithTimeZone,

    /// Soft-delete marker
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booking::Entity")]
    Booking,
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
