//! Schedule entity model
//!
//! Internal choir calendar entries (rehearsals, performances, meetings) with
//! month-grouped and upcoming read views layered on top.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::{Date, DateTimeWithTimeZone};

/// Schedule statuses accepted by the API.
pub const STATUSES: &[&str] = &[
    "tentative",
    "confirmed",
    "in_progress",
    "completed",
    "cancelled",
];

/// Schedule kinds accepted by the API.
pub const TYPES: &[&str] = &["rehearsal", "performance", "meeting"];

/// Schedule entity representing an internal calendar entry
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    /// Unique identifier for the schedule entry (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Entry title
    pub title: String,

    /// Long-form description (optional)
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Calendar date of the entry
    pub schedule_date: Date,

    /// Start time as an HH:MM clock string
    pub start_time: String,

    /// End time as an HH:MM clock string (optional)
    pub end_time: Option<String>,

    /// Venue name or address (optional)
    pub location: Option<String>,

    /// Entry kind: rehearsal, performance or meeting
    pub schedule_type: String,

    /// Current status: tentative, confirmed, in_progress, completed or cancelled
    pub status: String,

    /// Stamped the first time the status is set to completed
    pub completed_at: Option<DateTimeWithTimeZone>,

    /// Timestamp when the entry was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the entry was last updated
    pub updated_at: DateTimeWithTimeZone,

    /// Soft-delete marker
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
