//! Event entity model
//!
//! Public concerts and appearances shown on the site, optionally tied to the
//! user who organized them.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::{Date, DateTimeWithTimeZone};

/// Event entity representing a public concert or appearance
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    /// Unique identifier for the event (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Event title
    pub title: String,

    /// Long-form description
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Calendar date of the event
    pub event_date: Date,

    /// Start time as an HH:MM clock string
    pub start_time: String,

    /// End time as an HH:MM clock string (optional)
    pub end_time: Option<String>,

    /// Venue name or address
    pub location: String,

    /// Venue kind: indoor or outdoor
    pub venue_type: String,

    /// Poster image URL at the media host (optional)
    pub image_url: Option<String>,

    /// Whether the event is visible on the public site
    pub is_active: bool,

    /// Whether the event is highlighted on the landing page
    pub is_featured: bool,

    /// User who organized the event (optional)
    pub organizer_id: Option<i32>,

    /// Timestamp when the event was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the event was last updated
    pub updated_at: DateTimeWithTimeZone,

    /// Soft-delete marker
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OrganizerId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
