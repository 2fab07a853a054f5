//! Video entity model
//!
//! Hosted performance recordings embedded on the public site.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Video entity representing an embedded performance recording
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "videos")]
pub struct Model {
    /// Unique identifier for the video (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Video title
    pub title: String,

    /// Long-form description (optional)
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// URL of the hosted video
    pub video_url: String,

    /// Thumbnail image URL (optional)
    pub thumbnail_url: Option<String>,

    /// Whether the video is highlighted on the landing page
    pub is_featured: bool,

    /// Timestamp when the video was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the video was last updated
    pub updated_at: DateTimeWithTimeZone,

    /// Soft-delete marker
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
