//! SpecialProgram entity model
//!
//! Seasonal or outreach programs with a bounded date range.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::{Date, DateTimeWithTimeZone};

/// SpecialProgram entity representing a seasonal or outreach program
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "special_programs")]
pub struct Model {
    /// Unique identifier for the program (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Program title
    pub title: String,

    /// Long-form description
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// First day of the program
    pub start_date: Date,

    /// Last day of the program; never before start_date
    pub end_date: Date,

    /// Banner image URL at the media host (optional)
    pub image_url: Option<String>,

    /// Whether the program is visible on the public site
    pub is_active: bool,

    /// Timestamp when the program was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the program was last updated
    pub updated_at: DateTimeWithTimeZone,

    /// Soft-delete marker
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
