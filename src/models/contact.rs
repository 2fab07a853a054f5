//! Contact entity model
//!
//! Messages submitted through the public contact form.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Contact entity representing a contact-form submission
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    /// Unique identifier for the message (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Sender name
    pub name: String,

    /// Sender email
    pub email: String,

    /// Message subject (optional)
    pub subject: Option<String>,

    /// Message body
    #[sea_orm(column_type = "Text")]
    pub message: String,

    /// Whether the message has been read in the dashboard
    pub is_read: bool,

    /// Timestamp when the message was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the message was last updated
    pub updated_at: DateTimeWithTimeZone,

    /// Soft-delete marker
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
