//! User entity model
//!
//! This module contains the SeaORM entity model for the users table, which
//! stores dashboard accounts with credentials and soft-delete support.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// User entity representing a dashboard account
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Login name, unique across the table
    #[sea_orm(unique)]
    pub username: String,

    /// Email address, unique across the table
    #[sea_orm(unique)]
    pub email: String,

    /// Salted one-way password hash; never serialized to clients
    pub password_hash: String,

    /// Display name (optional)
    pub full_name: Option<String>,

    /// Role label for the dashboard (e.g. editor, admin)
    pub role: String,

    /// Whether the account may log in
    pub is_active: bool,

    /// Timestamp when the user was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the user was last updated
    pub updated_at: DateTimeWithTimeZone,

    /// Soft-delete marker; present means excluded from default queries
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event::Entity")]
    Event,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
