//! # Contact Repository
//!
//! Repository implementation for Contact entities.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};

use crate::models::contact::{
    ActiveModel as ContactActiveModel, Column, Entity as Contact, Model as ContactModel,
};

/// Data for creating a new contact message.
#[derive(Debug, Clone)]
pub struct CreateContact {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

/// Partial update applied field-by-field; absent fields keep prior values.
#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub is_read: Option<bool>,
}

/// Optional list filters.
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    pub is_read: Option<bool>,
}

/// Repository for Contact database operations
pub struct ContactRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ContactRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, filter: ContactFilter) -> Result<Vec<ContactModel>, DbErr> {
        let mut query = Contact::find().filter(Column::DeletedAt.is_null());

        if let Some(is_read) = filter.is_read {
            query = query.filter(Column::IsRead.eq(is_read));
        }

        query.order_by_desc(Column::CreatedAt).all(self.db).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<ContactModel>, DbErr> {
        Contact::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    pub async fn create(&self, data: CreateContact) -> Result<ContactModel, DbErr> {
        let now = Utc::now();

        let contact = ContactActiveModel {
            name: Set(data.name),
            email: Set(data.email),
            subject: Set(data.subject),
            message: Set(data.message),
            is_read: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            deleted_at: Set(None),
            ..Default::default()
        };

        contact.insert(self.db).await
    }

    pub async fn update(&self, id: i32, patch: ContactPatch) -> Result<Option<ContactModel>, DbErr> {
        let Some(contact) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = contact.into_active_model();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(email) = patch.email {
            active.email = Set(email);
        }
        if let Some(subject) = patch.subject {
            active.subject = Set(Some(subject));
        }
        if let Some(message) = patch.message {
            active.message = Set(message);
        }
        if let Some(is_read) = patch.is_read {
            active.is_read = Set(is_read);
        }
        active.updated_at = Set(Utc::now().into());

        active.update(self.db).await.map(Some)
    }

    /// Marks a message read without touching the rest of the row.
    pub async fn mark_read(&self, id: i32) -> Result<Option<ContactModel>, DbErr> {
        self.update(
            id,
            ContactPatch {
                is_read: Some(true),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn soft_delete(&self, id: i32) -> Result<Option<ContactModel>, DbErr> {
        let Some(contact) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = contact.into_active_model();
        active.deleted_at = Set(Some(Utc::now().into()));
        active.updated_at = Set(Utc::now().into());
        active.update(self.db).await.map(Some)
    }

    pub async fn restore(&self, id: i32) -> Result<Option<ContactModel>, DbErr> {
        let Some(contact) = Contact::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = contact.into_active_model();
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

    #[tokio::test]
    async fn new_messages_start_unread_and_can_be_marked() {
        let db = setup_test_db().await;
        let repo = ContactRepository::new(&db);

        let contact = repo
            .create(CreateContact {
                name: "Miriam".to_string(),
                email: "miriam@example.com".to_string(),
                subject: Some("Booking question".to_string()),
                message: "Do you sing at weddings?".to_string(),
            })
            .await
            .unwrap();
        assert!(!contact.is_read);

        let read = repo.mark_read(contact.id).await.unwrap().unwrap();
        assert!(read.is_read);

        let unread = repo
            .list(ContactFilter {
                is_read: Some(false),
            })
            .await
            .unwrap();
        assert!(unread.is_empty());
    }
}
