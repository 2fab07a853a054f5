//! # User Repository
//!
//! Repository implementation for User entities: account lookup for auth,
//! CRUD for the dashboard user admin pages.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};

use crate::models::user::{ActiveModel as UserActiveModel, Column, Entity as User, Model as UserModel};

/// Data for creating a new user; the password is already hashed here.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: String,
}

/// Partial update applied field-by-field; absent fields keep prior values.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Optional list filters.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub is_active: Option<bool>,
}

/// Repository for User database operations
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// List users, newest first, excluding soft-deleted rows.
    pub async fn list(&self, filter: UserFilter) -> Result<Vec<UserModel>, DbErr> {
        let mut query = User::find().filter(Column::DeletedAt.is_null());

        if let Some(is_active) = filter.is_active {
            query = query.filter(Column::IsActive.eq(is_active));
        }

        query.order_by_desc(Column::CreatedAt).all(self.db).await
    }

    /// Get a user by id, excluding soft-deleted rows.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, DbErr> {
        User::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    /// Look up a live account by email (login path).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, DbErr> {
        User::find()
            .filter(Column::Email.eq(email))
            .filter(Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    /// Check whether an email or username is already taken, including by
    /// soft-deleted accounts (unique constraints span those too).
    pub async fn email_or_username_taken(
        &self,
        email: &str,
        username: &str,
    ) -> Result<bool, DbErr> {
        let existing = User::find()
            .filter(
                Column::Email
                    .eq(email)
                    .or(Column::Username.eq(username)),
            )
            .one(self.db)
            .await?;
        Ok(existing.is_some())
    }

    pub async fn create(&self, data: CreateUser) -> Result<UserModel, DbErr> {
        let now = Utc::now();

        let user = UserActiveModel {
            username: Set(data.username),
            email: Set(data.email),
            password_hash: Set(data.password_hash),
            full_name: Set(data.full_name),
            role: Set(data.role),
            is_active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            deleted_at: Set(None),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    /// Apply a partial patch; returns `None` when the row is absent or
    /// soft-deleted.
    pub async fn update(&self, id: i32, patch: UserPatch) -> Result<Option<UserModel>, DbErr> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = user.into_active_model();
        if let Some(username) = patch.username {
            active.username = Set(username);
        }
        if let Some(email) = patch.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = patch.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(full_name) = patch.full_name {
            active.full_name = Set(Some(full_name));
        }
        if let Some(role) = patch.role {
            active.role = Set(role);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        active.update(self.db).await.map(Some)
    }

    /// Soft delete: stamps `deleted_at`; returns `None` when the row is
    /// absent or already deleted.
    pub async fn soft_delete(&self, id: i32) -> Result<Option<UserModel>, DbErr> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = user.into_active_model();
        active.deleted_at = Set(Some(Utc::now().into()));
        active.updated_at = Set(Utc::now().into());
        active.update(self.db).await.map(Some)
    }

    /// Restore: clears `deleted_at`; returns `None` when the id is unknown.
    pub async fn restore(&self, id: i32) -> Result<Option<UserModel>, DbErr> {
        let Some(user) = User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = user.into_active_model();
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

    fn sample_user(n: u32) -> CreateUser {
        CreateUser {
            username: format!("singer{}", n),
            email: format!("singer{}@choir.example", n),
            password_hash: "$2b$04$fakehashfakehashfakehash".to_string(),
            full_name: None,
            role: "editor".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_find_by_email() {
        let db = setup_test_db().await;
        let repo = UserRepository::new(&db);

        let created = repo.create(sample_user(1)).await.unwrap();
        assert!(created.is_active);

        let found = repo
            .find_by_email("singer1@choir.example")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.username, "singer1");
    }

    #[tokio::test]
    async fn duplicate_detection_spans_soft_deleted_rows() {
        let db = setup_test_db().await;
        let repo = UserRepository::new(&db);

        let created = repo.create(sample_user(2)).await.unwrap();
        repo.soft_delete(created.id).await.unwrap().unwrap();

        assert!(
            repo.email_or_username_taken("singer2@choir.example", "other")
                .await
                .unwrap()
        );
        assert!(
            !repo
                .email_or_username_taken("fresh@choir.example", "fresh")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn soft_delete_hides_and_restore_reveals() {
        let db = setup_test_db().await;
        let repo = UserRepository::new(&db);

        let created = repo.create(sample_user(3)).await.unwrap();
        repo.soft_delete(created.id).await.unwrap().unwrap();

        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(repo.list(UserFilter::default()).await.unwrap().is_empty());

        let restored = repo.restore(created.id).await.unwrap().unwrap();
        assert!(restored.deleted_at.is_none());
        assert_eq!(
            repo.find_by_id(created.id).await.unwrap().unwrap().email,
            created.email
        );
    }

    #[tokio::test]
    async fn patch_changes_only_supplied_fields() {
        let db = setup_test_db().await;
        let repo = UserRepository::new(&db);

        let created = repo.create(sample_user(4)).await.unwrap();
        let updated = repo
            .update(
                created.id,
                UserPatch {
                    full_name: Some("Alto Section".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.full_name.as_deref(), Some("Alto Section"));
        assert_eq!(updated.username, created.username);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.role, created.role);
    }
}
