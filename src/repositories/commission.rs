//! # Commission Repository
//!
//! Repository implementation for Commission entities.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};

use crate::models::commission::{
    ActiveModel as CommissionActiveModel, Column, Entity as Commission, Model as CommissionModel,
};

/// Data for creating a new commission.
#[derive(Debug, Clone)]
pub struct CreateCommission {
    pub client_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub commission_type: String,
    pub description: String,
    pub budget: Option<f64>,
}

/// Partial update applied field-by-field; absent fields keep prior values.
#[derive(Debug, Clone, Default)]
pub struct CommissionPatch {
    pub client_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub commission_type: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub status: Option<String>,
}

/// Optional list filters.
#[derive(Debug, Clone, Default)]
pub struct CommissionFilter {
    pub status: Option<String>,
}

/// Repository for Commission database operations
pub struct CommissionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommissionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, filter: CommissionFilter) -> Result<Vec<CommissionModel>, DbErr> {
        let mut query = Commission::find().filter(Column::DeletedAt.is_null());

        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }

        query.order_by_desc(Column::CreatedAt).all(self.db).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<CommissionModel>, DbErr> {
        Commission::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    pub async fn create(&self, data: CreateCommission) -> Result<CommissionModel, DbErr> {
        let now = Utc::now();

        let commission = CommissionActiveModel {
            client_name: Set(data.client_name),
            email: Set(data.email),
            phone: Set(data.phone),
            commission_type: Set(data.commission_type),
            description: Set(data.description),
            budget: Set(data.budget),
            status: Set("pending".to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            deleted_at: Set(None),
            ..Default::default()
        };

        commission.insert(self.db).await
    }

    pub async fn update(
        &self,
        id: i32,
        patch: CommissionPatch,
    ) -> Result<Option<CommissionModel>, DbErr> {
        let Some(commission) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = commission.into_active_model();
        if let Some(client_name) = patch.client_name {
            active.client_name = Set(client_name);
        }
        if let Some(email) = patch.email {
            active.email = Set(email);
        }
        if let Some(phone) = patch.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(commission_type) = patch.commission_type {
            active.commission_type = Set(commission_type);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(budget) = patch.budget {
            active.budget = Set(Some(budget));
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now().into());

        active.update(self.db).await.map(Some)
    }

    pub async fn soft_delete(&self, id: i32) -> Result<Option<CommissionModel>, DbErr> {
        let Some(commission) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = commission.into_active_model();
        active.deleted_at = Set(Some(Utc::now().into()));
        active.updated_at = Set(Utc::now().into());
        active.update(self.db).await.map(Some)
    }

    pub async fn restore(&self, id: i32) -> Result<Option<CommissionModel>, DbErr> {
        let Some(commission) = Commission::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = commission.into_active_model();
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
    async fn status_transitions_are_unrestricted() {
        let db = setup_test_db().await;
        let repo = CommissionRepository::new(&db);

        let commission = repo
            .create(CreateCommission {
                client_name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
                phone: None,
                commission_type: "arrangement".to_string(),
                description: "Four-part arrangement".to_string(),
                budget: Some(300.0),
            })
            .await
            .unwrap();
        assert_eq!(commission.status, "pending");

        // No transition graph is enforced: any status can follow any other.
        for status in ["completed", "pending", "cancelled", "in_progress"] {
            let updated = repo
                .update(
                    commission.id,
                    CommissionPatch {
                        status: Some(status.to_string()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap()
                .unwrap();
            assert_eq!(updated.status, status);
        }
    }
}
