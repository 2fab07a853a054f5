//! # SpecialProgram Repository
//!
//! Repository implementation for SpecialProgram entities.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};

use crate::models::special_program::{
    ActiveModel as SpecialProgramActiveModel, Column, Entity as SpecialProgram,
    Model as SpecialProgramModel,
};

/// Data for creating a new special program.
#[derive(Debug, Clone)]
pub struct CreateSpecialProgram {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Partial update applied field-by-field; absent fields keep prior values.
#[derive(Debug, Clone, Default)]
pub struct SpecialProgramPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Optional list filters.
#[derive(Debug, Clone, Default)]
pub struct SpecialProgramFilter {
    pub is_active: Option<bool>,
}

/// Repository for SpecialProgram database operations
pub struct SpecialProgramRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SpecialProgramRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        filter: SpecialProgramFilter,
    ) -> Result<Vec<SpecialProgramModel>, DbErr> {
        let mut query = SpecialProgram::find().filter(Column::DeletedAt.is_null());

        if let Some(is_active) = filter.is_active {
            query = query.filter(Column::IsActive.eq(is_active));
        }

        query.order_by_asc(Column::StartDate).all(self.db).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<SpecialProgramModel>, DbErr> {
        SpecialProgram::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        data: CreateSpecialProgram,
    ) -> Result<SpecialProgramModel, DbErr> {
        let now = Utc::now();

        let program = SpecialProgramActiveModel {
            title: Set(data.title),
            description: Set(data.description),
            start_date: Set(data.start_date),
            end_date: Set(data.end_date),
            image_url: Set(data.image_url),
            is_active: Set(data.is_active.unwrap_or(true)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            deleted_at: Set(None),
            ..Default::default()
        };

        program.insert(self.db).await
    }

    pub async fn update(
        &self,
        id: i32,
        patch: SpecialProgramPatch,
    ) -> Result<Option<SpecialProgramModel>, DbErr> {
        let Some(program) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = program.into_active_model();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(start_date) = patch.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = patch.end_date {
            active.end_date = Set(end_date);
        }
        if let Some(image_url) = patch.image_url {
            active.image_url = Set(Some(image_url));
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        active.update(self.db).await.map(Some)
    }

    pub async fn soft_delete(&self, id: i32) -> Result<Option<SpecialProgramModel>, DbErr> {
        let Some(program) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = program.into_active_model();
        active.deleted_at = Set(Some(Utc::now().into()));
        active.updated_at = Set(Utc::now().into());
        active.update(self.db).await.map(Some)
    }

    pub async fn restore(&self, id: i32) -> Result<Option<SpecialProgramModel>, DbErr> {
        let Some(program) = SpecialProgram::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = program.into_active_model();
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
    async fn soft_deleted_programs_reappear_after_restore() {
        let db = setup_test_db().await;
        let repo = SpecialProgramRepository::new(&db);

        let program = repo
            .create(CreateSpecialProgram {
                title: "Summer Outreach".to_string(),
                description: "Community singing workshops".to_string(),
                start_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
                image_url: None,
                is_active: None,
            })
            .await
            .unwrap();
        assert!(program.is_active);

        repo.soft_delete(program.id).await.unwrap().unwrap();
        assert!(repo.find_by_id(program.id).await.unwrap().is_none());
        assert!(repo.list(Default::default()).await.unwrap().is_empty());

        let restored = repo.restore(program.id).await.unwrap().unwrap();
        assert!(restored.deleted_at.is_none());
        assert!(repo.find_by_id(program.id).await.unwrap().is_some());
    }
}
