//! # Video Repository
//!
//! Repository implementation for Video entities.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};

use crate::models::video::{
    ActiveModel as VideoActiveModel, Column, Entity as Video, Model as VideoModel,
};

/// Data for creating a new video.
#[derive(Debug, Clone)]
pub struct CreateVideo {
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub is_featured: Option<bool>,
}

/// Partial update applied field-by-field; absent fields keep prior values.
#[derive(Debug, Clone, Default)]
pub struct VideoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub is_featured: Option<bool>,
}

/// Optional list filters.
#[derive(Debug, Clone, Default)]
pub struct VideoFilter {
    pub is_featured: Option<bool>,
}

/// Repository for Video database operations
pub struct VideoRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VideoRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, filter: VideoFilter) -> Result<Vec<VideoModel>, DbErr> {
        let mut query = Video::find().filter(Column::DeletedAt.is_null());

        if let Some(is_featured) = filter.is_featured {
            query = query.filter(Column::IsFeatured.eq(is_featured));
        }

        query.order_by_desc(Column::CreatedAt).all(self.db).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<VideoModel>, DbErr> {
        Video::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }

    pub async fn create(&self, data: CreateVideo) -> Result<VideoModel, DbErr> {
        let now = Utc::now();

        let video = VideoActiveModel {
            title: Set(data.title),
            description: Set(data.description),
            video_url: Set(data.video_url),
            thumbnail_url: Set(data.thumbnail_url),
            is_featured: Set(data.is_featured.unwrap_or(false)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            deleted_at: Set(None),
            ..Default::default()
        };

        video.insert(self.db).await
    }

    pub async fn update(&self, id: i32, patch: VideoPatch) -> Result<Option<VideoModel>, DbErr> {
        let Some(video) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = video.into_active_model();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(description) = patch.description {
            active.description = Set(Some(description));
        }
        if let Some(video_url) = patch.video_url {
            active.video_url = Set(video_url);
        }
        if let Some(thumbnail_url) = patch.thumbnail_url {
            active.thumbnail_url = Set(Some(thumbnail_url));
        }
        if let Some(is_featured) = patch.is_featured {
            active.is_featured = Set(is_featured);
        }
        active.updated_at = Set(Utc::now().into());

        active.update(self.db).await.map(Some)
    }

    pub async fn soft_delete(&self, id: i32) -> Result<Option<VideoModel>, DbErr> {
        let Some(video) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = video.into_active_model();
        active.deleted_at = Set(Some(Utc::now().into()));
        active.updated_at = Set(Utc::now().into());
        active.update(self.db).await.map(Some)
    }

    pub async fn restore(&self, id: i32) -> Result<Option<VideoModel>, DbErr> {
        let Some(video) = Video::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = video.into_active_model();
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
    async fn featured_filter_only_returns_featured_videos() {
        let db = setup_test_db().await;
        let repo = VideoRepository::new(&db);

        repo.create(CreateVideo {
            title: "Spring Concert".to_string(),
            description: None,
            video_url: "https://videos.example.com/spring".to_string(),
            thumbnail_url: None,
            is_featured: Some(true),
        })
        .await
        .unwrap();
        let plain = repo
            .create(CreateVideo {
                title: "Open Rehearsal".to_string(),
                description: None,
                video_url: "https://videos.example.com/rehearsal".to_string(),
                thumbnail_url: None,
                is_featured: None,
            })
            .await
            .unwrap();
        assert!(!plain.is_featured);

        let featured = repo
            .list(VideoFilter {
                is_featured: Some(true),
            })
            .await
            .unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].title, "Spring Concert");
    }
}
