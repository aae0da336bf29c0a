use chrono::Utc;
use common::ProcessingStatus;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, QueryOrder, Set};

use crate::entity::document;

/// Field values for a freshly extracted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub filename: String,
    pub content: String,
    pub page_count: i32,
    pub processing_status: ProcessingStatus,
}

pub struct DocumentRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> DocumentRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find(&self, id: i32) -> Result<Option<document::Model>, DbErr> {
        document::Entity::find_by_id(id).one(self.conn).await
    }

    /// All documents, oldest first.
    pub async fn list(&self) -> Result<Vec<document::Model>, DbErr> {
        document::Entity::find()
            .order_by_asc(document::Column::Id)
            .all(self.conn)
            .await
    }

    pub async fn create(&self, new: NewDocument) -> Result<document::Model, DbErr> {
        document::ActiveModel {
            filename: Set(new.filename),
            content: Set(new.content),
            page_count: Set(new.page_count),
            processing_status: Set(new.processing_status),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await
    }

    /// Overwrite the extracted fields of `existing` and refresh its timestamp.
    pub async fn update(
        &self,
        existing: document::Model,
        new: NewDocument,
    ) -> Result<document::Model, DbErr> {
        let mut active: document::ActiveModel = existing.into();
        active.filename = Set(new.filename);
        active.content = Set(new.content);
        active.page_count = Set(new.page_count);
        active.processing_status = Set(new.processing_status);
        active.updated_at = Set(Utc::now());
        active.update(self.conn).await
    }

    /// Returns `false` when no row had that id.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let res = document::Entity::delete_by_id(id).exec(self.conn).await?;
        Ok(res.rows_affected > 0)
    }
}
