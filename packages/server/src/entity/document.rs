use common::ProcessingStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Generated name of the backing file in the upload directory.
    #[sea_orm(unique)]
    pub filename: String,
    /// Normalized extracted text.
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub page_count: i32,
    pub processing_status: ProcessingStatus,

    #[sea_orm(has_many)]
    pub turns: HasMany<super::conversation_turn::Entity>,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
