use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::entity::conversation_turn;

/// Append-only access to conversation turns.
pub struct ConversationRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ConversationRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn append(
        &self,
        document_id: i32,
        user_query: &str,
        assistant_response: &str,
    ) -> Result<conversation_turn::Model, DbErr> {
        conversation_turn::ActiveModel {
            document_id: Set(document_id),
            user_query: Set(user_query.to_owned()),
            assistant_response: Set(assistant_response.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await
    }

    /// Turns of one document in insertion order.
    pub async fn history(&self, document_id: i32) -> Result<Vec<conversation_turn::Model>, DbErr> {
        conversation_turn::Entity::find()
            .filter(conversation_turn::Column::DocumentId.eq(document_id))
            .order_by_asc(conversation_turn::Column::Id)
            .all(self.conn)
            .await
    }

    pub async fn delete_for_document(&self, document_id: i32) -> Result<u64, DbErr> {
        let res = conversation_turn::Entity::delete_many()
            .filter(conversation_turn::Column::DocumentId.eq(document_id))
            .exec(self.conn)
            .await?;
        Ok(res.rows_affected)
    }
}
