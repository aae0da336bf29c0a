use std::sync::Arc;

use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{info, instrument};

use crate::llm::ResponseGenerator;
use crate::repository::{ConversationRepository, DocumentRepository};
use crate::services::error::ServiceError;
use crate::services::prompt::{compose_prompt, format_history};

/// Answers questions about a document and records each exchange.
pub struct ConversationService {
    db: DatabaseConnection,
    generator: Arc<ResponseGenerator>,
}

impl ConversationService {
    pub fn new(db: DatabaseConnection, generator: Arc<ResponseGenerator>) -> Self {
        Self { db, generator }
    }

    /// Prompt the model with the document's history and, unless
    /// `include_document_text` is false, its full text. The turn is stored
    /// only after the model has answered.
    #[instrument(skip(self, user_query), fields(query_len = user_query.len()))]
    pub async fn generate_response(
        &self,
        document_id: i32,
        user_query: &str,
        include_document_text: bool,
    ) -> Result<String, ServiceError> {
        if user_query.trim().is_empty() {
            return Err(ServiceError::Validation("Query must not be empty.".into()));
        }

        let document = DocumentRepository::new(&self.db)
            .find(document_id)
            .await?
            .ok_or(ServiceError::NotFound(document_id))?;
        if document.content.trim().is_empty() {
            return Err(ServiceError::EmptyContent(document_id));
        }

        let turns = ConversationRepository::new(&self.db)
            .history(document_id)
            .await?;
        let history = format_history(
            turns
                .iter()
                .map(|t| (t.user_query.as_str(), t.assistant_response.as_str())),
        );
        let prompt = compose_prompt(
            &history,
            user_query,
            include_document_text.then_some(document.content.as_str()),
        );

        let response = self.generator.generate(&prompt).await?;

        let txn = self.db.begin().await?;
        // The document may have been deleted while the model was answering.
        if DocumentRepository::new(&txn).find(document_id).await?.is_none() {
            return Err(ServiceError::NotFound(document_id));
        }
        let turn = ConversationRepository::new(&txn)
            .append(document_id, user_query, &response)
            .await?;
        txn.commit().await?;

        info!(
            document_id,
            turn_id = turn.id,
            prior_turns = turns.len(),
            "Conversation turn stored"
        );
        Ok(response)
    }
}
