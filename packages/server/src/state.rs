use std::sync::Arc;

use common::extract::LopdfExtractor;
use common::storage::StorageError;
use common::storage::filesystem::FilesystemFileStore;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::llm::{GenerativeModel, ResponseGenerator};
use crate::services::{ConversationService, DocumentLocks, IngestionService};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub ingestion: Arc<IngestionService>,
    pub conversation: Arc<ConversationService>,
}

impl AppState {
    /// Wire the pipelines around an already connected database and model client.
    pub async fn new(
        config: AppConfig,
        db: DatabaseConnection,
        model: Arc<dyn GenerativeModel>,
    ) -> Result<Self, StorageError> {
        let store = FilesystemFileStore::new(config.upload.dir.clone()).await?;
        let ingestion = IngestionService::new(
            db.clone(),
            Arc::new(store),
            Arc::new(LopdfExtractor),
            DocumentLocks::new(),
            config.upload.max_size_bytes(),
        );
        let generator = ResponseGenerator::from_config(model, &config.model);
        let conversation = ConversationService::new(db.clone(), Arc::new(generator));

        Ok(Self {
            db,
            config,
            ingestion: Arc::new(ingestion),
            conversation: Arc::new(conversation),
        })
    }
}
