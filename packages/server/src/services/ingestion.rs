use std::sync::Arc;

use common::ProcessingStatus;
use common::extract::{ExtractionError, TextExtractor, normalize_text};
use common::storage::FileStore;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{error, info, instrument, warn};

use crate::entity::document;
use crate::repository::{ConversationRepository, DocumentRepository, NewDocument};
use crate::services::error::ServiceError;
use crate::services::locks::DocumentLocks;
use crate::utils::filename::{has_extension, validate_flat_filename};

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct PdfFile {
    pub original_name: String,
    pub data: Vec<u8>,
}

/// Creates, replaces and deletes documents together with their backing files.
///
/// Every operation leaves the upload directory consistent with the database:
/// a failed create removes the stored file, a failed replace restores the
/// previous file, and no orphaned blobs are left for a later sweep.
pub struct IngestionService {
    db: DatabaseConnection,
    store: Arc<dyn FileStore>,
    extractor: Arc<dyn TextExtractor>,
    locks: DocumentLocks,
    max_size_bytes: u64,
}

impl IngestionService {
    pub fn new(
        db: DatabaseConnection,
        store: Arc<dyn FileStore>,
        extractor: Arc<dyn TextExtractor>,
        locks: DocumentLocks,
        max_size_bytes: u64,
    ) -> Self {
        Self {
            db,
            store,
            extractor,
            locks,
            max_size_bytes,
        }
    }

    /// Reject anything that is not a non-empty `.pdf` within the size limit.
    pub fn validate(&self, file: &PdfFile) -> Result<(), ServiceError> {
        let name = validate_flat_filename(&file.original_name)
            .map_err(|e| ServiceError::Validation(e.message().into()))?;

        if !has_extension(name, "pdf") {
            return Err(ServiceError::Validation(
                "Invalid file type. Only PDF files are allowed.".into(),
            ));
        }

        if file.data.is_empty() {
            return Err(ServiceError::Validation("Uploaded file is empty.".into()));
        }

        if file.data.len() as u64 > self.max_size_bytes {
            return Err(ServiceError::Validation(format!(
                "File size exceeds the maximum allowed size of {} MB.",
                self.max_size_bytes / (1024 * 1024)
            )));
        }

        Ok(())
    }

    #[instrument(skip(self, file), fields(filename = %file.original_name, size = file.data.len()))]
    pub async fn create(&self, file: PdfFile) -> Result<document::Model, ServiceError> {
        self.validate(&file)?;

        let stored_name = self.store.save(&file.data, &file.original_name).await?;
        match self.persist_new(&stored_name).await {
            Ok(doc) => {
                info!(document_id = doc.id, stored_name, "Document created");
                Ok(doc)
            }
            Err(e) => {
                warn!(stored_name, error = %e, "Document creation failed, removing stored file");
                self.remove_stored(&stored_name).await;
                Err(e)
            }
        }
    }

    async fn persist_new(&self, stored_name: &str) -> Result<document::Model, ServiceError> {
        let new = self.extract(stored_name).await?;

        let txn = self.db.begin().await?;
        let doc = DocumentRepository::new(&txn).create(new).await?;
        txn.commit().await?;
        Ok(doc)
    }

    #[instrument(skip(self, file), fields(filename = %file.original_name, size = file.data.len()))]
    pub async fn replace(
        &self,
        document_id: i32,
        file: PdfFile,
    ) -> Result<document::Model, ServiceError> {
        let _guard = self.locks.acquire(document_id).await;

        let existing = DocumentRepository::new(&self.db)
            .find(document_id)
            .await?
            .ok_or(ServiceError::NotFound(document_id))?;
        self.validate(&file)?;

        let backup = self.store.backup(&existing.filename).await?;
        match self.persist_replacement(&existing, &file).await {
            Ok(doc) => {
                if let Err(e) = self.store.discard(&backup).await {
                    warn!(document_id, error = %e, "Failed to remove backup after replace");
                }
                info!(
                    document_id,
                    stored_name = %doc.filename,
                    previous = %existing.filename,
                    "Document replaced"
                );
                Ok(doc)
            }
            Err(e) => {
                warn!(document_id, error = %e, "Replace failed, restoring previous file");
                if let Err(restore_err) = self.store.restore(&backup, &existing.filename).await {
                    error!(
                        document_id,
                        backup = %backup.display(),
                        error = %restore_err,
                        "Failed to restore backup"
                    );
                }
                Err(e)
            }
        }
    }

    /// Store and extract the new file, then point the record at it. The new
    /// file is removed again if anything after the save fails.
    async fn persist_replacement(
        &self,
        existing: &document::Model,
        file: &PdfFile,
    ) -> Result<document::Model, ServiceError> {
        let stored_name = self.store.save(&file.data, &file.original_name).await?;

        let result = self.update_record(existing, &stored_name).await;
        if result.is_err() {
            self.remove_stored(&stored_name).await;
        }
        result
    }

    async fn update_record(
        &self,
        existing: &document::Model,
        stored_name: &str,
    ) -> Result<document::Model, ServiceError> {
        let new = self.extract(stored_name).await?;

        let txn = self.db.begin().await?;
        let doc = DocumentRepository::new(&txn)
            .update(existing.clone(), new)
            .await?;
        txn.commit().await?;
        Ok(doc)
    }

    /// Delete the backing file, then the record and its turns.
    #[instrument(skip(self))]
    pub async fn delete(&self, document_id: i32) -> Result<(), ServiceError> {
        let _guard = self.locks.acquire(document_id).await;

        let doc = DocumentRepository::new(&self.db)
            .find(document_id)
            .await?
            .ok_or(ServiceError::NotFound(document_id))?;

        if let Err(e) = self.store.delete(&doc.filename).await {
            warn!(document_id, error = %e, "Failed to delete stored file, deleting record anyway");
        }

        let txn = self.db.begin().await?;
        let turns = ConversationRepository::new(&txn)
            .delete_for_document(document_id)
            .await?;
        DocumentRepository::new(&txn).delete(document_id).await?;
        txn.commit().await?;

        info!(document_id, turns, "Document deleted");
        Ok(())
    }

    /// Extract and normalize the text of a stored file off the async runtime.
    async fn extract(&self, stored_name: &str) -> Result<NewDocument, ServiceError> {
        let path = self.store.path(stored_name)?;
        let extractor = self.extractor.clone();
        let extracted = tokio::task::spawn_blocking(move || extractor.extract_file(&path))
            .await
            .map_err(|e| ServiceError::Internal(format!("extraction task failed: {e}")))??;

        let content = normalize_text(&extracted.content);
        if content.is_empty() {
            // Text made only of stripped characters counts as no text.
            return Err(ExtractionError::NoText.into());
        }

        Ok(NewDocument {
            filename: stored_name.to_string(),
            page_count: i32::try_from(extracted.page_count).unwrap_or(i32::MAX),
            processing_status: ProcessingStatus::for_content(&content),
            content,
        })
    }

    async fn remove_stored(&self, stored_name: &str) {
        if let Err(e) = self.store.delete(stored_name).await {
            error!(stored_name, error = %e, "Failed to remove stored file");
        }
    }
}
