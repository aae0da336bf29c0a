#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};

/// Processing state of an uploaded document.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "PascalCase")]
pub enum ProcessingStatus {
    /// Accepted but text not yet extracted.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Pending"))]
    Pending,
    /// Text extracted and stored.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Processed"))]
    Processed,
    /// Extraction produced no usable text.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Failed"))]
    Failed,
}

impl ProcessingStatus {
    /// Status a document should carry for the given extracted content.
    pub fn for_content(content: &str) -> Self {
        if content.trim().is_empty() {
            Self::Failed
        } else {
            Self::Processed
        }
    }
}
