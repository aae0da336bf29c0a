use serde::{Deserialize, Serialize};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ChatRequest {
    #[schema(example = 1)]
    pub document_id: i32,
    #[schema(example = "What is this about?")]
    pub query: String,
    /// Leave the document text out of the prompt and rely on history only.
    #[serde(default)]
    pub text_only: bool,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ChatResponse {
    pub response: String,
}
