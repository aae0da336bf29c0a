use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct DebugInfoResponse {
    #[schema(example = "Debugging is enabled")]
    pub message: String,
    #[schema(example = "debug")]
    pub log_level: String,
}
