use async_trait::async_trait;
use common::config::ModelConfig;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GenerativeModel, ModelCallError};

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model_name: String,
    api_key: String,
}

/// Gemini API request format.
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Gemini API response format.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        Some(text)
    }
}

impl GeminiClient {
    pub fn new(config: &ModelConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model_name: config.model_name.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model_name
        )
    }
}

fn classify(status: StatusCode, detail: String) -> ModelCallError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => ModelCallError::RateLimited(detail),
        StatusCode::BAD_REQUEST
        | StatusCode::UNAUTHORIZED
        | StatusCode::FORBIDDEN
        | StatusCode::NOT_FOUND => ModelCallError::InvalidRequest(format!("HTTP {status}: {detail}")),
        _ => ModelCallError::Other(format!("HTTP {status}: {detail}")),
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_content(&self, prompt: &str) -> Result<String, ModelCallError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!(model = %self.model_name, prompt_len = prompt.len(), "Calling Gemini");
        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelCallError::Other(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(classify(status, detail));
        }

        let payload: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| ModelCallError::Other(format!("invalid response body: {e}")))?;

        payload
            .into_text()
            .ok_or_else(|| ModelCallError::Other("response contained no candidates".into()))
    }
}
