use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::{FailureKind, GenerateError, InlineImage};

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// Text generation backend, optionally conditioned on one image.
#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Result<String, GenerateError>;
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

pub struct GeminiGenerator {
    settings: GeminiSettings,
    client: reqwest::Client,
}

impl GeminiGenerator {
    pub fn new(settings: GeminiSettings) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GenerateError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self) -> Result<reqwest::Url, GenerateError> {
        let raw = format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        );
        let mut url = reqwest::Url::parse(&raw)
            .map_err(|err| GenerateError::new(FailureKind::Network, err.to_string()))?;
        url.query_pairs_mut().append_pair("key", &self.settings.api_key);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl Generator for GeminiGenerator {
    async fn generate(
        &self,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Result<String, GenerateError> {
        if self.settings.api_key.trim().is_empty() {
            return Err(GenerateError::new(
                FailureKind::MissingApiKey,
                "no Gemini API key configured",
            ));
        }

        let mut parts = vec![Part::Text {
            text: prompt.to_string(),
        }];
        if let Some(image) = image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: STANDARD.encode(&image.bytes),
                },
            });
        }
        let body = serde_json::to_vec(&GenerateRequest {
            contents: vec![Content { parts }],
        })
        .map_err(|err| GenerateError::new(FailureKind::Decode, err.to_string()))?;

        critic_logging::critic_debug!(
            "generate: model={} prompt_chars={} image={}",
            self.settings.model,
            prompt.chars().count(),
            image.is_some()
        );

        let response = self
            .client
            .post(self.endpoint()?)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&bytes)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(GenerateError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let parsed: GenerateResponse = serde_json::from_slice(&bytes)
            .map_err(|err| GenerateError::new(FailureKind::Decode, err.to_string()))?;
        extract_text(parsed)
    }
}

fn extract_text(response: GenerateResponse) -> Result<String, GenerateError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .map(|reason| format!("blocked: {reason}"))
            .unwrap_or_else(|| "no text in first candidate".to_string());
        return Err(GenerateError::new(FailureKind::EmptyResponse, reason));
    }
    Ok(text.trim().to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        return GenerateError::new(FailureKind::Timeout, err.to_string());
    }
    GenerateError::new(FailureKind::Network, err.to_string())
}
