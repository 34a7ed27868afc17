//! Completion API client module
//!
//! Encapsulates the HTTP interaction with the hosted `generateContent`
//! endpoint. The gateway talks to it through [`CompletionBackend`] so the
//! request pipeline can run against any backend.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use crate::core::config::AppConfig;
use crate::errors::StudyError;

/// A single best-effort generation request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
    /// Structured output contract; when set the API is asked for JSON.
    pub response_schema: Option<Value>,
}

impl CompletionRequest {
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    #[must_use]
    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Issues one request. `Ok(None)` means the API answered without text.
    async fn generate(&self, request: &CompletionRequest) -> Result<Option<String>, StudyError>;
}

/// Client for the hosted completion API
pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    model_name: String,
    base_url: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, StudyError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| StudyError::Http(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model_name: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model_name)
    }
}

#[async_trait]
impl CompletionBackend for GeminiClient {
    async fn generate(&self, request: &CompletionRequest) -> Result<Option<String>, StudyError> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("No API key selected; skipping completion request");
            return Err(StudyError::MissingApiKey);
        };

        #[cfg(feature = "debug-logs")]
        info!("Using prompt:\n{}", request.prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            model = %self.model_name,
            structured = request.response_schema.is_some(),
            "Sending completion request ({} prompt chars)",
            request.prompt.chars().count()
        );

        let mut headers = reqwest::header::HeaderMap::new();
        let key_value = api_key
            .parse()
            .map_err(|e| StudyError::Http(format!("Invalid x-goog-api-key header: {e}")))?;
        headers.insert("x-goog-api-key", key_value);

        let response = self
            .http
            .post(self.endpoint())
            .headers(headers)
            .json(&build_request_body(request))
            .send()
            .await
            .map_err(|e| StudyError::Http(format!("Completion API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(StudyError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| StudyError::Parse(format!("Failed to parse completion response: {e}")))?;

        let text = extract_response_text(&response_json);
        debug!(has_text = text.is_some(), "Completion response received");
        Ok(text)
    }
}

/// Builds the `generateContent` request body.
#[must_use]
pub fn build_request_body(request: &CompletionRequest) -> Value {
    let mut body = Map::new();
    body.insert(
        "contents".to_string(),
        json!([{ "role": "user", "parts": [{ "text": request.prompt }] }]),
    );

    if let Some(instruction) = &request.system_instruction {
        body.insert(
            "systemInstruction".to_string(),
            json!({ "parts": [{ "text": instruction }] }),
        );
    }

    if let Some(schema) = &request.response_schema {
        body.insert(
            "generationConfig".to_string(),
            json!({
                "responseMimeType": "application/json",
                "responseSchema": schema
            }),
        );
    }

    Value::Object(body)
}

/// Concatenates the text parts of the first candidate. Returns `None` when
/// the response carries no text at all.
#[must_use]
pub fn extract_response_text(response: &Value) -> Option<String> {
    let parts = response
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() { None } else { Some(text) }
}
