//! GeminiApiClient - direct REST implementation of the gateway traits.
//!
//! Each gateway operation is one `generateContent` call with a declared
//! response schema attached to the generation config.
//! Configuration priority: ~/.config/mindtype/secret.json > environment variables

use std::env;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use mindtype_core::error::{MindTypeError, Result};
use mindtype_core::gateway::{NarrativeSource, QuestionSource};
use mindtype_core::narrative::ResultNarrative;
use mindtype_core::question::Question;
use mindtype_core::scoring::TypeCode;
use mindtype_core::secret::load_secret_config;

use crate::payload;
use crate::prompts;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiApiClient {
    /// Creates a new client with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Loads configuration from ~/.config/mindtype/secret.json or
    /// environment variables.
    ///
    /// Priority:
    /// 1. ~/.config/mindtype/secret.json
    /// 2. Environment variables (GEMINI_API_KEY, GEMINI_MODEL_NAME)
    ///
    /// Model name defaults to `gemini-2.5-flash` if not specified.
    pub fn try_from_env() -> Result<Self> {
        if let Ok(secret_config) = load_secret_config() {
            if let Some(gemini_config) = secret_config.gemini {
                let model = gemini_config
                    .model_name
                    .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into());
                return Ok(Self::new(gemini_config.api_key, model));
            }
        }

        let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
            MindTypeError::config(
                "GEMINI_API_KEY not found in ~/.config/mindtype/secret.json or environment variables",
            )
        })?;

        let model = env::var("GEMINI_MODEL_NAME").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.into());
        Ok(Self::new(api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The model this client sends requests to.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate_structured(&self, prompt: String, response_schema: Value) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema,
            },
        };

        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                MindTypeError::transport(format!("Gemini API request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            MindTypeError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to parse Gemini response: {err}"),
            }
        })?;

        extract_candidate_text(parsed)
    }
}

#[async_trait]
impl QuestionSource for GeminiApiClient {
    async fn generate_questions(&self) -> Result<Vec<Question>> {
        tracing::debug!(model = %self.model, "requesting question batch");
        let text = self
            .generate_structured(
                prompts::question_prompt(),
                prompts::question_response_schema(),
            )
            .await?;
        payload::parse_question_batch(&text)
    }
}

#[async_trait]
impl NarrativeSource for GeminiApiClient {
    async fn generate_narrative(&self, type_code: &TypeCode) -> Result<ResultNarrative> {
        tracing::debug!(model = %self.model, %type_code, "requesting narrative");
        let text = self
            .generate_structured(
                prompts::narrative_prompt(type_code),
                prompts::narrative_response_schema(),
            )
            .await?;
        payload::parse_narrative(&text)
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

fn extract_candidate_text(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| {
            MindTypeError::schema("Gemini API returned no text in the response candidates")
        })
}

fn map_http_error(status: StatusCode, body: String) -> MindTypeError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    MindTypeError::transport_with_status(status.as_u16(), message)
}
