use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::ProviderConfig,
    error::{ProviderError, ProviderResult},
};

use super::{http, TextGenerator};

const PROVIDER: &str = "gemini";

/// Text-generation client for the Gemini `generateContent` API
#[derive(Clone)]
pub struct GeminiClient {
    http: HttpClient,
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(config: &ProviderConfig, api_key: String) -> ProviderResult<Self> {
        Ok(Self {
            http: http::build_client(&config.user_agent)?,
            endpoint: config.text_endpoint.trim_end_matches('/').to_string(),
            model: config.text_model.clone(),
            api_key,
            timeout: Duration::from_secs(config.text_timeout_secs),
        })
    }

    /// Build a client from the API key in the configured environment variable
    ///
    /// Returns `Ok(None)` when no key is set, so callers run on template defaults.
    pub fn from_env(config: &ProviderConfig) -> ProviderResult<Option<Self>> {
        match std::env::var(&config.text_api_key_env) {
            Ok(key) if !key.trim().is_empty() => Self::new(config, key.trim().to_string()).map(Some),
            _ => Ok(None),
        }
    }

    fn request_url(&self) -> String {
        format!("{}/models/{}:generateContent?key={}", self.endpoint, self.model, self.api_key)
    }
}

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

/// Concatenated text of the first candidate
fn extract_text(response: GenerateContentResponse) -> ProviderResult<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ProviderError::MalformedResponse {
            provider: PROVIDER.to_string(),
            reason: "response contained no text".to_string(),
        });
    }

    Ok(text)
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingCredential { provider: PROVIDER.to_string() });
        }

        let body = GenerateContentRequest {
            contents: vec![Content { parts: vec![RequestPart { text: prompt }] }],
        };

        debug!("Requesting {} completion ({} prompt chars)", self.model, prompt.len());
        let response = self
            .http
            .post(self.request_url())
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| http::classify(PROVIDER, e))?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER.to_string(),
                status: response.status().as_u16(),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            })?;

        extract_text(parsed)
    }
}
