// ABOUTME: Estimation chat service calling the Anthropic Messages API
// ABOUTME: Stateless passthrough with a fixed estimator persona, no retry or caching

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Fixed persona for the estimation endpoint. The reply is returned to the
/// client verbatim, so the instruction carries the caveats.
const ESTIMATOR_SYSTEM_PROMPT: &str = "You are a construction project estimation assistant \
for a residential and commercial builder. Given a client's free-text description of a \
project, give a rough cost range, an expected timeline, and the major materials involved. \
Keep answers short and practical, and always note that final figures require a formal \
proposal from the sales team.";

#[derive(Debug, Error)]
pub enum AiServiceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("No API key configured")]
    NoApiKey,

    #[error("Invalid response format")]
    InvalidResponse,
}

pub type AiServiceResult<T> = Result<T, AiServiceError>;

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
    system: String,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    content_type: String,
    text: String,
}

/// Stateless client for the estimation chat endpoint
pub struct EstimateService {
    client: Client,
    api_key: Option<String>,
    model: String,
    api_url: String,
}

impl EstimateService {
    fn create_client() -> Client {
        Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client")
    }

    /// Creates a new service instance. API key comes from the
    /// ANTHROPIC_API_KEY environment variable; the model can be overridden
    /// with ANTHROPIC_MODEL.
    pub fn new() -> Self {
        let api_key = env::var("ANTHROPIC_API_KEY").ok();
        if api_key.is_none() {
            info!("ANTHROPIC_API_KEY not set - estimate endpoint will be unavailable");
        }

        let model = env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        if model != DEFAULT_MODEL {
            info!("Using custom Anthropic model: {}", model);
        }

        Self {
            client: Self::create_client(),
            api_key,
            model,
            api_url: ANTHROPIC_API_URL.to_string(),
        }
    }

    /// Constructor with explicit configuration, used by tests to point at a
    /// mock server.
    pub fn with_config(api_key: Option<String>, model: String, api_url: String) -> Self {
        Self {
            client: Self::create_client(),
            api_key,
            model,
            api_url,
        }
    }

    /// Forwards the user's message with the estimator persona and returns
    /// the model's text verbatim. No retry, no caching, no validation of
    /// the reply.
    pub async fn get_estimate(&self, message: &str) -> AiServiceResult<String> {
        let api_key = self.api_key.as_ref().ok_or(AiServiceError::NoApiKey)?;

        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: message.to_string(),
            }],
            system: ESTIMATOR_SYSTEM_PROMPT.to_string(),
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Anthropic API returned {}: {}", status, body);
            return Err(AiServiceError::ApiError(format!(
                "upstream returned {}",
                status
            )));
        }

        let parsed: AnthropicResponse = response
            .json()
            .await
            .map_err(|_| AiServiceError::InvalidResponse)?;

        let text = parsed
            .content
            .first()
            .map(|block| block.text.clone())
            .ok_or(AiServiceError::InvalidResponse)?;

        Ok(text)
    }
}

impl Default for EstimateService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_service(server_uri: &str) -> EstimateService {
        EstimateService::with_config(
            Some("test-key".to_string()),
            "claude-test".to_string(),
            format!("{}/v1/messages", server_uri),
        )
    }

    #[tokio::test]
    async fn get_estimate_returns_model_text_verbatim() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": "Roughly PHP 450k-550k over 3 months."}]
            })))
            .mount(&server)
            .await;

        let service = test_service(&server.uri());
        let reply = service.get_estimate("How much for a bungalow?").await.unwrap();
        assert_eq!(reply, "Roughly PHP 450k-550k over 3 months.");
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_as_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let service = test_service(&server.uri());
        let result = service.get_estimate("hello").await;
        assert!(matches!(result, Err(AiServiceError::ApiError(_))));
    }

    #[tokio::test]
    async fn missing_api_key_is_an_error() {
        let service = EstimateService::with_config(
            None,
            "claude-test".to_string(),
            "http://localhost:9/v1/messages".to_string(),
        );
        let result = service.get_estimate("hello").await;
        assert!(matches!(result, Err(AiServiceError::NoApiKey)));
    }
}
