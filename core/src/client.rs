use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use tracing::debug;

use crate::config::GeminiConfig;
use crate::errors::{GeminiError, GeminiResult};
use crate::gateway::ModelGateway;
use crate::transcript::{to_upstream_format, Turn};
use crate::types::*;

/// Client for interacting with the Gemini API
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
    model: GeminiModel,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model.model_name)
            .field("api_base_url", &self.config.api_base_url())
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a new Gemini API client
    pub fn new(config: GeminiConfig) -> GeminiResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GeminiError::ConfigError(
                    "API key is required to initialize the Gemini client".to_string(),
                )
            })?;

        let model = GeminiModel::new(api_key, config.model_name.clone());

        let client = Client::new();

        Ok(Self {
            client,
            config,
            model,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model.model_name
    }

    /// Get the generateContent URL for the configured model
    fn get_base_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url().trim_end_matches('/'),
            self.model.model_name
        )
    }

    /// Generate content using the Gemini API
    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> GeminiResult<GenerateContentResponse> {
        let url = self.get_base_url();

        // Key goes in a header so it never shows up in reqwest's URL-bearing errors.
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.model.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GeminiError::RequestError(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.map_err(|e| {
                GeminiError::ResponseError(format!("Failed to read error response: {}", e))
            })?;

            return Err(GeminiError::HttpError {
                status_code: status.as_u16(),
                message: format!("API request failed: {}", error_body),
            });
        }

        let response_body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GeminiError::ParsingError(format!("Failed to parse response: {}", e)))?;

        Ok(response_body)
    }

    /// Builds a request from already converted contents.
    pub(crate) fn create_request(&self, contents: Vec<Content>) -> GenerateContentRequest {
        GenerateContentRequest {
            contents,
            generation_config: self.config.temperature.map(|temperature| GenerationConfig {
                temperature: Some(temperature),
            }),
        }
    }

    /// Helper method to extract text from a response
    ///
    /// All text parts of the first candidate are concatenated.
    pub fn extract_text_from_response(
        &self,
        response: &GenerateContentResponse,
    ) -> GeminiResult<String> {
        let candidate = response.candidates.first().ok_or_else(|| {
            GeminiError::ResponseError("No candidates in response".to_string())
        })?;

        let content = candidate
            .content
            .as_ref()
            .ok_or_else(|| GeminiError::ResponseError("No content in candidate".to_string()))?;

        let texts: Vec<&str> = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if texts.is_empty() {
            return Err(GeminiError::ResponseError("No text in content".to_string()));
        }

        Ok(texts.concat())
    }

    async fn send_contents(&self, contents: Vec<Content>) -> GeminiResult<String> {
        debug!(
            model = %self.model.model_name,
            turns = contents.len(),
            "Sending generateContent request"
        );
        let request = self.create_request(contents);
        let response = self.generate_content(request).await?;
        self.extract_text_from_response(&response)
    }
}

#[async_trait]
impl ModelGateway for GeminiClient {
    async fn generate(&self, prompt: &str) -> GeminiResult<String> {
        self.send_contents(vec![Content::text("user", prompt)]).await
    }

    async fn converse(&self, history: &[Turn], message: &str) -> GeminiResult<String> {
        let mut contents = to_upstream_format(history);
        contents.push(Content::text("user", message));
        self.send_contents(contents).await
    }
}
