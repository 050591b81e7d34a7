use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{GenConfig, GenError, Generator, GeneratorKind};

/// Environment variables checked, in order, for the API key
const API_KEY_VARS: &[&str] = &["STRESSBOT_API_KEY", "OPENAI_API_KEY"];

/// Generator backed by an OpenAI-compatible chat completions endpoint
pub struct OpenAiGenerator {
    config: GenConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl OpenAiGenerator {
    pub fn new(config: GenConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent("stressbot/0.1")
            .build()
            .unwrap_or_default();

        Self { config, client }
    }

    /// Resolve the API key lazily so a missing key surfaces as a recoverable
    /// generation error rather than a startup failure.
    fn api_key(&self) -> Result<String, GenError> {
        for var in API_KEY_VARS {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    return Ok(key);
                }
            }
        }
        Err(GenError::MissingApiKey)
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    fn name(&self) -> &str {
        "OpenAI"
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::OpenAi
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenError> {
        let api_key = self.api_key()?;
        let url = format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'));

        debug!(model = %self.config.model, prompt_len = prompt.len(), "Requesting completion");

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(GenError::EmptyCompletion);
        }

        Ok(content)
    }
}
