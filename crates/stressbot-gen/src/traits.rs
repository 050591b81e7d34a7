use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while generating text
#[derive(Error, Debug)]
pub enum GenError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("API returned an empty completion")]
    EmptyCompletion,

    #[error("No API key configured (set STRESSBOT_API_KEY or OPENAI_API_KEY)")]
    MissingApiKey,

    #[error("Generator configuration error: {0}")]
    ConfigError(String),
}

/// Configuration for text generation
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Base URL of the OpenAI-compatible API
    pub api_base: String,
    /// Model to request
    pub model: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout: Duration::from_secs(15),
            temperature: 0.7,
        }
    }
}

impl GenConfig {
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Supported generator backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    OpenAi,
    Canned,
}

impl std::fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorKind::OpenAi => write!(f, "openai"),
            GeneratorKind::Canned => write!(f, "canned"),
        }
    }
}

impl std::str::FromStr for GeneratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" | "open-ai" => Ok(GeneratorKind::OpenAi),
            "canned" | "offline" => Ok(GeneratorKind::Canned),
            _ => Err(format!("Unknown generator kind: {}", s)),
        }
    }
}

/// The core abstraction over a hosted text-generation service.
///
/// Implementations must return non-empty text; an empty completion is an
/// error, never a silent success.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Human-readable name of the backend (e.g. "OpenAI")
    fn name(&self) -> &str;

    /// The backend kind
    fn kind(&self) -> GeneratorKind;

    /// Produce a completion for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String, GenError>;
}
