//! AI configuration from environment variables.

use std::env;
use thiserror::Error;

/// Default OpenAI base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-1106";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// AI client configuration.
#[derive(Clone)]
pub struct AiConfig {
    /// API key for the generation service.
    pub api_key: String,
    /// Model name (e.g., "gpt-3.5-turbo-1106").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
}

// The key stays out of logs.
impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AiConfig {
    /// Build a configuration for the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `OPENAI_API_KEY`: API key for the generation service
    ///
    /// Optional:
    /// - `STOVETOP_AI_MODEL`: Model name (default: "gpt-3.5-turbo-1106")
    /// - `STOVETOP_AI_BASE_URL`: API base URL (default: "https://api.openai.com/v1")
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let model = env::var("STOVETOP_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            env::var("STOVETOP_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }
}
