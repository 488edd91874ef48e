//! AI client implementation using the OpenAI chat completions API.

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use thiserror::Error;

use super::config::AiConfig;
use super::types::{ChatMessage, ChatRequest, ChatResponse, Role, Usage};

#[derive(Error, Debug)]
pub enum AiError {
    /// Transport, auth, quota or service failure.
    ///
    /// `status` is only known for transport-level failures; error bodies
    /// returned by the API carry their `code` instead (e.g. `invalid_api_key`,
    /// `insufficient_quota`).
    #[error("API error{}: {message}", detail_suffix(.status, .code))]
    Api {
        status: Option<u16>,
        code: Option<String>,
        message: String,
    },

    #[error("API returned no completion content")]
    EmptyCompletion,

    #[error("Configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

fn detail_suffix(status: &Option<u16>, code: &Option<String>) -> String {
    match (status, code) {
        (Some(status), _) => format!(" (status {})", status),
        (None, Some(code)) => format!(" ({})", code),
        (None, None) => String::new(),
    }
}

impl AiError {
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            status: None,
            code: None,
            message: message.into(),
        }
    }

    /// HTTP status code of the upstream failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Error code reported by the API, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

impl From<OpenAIError> for AiError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::Reqwest(e) => Self::Api {
                status: e.status().map(|s| s.as_u16()),
                code: None,
                message: e.to_string(),
            },
            OpenAIError::ApiError(e) => Self::Api {
                status: None,
                code: e.code.clone(),
                message: e.to_string(),
            },
            other => Self::api(other.to_string()),
        }
    }
}

/// Trait for AI clients.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Complete a chat request.
    ///
    /// The `prompt_name` identifies the calling prompt in logs.
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError>;

    /// Model the client sends requests to.
    fn model_name(&self) -> &str;
}

/// AI client for OpenAI-compatible chat completion endpoints.
///
/// Constructed once per process and shared; the underlying HTTP client pools
/// connections. Each `complete` call makes exactly one HTTP request: the
/// library's retry backoff is switched off.
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    config: AiConfig,
}

impl OpenAiClient {
    /// Create a new client from environment configuration.
    pub fn from_env() -> Result<Self, AiError> {
        let config = AiConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Create a new client with the given configuration.
    pub fn new(config: AiConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.base_url);

        let client = Client::with_config(openai_config).with_backoff(
            ExponentialBackoffBuilder::new()
                .with_max_elapsed_time(Some(Duration::ZERO))
                .build(),
        );

        Self { client, config }
    }

    /// Convert our ChatMessage to async-openai's format.
    fn to_openai_message(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage, AiError> {
        match msg.role {
            Role::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| AiError::api(format!("Failed to build system message: {}", e))),
            Role::User => ChatCompletionRequestUserMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| AiError::api(format!("Failed to build user message: {}", e))),
            Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| AiError::api(format!("Failed to build assistant message: {}", e))),
        }
    }
}

#[async_trait]
impl AiClient for OpenAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        let messages: Vec<ChatCompletionRequestMessage> = request
            .messages
            .iter()
            .map(Self::to_openai_message)
            .collect::<Result<Vec<_>, _>>()?;

        let mut req_builder = CreateChatCompletionRequestArgs::default();
        req_builder.model(&self.config.model).messages(messages).n(1);

        if let Some(temperature) = request.temperature {
            req_builder.temperature(temperature);
        }

        if request.json_response {
            req_builder.response_format(ResponseFormat::JsonObject);
        }

        let openai_request = req_builder.build()?;

        tracing::debug!(
            prompt_name = prompt_name,
            model = &self.config.model,
            "Calling AI API"
        );

        let response = self.client.chat().create(openai_request).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(AiError::EmptyCompletion)?;

        let usage = response
            .usage
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(ChatResponse { content, usage })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
