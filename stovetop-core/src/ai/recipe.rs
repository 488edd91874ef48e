//! Recipe generation call: sends the three prompt messages and returns the
//! model's raw text.

use crate::ai::prompts::recipe::{PromptMessages, RECIPE_PROMPT_NAME};
use crate::ai::{AiClient, AiError, ChatRequest};

/// Sampling temperature for recipe generation.
pub const RECIPE_TEMPERATURE: f32 = 0.5;

/// Unparsed text returned by the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGeneration(String);

impl RawGeneration {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Request one JSON-mode completion for the given prompt.
pub async fn generate_recipe_text(
    ai_client: &dyn AiClient,
    messages: PromptMessages,
) -> Result<RawGeneration, AiError> {
    let request = ChatRequest {
        messages: messages.into_messages(),
        json_response: true,
        temperature: Some(RECIPE_TEMPERATURE),
    };

    let response = ai_client.complete(RECIPE_PROMPT_NAME, request).await?;

    tracing::debug!(
        model = ai_client.model_name(),
        total_tokens = response.usage.total_tokens,
        "Recipe completion received"
    );

    Ok(RawGeneration(response.content))
}
