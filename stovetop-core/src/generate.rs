//! The recipe generation pipeline: prompt, generate, validate, normalize,
//! assemble, persist.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info_span, Instrument};

use crate::ai::prompts::build_recipe_prompt;
use crate::ai::{generate_recipe_text, AiClient};
use crate::error::GenerateError;
use crate::normalize::normalize_ingredients;
use crate::store::RecipeStore;
use crate::types::{GenerationRequest, PersistedRecipe, StoredRecipe};
use crate::validate::validate_generation;

/// Message returned to the caller when the model refused the ingredients.
pub const REFUSAL_MESSAGE: &str =
    "You have provided an invalid or non-existing ingredient. Please try again!";

/// Message returned to the caller for every other failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "The recipe could not be generated";

/// Caller-visible result of one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The recipe was generated and saved.
    Created(StoredRecipe),
    /// The caller's input was unusable; they can retry with other ingredients.
    Rejected(String),
    /// Anything else went wrong. Details are logged, not returned.
    Failed(String),
}

impl GenerationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn into_response(self) -> GenerateRecipeResponse {
        match self {
            Self::Created(recipe) => GenerateRecipeResponse {
                success: true,
                recipe: Some(recipe),
                error: None,
            },
            Self::Rejected(message) | Self::Failed(message) => GenerateRecipeResponse {
                success: false,
                recipe: None,
                error: Some(message),
            },
        }
    }
}

impl From<&GenerateError> for GenerationOutcome {
    fn from(err: &GenerateError) -> Self {
        match err {
            GenerateError::Refused => Self::Rejected(REFUSAL_MESSAGE.to_string()),
            GenerateError::MalformedOutput(_)
            | GenerateError::Upstream(_)
            | GenerateError::Persistence(_) => Self::Failed(GENERIC_FAILURE_MESSAGE.to_string()),
        }
    }
}

/// Response body for a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GenerateRecipeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<StoredRecipe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runs the generation pipeline against an injected AI client and store.
///
/// Holds no per-request state; one instance serves concurrent requests.
#[derive(Clone)]
pub struct RecipeGenerator {
    ai_client: Arc<dyn AiClient>,
    store: Arc<dyn RecipeStore>,
}

impl RecipeGenerator {
    pub fn new(ai_client: Arc<dyn AiClient>, store: Arc<dyn RecipeStore>) -> Self {
        Self { ai_client, store }
    }

    /// Generate, validate and save one recipe.
    ///
    /// Every failure is logged and converted here; the first failure ends the
    /// run and nothing is retried.
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
        let span = info_span!(
            "generate_recipe",
            vegetarian = request.is_vegetarian,
            gluten_free = request.is_gluten_free,
        );

        async {
            match self.run(request).await {
                Ok(stored) => {
                    tracing::info!(
                        recipe_id = %stored.id,
                        title = %stored.recipe.title,
                        "Recipe generated"
                    );
                    GenerationOutcome::Created(stored)
                }
                Err(err) => {
                    log_failure(&err);
                    GenerationOutcome::from(&err)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// The pipeline itself, with typed errors.
    pub async fn run(&self, request: &GenerationRequest) -> Result<StoredRecipe, GenerateError> {
        let messages = build_recipe_prompt(request);
        let raw = generate_recipe_text(self.ai_client.as_ref(), messages).await?;
        let draft = validate_generation(&raw)?;

        let user_input = normalize_ingredients(&request.prompt);
        let recipe = PersistedRecipe::assemble(draft, user_input, &request.prompt);

        Ok(self.store.save(recipe).await?)
    }
}

fn log_failure(err: &GenerateError) {
    match err {
        GenerateError::Refused => {
            tracing::warn!("Generation service refused the ingredients");
        }
        GenerateError::MalformedOutput(e) => {
            tracing::error!(error = %e, "Generation service returned malformed output");
        }
        GenerateError::Upstream(e) => {
            tracing::error!(
                status = ?e.status(),
                code = ?e.code(),
                error = %e,
                "Generation service call failed"
            );
        }
        GenerateError::Persistence(e) => {
            tracing::error!(error = %e, "Failed to persist generated recipe");
        }
    }
}
