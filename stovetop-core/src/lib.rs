pub mod ai;
pub mod error;
pub mod generate;
pub mod normalize;
pub mod store;
pub mod types;
pub mod validate;

pub use error::{GenerateError, OutputError};
pub use generate::{
    GenerateRecipeResponse, GenerationOutcome, RecipeGenerator, GENERIC_FAILURE_MESSAGE,
    REFUSAL_MESSAGE,
};
pub use normalize::normalize_ingredients;
pub use store::{InMemoryRecipeStore, RecipeStore, StoreError};
pub use types::{GenerationRequest, Ingredients, PersistedRecipe, RecipeDraft, StoredRecipe};
pub use validate::validate_generation;
