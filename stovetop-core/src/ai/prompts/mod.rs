//! AI prompt templates.

pub mod recipe;

pub use recipe::{build_recipe_prompt, PromptMessages, RECIPE_PROMPT_NAME, REFUSAL_SENTINEL};
