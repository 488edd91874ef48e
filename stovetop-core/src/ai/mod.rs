//! AI client module for the recipe generation service.
//!
//! This module provides:
//! - `AiClient` trait for abstracting chat completion providers
//! - `OpenAiClient` implementation for OpenAI-compatible endpoints
//! - `FakeAiClient` for tests and offline runs
//! - Configuration via environment variables
//! - The recipe prompt and the call that sends it
//!
//! # Configuration
//!
//! Set these environment variables:
//!
//! - `OPENAI_API_KEY` (required): Your API key
//! - `STOVETOP_AI_MODEL` (optional): Model name, e.g., "gpt-3.5-turbo-1106"
//! - `STOVETOP_AI_BASE_URL` (optional): API base URL
//!
//! # Example
//!
//! ```ignore
//! use stovetop_core::ai::{AiClient, ChatMessage, ChatRequest, OpenAiClient};
//!
//! let client = OpenAiClient::from_env()?;
//!
//! let request = ChatRequest {
//!     messages: vec![ChatMessage::user("Hello!")],
//!     ..Default::default()
//! };
//!
//! let response = client.complete("test", request).await?;
//! println!("Response: {}", response.content);
//! ```

mod client;
mod config;
mod fake;
pub mod prompts;
mod recipe;
mod types;

pub use client::{AiClient, AiError, OpenAiClient};
pub use config::{AiConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use fake::FakeAiClient;
pub use recipe::{generate_recipe_text, RawGeneration, RECIPE_TEMPERATURE};
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role, Usage};
