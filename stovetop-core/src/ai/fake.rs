//! Fake AI client for testing.
//!
//! Returns a fixed completion (or a fixed failure) without network access or
//! API costs, and records what it was asked.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::client::{AiClient, AiError};
use super::types::{ChatRequest, ChatResponse, Usage};

#[derive(Debug, Clone)]
enum FakeReply {
    Content(String),
    Failure { status: Option<u16>, message: String },
}

/// A fake AI client for testing.
#[derive(Debug)]
pub struct FakeAiClient {
    reply: FakeReply,
    requests: Mutex<Vec<(String, ChatRequest)>>,
}

impl FakeAiClient {
    /// Create a client that answers every request with `content`.
    pub fn with_response(content: impl Into<String>) -> Self {
        Self {
            reply: FakeReply::Content(content.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a client whose every request fails like an upstream outage.
    pub fn failing(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            reply: FakeReply::Failure {
                status,
                message: message.into(),
            },
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, with the prompt name they were sent under.
    pub fn requests(&self) -> Vec<(String, ChatRequest)> {
        self.lock().clone()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(String, ChatRequest)>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        self.lock().push((prompt_name.to_string(), request));

        match &self.reply {
            FakeReply::Content(content) => Ok(ChatResponse {
                content: content.clone(),
                usage: Usage::default(),
            }),
            FakeReply::Failure { status, message } => Err(AiError::Api {
                status: *status,
                code: None,
                message: message.clone(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
