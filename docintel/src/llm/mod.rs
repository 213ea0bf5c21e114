//! Text-generation boundary used by every LLM-backed stage.
//!
//! Stages depend on [`LlmClient`]; this module defines the trait, a scriptable
//! [`MockLlm`] for tests and offline runs, and [`ChatOpenAI`] backed by `async-openai`.
//!
//! Every call is one explicit boundary crossing that either returns text or a typed
//! [`GenerationError`]. Retries are not performed here.

mod mock;
mod openai;

pub use mock::MockLlm;
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::GenerationError;
use crate::message::Message;

/// Token usage for one LLM call (prompt + completion).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    /// Tokens in the prompt (input).
    pub prompt_tokens: u32,
    /// Tokens in the completion (output).
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion).
    pub total_tokens: u32,
}

/// Response from one completion: assistant text plus usage when the backend reports it.
#[derive(Clone, Debug, Default)]
pub struct LlmResponse {
    /// Assistant message content (plain text).
    pub content: String,
    /// Token usage for this call, when available.
    pub usage: Option<LlmUsage>,
}

/// LLM client: given messages, returns assistant text.
///
/// Implementations: `MockLlm` (fixed, scripted or failing responses), `ChatOpenAI` (real API).
///
/// **Interaction**: Used by the planner, analyst, writer and critic stages.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one completion over `messages`.
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, GenerationError>;

    /// Single-prompt convenience: sends `prompt` as one user message and returns the text.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self.invoke(&[Message::user(prompt)]).await?;
        Ok(response.content)
    }
}
