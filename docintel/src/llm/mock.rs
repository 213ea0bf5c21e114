//! Mock LLM for tests and offline runs.
//!
//! Returns a fixed reply, a scripted sequence of replies, an echo of the prompt, or a
//! failure. Every call is recorded so tests can assert on the prompts a stage sent.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::GenerationError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;

enum Behavior {
    Fixed(String),
    /// Replies in order; the last one repeats once the script is exhausted.
    Script(Vec<String>),
    /// Replies with a prefix plus the first line of the last user message.
    Echo(String),
    Fail(String),
}

/// Mock LLM: deterministic replies without a network.
///
/// **Interaction**: Implements `LlmClient`; used by stage tests, pipeline scenarios and the
/// CLI's `--offline` mode.
pub struct MockLlm {
    behavior: Behavior,
    call_count: AtomicUsize,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            call_count: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always replies with `content`.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fixed(content.into()))
    }

    /// Replies with `replies` in order, repeating the last one afterwards.
    pub fn scripted<I, T>(replies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::with_behavior(Behavior::Script(
            replies.into_iter().map(Into::into).collect(),
        ))
    }

    /// Replies with `"{prefix}{first line of the prompt}"`.
    pub fn echo(prefix: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Echo(prefix.into()))
    }

    /// Every call fails with `GenerationError::Backend(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fail(message.into()))
    }

    /// Number of `invoke` calls so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Messages of every call so far, in call order.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, GenerationError> {
        let n = self.call_count.fetch_add(1, Ordering::SeqCst);
        match self.calls.lock() {
            Ok(mut calls) => calls.push(messages.to_vec()),
            Err(poisoned) => poisoned.into_inner().push(messages.to_vec()),
        }
        let content = match &self.behavior {
            Behavior::Fixed(s) => s.clone(),
            Behavior::Script(replies) => replies
                .get(n)
                .or_else(|| replies.last())
                .cloned()
                .unwrap_or_default(),
            Behavior::Echo(prefix) => {
                let prompt = messages
                    .iter()
                    .rev()
                    .find(|m| matches!(m, Message::User(_)))
                    .map(Message::content)
                    .unwrap_or_default();
                let first_line = prompt.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
                format!("{}{}", prefix, first_line.trim())
            }
            Behavior::Fail(message) => return Err(GenerationError::Backend(message.clone())),
        };
        Ok(LlmResponse {
            content,
            usage: None,
        })
    }
}
