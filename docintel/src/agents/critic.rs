//! Critic stage: judges the draft and advances the iteration counter.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::llm::LlmClient;
use crate::prompts::{render, StagePrompts};
use crate::state::{DocState, DocStateUpdate};

/// Critic node: writes the raw `feedback` and `iteration + 1`.
///
/// The verdict is not parsed here; the router classifies the feedback after the merge.
pub struct CriticNode {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<StagePrompts>,
}

impl CriticNode {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<StagePrompts>) -> Self {
        Self { llm, prompts }
    }
}

#[async_trait]
impl Node<DocState> for CriticNode {
    fn id(&self) -> &str {
        super::CRITIC
    }

    async fn run(&self, state: &DocState) -> Result<DocStateUpdate, AgentError> {
        let prompt = render(
            &self.prompts.critic,
            &[
                ("question", state.question.as_str()),
                ("draft", state.draft_answer.as_deref().unwrap_or_default()),
            ],
        );
        let feedback = self.llm.generate(&prompt).await?;
        Ok(DocStateUpdate {
            feedback: Some(feedback),
            iteration: Some(state.iteration + 1),
            ..Default::default()
        })
    }
}
