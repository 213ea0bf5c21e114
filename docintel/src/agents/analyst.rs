//! Analyst stage: works through the plan against the retrieved context.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::llm::LlmClient;
use crate::prompts::{render, StagePrompts};
use crate::state::{DocState, DocStateUpdate};

/// Analyst node: writes `analysis`.
pub struct AnalystNode {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<StagePrompts>,
}

impl AnalystNode {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<StagePrompts>) -> Self {
        Self { llm, prompts }
    }
}

#[async_trait]
impl Node<DocState> for AnalystNode {
    fn id(&self) -> &str {
        super::ANALYST
    }

    async fn run(&self, state: &DocState) -> Result<DocStateUpdate, AgentError> {
        let prompt = render(
            &self.prompts.analyst,
            &[
                ("question", state.question.as_str()),
                ("plan", state.plan.as_deref().unwrap_or_default()),
                ("context", state.context.as_deref().unwrap_or_default()),
            ],
        );
        let analysis = self.llm.generate(&prompt).await?;
        Ok(DocStateUpdate {
            analysis: Some(analysis),
            ..Default::default()
        })
    }
}
