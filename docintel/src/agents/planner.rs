//! Planner stage: outlines the reasoning steps before any retrieval.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::llm::LlmClient;
use crate::prompts::{render, StagePrompts};
use crate::state::{DocState, DocStateUpdate};

/// Planner node: writes `plan`.
///
/// **Interaction**: First node of the document graph; its plan is read by the analyst.
pub struct PlannerNode {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<StagePrompts>,
}

impl PlannerNode {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<StagePrompts>) -> Self {
        Self { llm, prompts }
    }
}

#[async_trait]
impl Node<DocState> for PlannerNode {
    fn id(&self) -> &str {
        super::PLANNER
    }

    async fn run(&self, state: &DocState) -> Result<DocStateUpdate, AgentError> {
        let prompt = render(
            &self.prompts.planner,
            &[("question", state.question.as_str())],
        );
        let plan = self.llm.generate(&prompt).await?;
        Ok(DocStateUpdate {
            plan: Some(plan),
            ..Default::default()
        })
    }
}
