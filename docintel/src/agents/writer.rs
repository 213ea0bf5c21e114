//! Writer stage: turns the analysis into the answer, revising it on loop-back.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::llm::LlmClient;
use crate::prompts::{render, StagePrompts};
use crate::state::{DocState, DocStateUpdate};

use super::Verdict;

/// Writer node: writes `draft_answer`, replacing the previous draft.
///
/// On the first pass there is no feedback. On a loop-back the critic's feedback is appended
/// to the prompt, framed as a demand to improve when it contains `IMPROVE`.
pub struct WriterNode {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<StagePrompts>,
}

impl WriterNode {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<StagePrompts>) -> Self {
        Self { llm, prompts }
    }

    fn prompt(&self, state: &DocState) -> String {
        let vars = [
            ("question", state.question.as_str()),
            ("analysis", state.analysis.as_deref().unwrap_or_default()),
            ("context", state.context.as_deref().unwrap_or_default()),
            ("feedback", state.feedback.as_deref().unwrap_or_default()),
        ];
        let mut prompt = render(&self.prompts.writer, &vars);
        let feedback = state.feedback.as_deref().filter(|f| !f.is_empty());
        if feedback.is_some() {
            let section = match Verdict::classify(feedback) {
                Verdict::Improve => &self.prompts.writer_improve,
                Verdict::Final => &self.prompts.writer_revise,
            };
            prompt.push_str("\n\n");
            prompt.push_str(&render(section, &vars));
        }
        prompt.push_str("\n\n");
        prompt.push_str(&self.prompts.writer_footer);
        prompt
    }
}

#[async_trait]
impl Node<DocState> for WriterNode {
    fn id(&self) -> &str {
        super::WRITER
    }

    async fn run(&self, state: &DocState) -> Result<DocStateUpdate, AgentError> {
        let draft = self.llm.generate(&self.prompt(state)).await?;
        Ok(DocStateUpdate {
            draft_answer: Some(draft),
            ..Default::default()
        })
    }
}
