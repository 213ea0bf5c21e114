//! Retriever stage: fetches the passages most similar to the question.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::retrieval::Retriever;
use crate::state::{DocState, DocStateUpdate};

/// Joins retrieved passages in `context`.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// `context` when nothing is indexed.
pub const NO_DOCUMENTS_CONTEXT: &str = "(No documents loaded. Please upload a PDF first.)";

/// Retriever node: writes `context`. Makes no generation call.
pub struct RetrieverNode {
    retriever: Arc<dyn Retriever>,
    k: usize,
}

impl RetrieverNode {
    pub fn new(retriever: Arc<dyn Retriever>, k: usize) -> Self {
        Self { retriever, k }
    }
}

#[async_trait]
impl Node<DocState> for RetrieverNode {
    fn id(&self) -> &str {
        super::RETRIEVER
    }

    async fn run(&self, state: &DocState) -> Result<DocStateUpdate, AgentError> {
        let passages = self.retriever.search(&state.question, self.k).await?;
        let context = if passages.is_empty() {
            NO_DOCUMENTS_CONTEXT.to_string()
        } else {
            passages.join(CONTEXT_SEPARATOR)
        };
        tracing::debug!(passages = passages.len(), "context retrieved");
        Ok(DocStateUpdate {
            context: Some(context),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::{DocumentIndex, HashEmbedder, RecursiveSplitter};

    fn index() -> Arc<DocumentIndex> {
        Arc::new(DocumentIndex::new(
            Arc::new(HashEmbedder::default()),
            RecursiveSplitter::new(40, 0),
        ))
    }

    #[tokio::test]
    async fn empty_index_yields_sentinel_context() {
        let node = RetrieverNode::new(index(), 4);
        let update = node.run(&DocState::new("anything")).await.unwrap();
        assert_eq!(update.context.as_deref(), Some(NO_DOCUMENTS_CONTEXT));
    }

    #[tokio::test]
    async fn passages_are_joined_with_separator() {
        let idx = index();
        idx.index(
            b"The cat sat on the mat.\n\nDogs chase the cat.".to_vec(),
            "pets.txt",
        )
        .await
        .unwrap();
        let node = RetrieverNode::new(idx, 4);
        let update = node.run(&DocState::new("cat")).await.unwrap();
        let context = update.context.unwrap();
        assert_eq!(context.split(CONTEXT_SEPARATOR).count(), 2);
        assert!(update.plan.is_none() && update.draft_answer.is_none());
    }
}
