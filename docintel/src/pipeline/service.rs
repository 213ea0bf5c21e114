//! DocIntelligence: the request surface shared by the HTTP server and the CLI.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::graph::{CompiledStateGraph, NodeMiddleware};
use crate::prompts::StagePrompts;
use crate::retrieval::Retriever;
use crate::state::DocState;

use super::{build_doc_graph, PipelineConfig, PipelineLlms, PreconditionError, ServiceError};

/// Answer reported when the run produced no draft.
pub const NO_ANSWER: &str = "No answer generated.";

/// Result of one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    /// Final draft of the writer.
    pub answer: String,
    /// Planner output.
    pub plan: Option<String>,
    /// Number of writer+critic passes.
    pub iterations: u32,
}

/// Result of one upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub chunks_indexed: usize,
}

/// Document question-answering service.
///
/// Holds the compiled graph (built once) and the shared document index. Cheap to clone;
/// every `ask` runs with its own state.
#[derive(Clone)]
pub struct DocIntelligence {
    graph: Arc<CompiledStateGraph<DocState>>,
    retriever: Arc<dyn Retriever>,
}

impl DocIntelligence {
    /// Builds the service around an already compiled graph and the index it searches.
    pub fn new(graph: Arc<CompiledStateGraph<DocState>>, retriever: Arc<dyn Retriever>) -> Self {
        Self { graph, retriever }
    }

    /// Compiles the document graph and builds the service.
    ///
    /// A compilation failure here is a wiring bug and is fatal at startup.
    pub fn build(
        llms: PipelineLlms,
        prompts: Arc<StagePrompts>,
        retriever: Arc<dyn Retriever>,
        config: &PipelineConfig,
        middleware: Option<Arc<dyn NodeMiddleware<DocState>>>,
    ) -> Result<Self, crate::graph::CompilationError> {
        let graph = build_doc_graph(llms, prompts, retriever.clone(), config, middleware)?;
        Ok(Self::new(Arc::new(graph), retriever))
    }

    /// The compiled graph, e.g. for visualization.
    pub fn graph(&self) -> &CompiledStateGraph<DocState> {
        &self.graph
    }

    /// Whether a document is currently indexed.
    pub fn has_documents(&self) -> bool {
        self.retriever.has_index()
    }

    /// Indexes one document, replacing whatever was indexed before.
    pub async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<UploadResult, ServiceError> {
        if bytes.is_empty() {
            return Err(PreconditionError::EmptyDocument.into());
        }
        let chunks_indexed = self.retriever.index(bytes, filename).await?;
        Ok(UploadResult { chunks_indexed })
    }

    /// Answers `question` over the indexed documents.
    pub async fn ask(&self, question: &str) -> Result<AskResponse, ServiceError> {
        self.ask_with_cancel(question, &CancellationToken::new())
            .await
    }

    /// Same as [`ask`](Self::ask); `cancel` stops the run before the next stage.
    ///
    /// Preconditions are checked first: an empty question or an empty index is rejected
    /// without running any stage.
    pub async fn ask_with_cancel(
        &self,
        question: &str,
        cancel: &CancellationToken,
    ) -> Result<AskResponse, ServiceError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(PreconditionError::EmptyQuestion.into());
        }
        if !self.retriever.has_index() {
            return Err(PreconditionError::NoDocuments.into());
        }

        let state = self
            .graph
            .invoke_with_cancel(DocState::new(question), cancel)
            .await?;
        tracing::info!(iterations = state.iteration, "question answered");
        Ok(AskResponse {
            answer: state.draft_answer.unwrap_or_else(|| NO_ANSWER.to_string()),
            plan: state.plan,
            iterations: state.iteration,
        })
    }
}
