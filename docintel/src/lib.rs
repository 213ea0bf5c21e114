//! # docintel
//!
//! Question answering over uploaded documents with a fixed pipeline of text-generation
//! stages: planner → retriever → analyst → writer → critic, where the critic may send the
//! draft back to the writer a bounded number of times.
//!
//! ## Design principles
//!
//! - **One accumulating state**: [`DocState`] flows through every stage; stages return a
//!   partial [`DocStateUpdate`] and the executor merges it, validating field ownership.
//! - **Static graph checks**: [`StateGraph::compile`] rejects unknown ids, ambiguous
//!   successors, unreachable nodes and nodes that cannot reach [`END`].
//! - **Explicit boundaries**: generation goes through [`LlmClient`] with a timeout and typed
//!   [`GenerationError`]; retrieval goes through the [`Retriever`] handle, whose index is
//!   swapped atomically on upload.
//!
//! ## Main modules
//!
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`NodeMiddleware`],
//!   [`generate_dot`], [`generate_text`].
//! - [`state`]: [`DocState`], [`DocStateUpdate`], [`StateError`].
//! - [`agents`]: the five stage nodes and [`route_after_critic`].
//! - [`llm`]: [`LlmClient`], [`MockLlm`], [`ChatOpenAI`].
//! - [`retrieval`]: loader, [`RecursiveSplitter`], [`Embedder`], [`VectorIndex`], [`DocumentIndex`].
//! - [`prompts`]: stage prompt templates loaded from embedded YAML or `PROMPTS_DIR`.
//! - [`pipeline`]: [`PipelineConfig`], [`build_doc_graph`], [`DocIntelligence`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use docintel::{
//!     DocIntelligence, DocumentIndex, HashEmbedder, MockLlm, PipelineConfig, PipelineLlms,
//!     RecursiveSplitter, StagePrompts,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::default();
//! let index = Arc::new(DocumentIndex::new(
//!     Arc::new(HashEmbedder::default()),
//!     RecursiveSplitter::new(config.chunk_size, config.chunk_overlap),
//! ));
//! let service = DocIntelligence::build(
//!     PipelineLlms::uniform(Arc::new(MockLlm::with_content("FINAL"))),
//!     Arc::new(StagePrompts::default()),
//!     index,
//!     &config,
//!     None,
//! )?;
//! service.upload(b"Refunds take 30 days.".to_vec(), "policy.txt").await?;
//! let answer = service.ask("How long do refunds take?").await?;
//! println!("{} ({} passes)", answer.answer, answer.iterations);
//! # Ok(())
//! # }
//! ```

pub mod agents;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod pipeline;
pub mod prompts;
pub mod retrieval;
pub mod state;

pub use agents::{
    route_after_critic, AnalystNode, CriticNode, PlannerNode, RetrieverNode, Verdict, WriterNode,
    MAX_ITERATIONS,
};
pub use error::{AgentError, GenerationError, GraphError};
pub use graph::{
    generate_dot, generate_text, CompilationError, CompiledStateGraph, GraphState,
    LoggingNodeMiddleware, NameNode, Node, NodeMiddleware, StateGraph, END, START,
};
pub use llm::{ChatOpenAI, LlmClient, LlmResponse, LlmUsage, MockLlm};
pub use message::Message;
pub use pipeline::{
    build_doc_graph, AskResponse, DocIntelligence, PipelineConfig, PipelineLlms,
    PreconditionError, ServiceError, UploadResult,
};
pub use prompts::{PromptsLoadError, StagePrompts};
pub use retrieval::{
    DocumentIndex, Embedder, HashEmbedder, OpenAIEmbedder, RecursiveSplitter, RetrievalError,
    Retriever, VectorIndex,
};
pub use state::{DocState, DocStateUpdate, StateError};
