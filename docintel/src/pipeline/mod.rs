//! Document pipeline: configuration, graph wiring and the request-facing service.
//!
//! [`build_doc_graph`] compiles planner → retriever → analyst → writer → critic with the
//! critic's conditional loop back to the writer. [`DocIntelligence`] owns the compiled graph
//! and the document index and exposes `upload` and `ask` to the HTTP server and CLI.

mod config;
mod error;
mod graph;
mod llms;
mod service;

pub use config::PipelineConfig;
pub use error::{PreconditionError, ServiceError};
pub use graph::build_doc_graph;
pub use llms::{openai_config, PipelineLlms};
pub use service::{AskResponse, DocIntelligence, UploadResult, NO_ANSWER};
