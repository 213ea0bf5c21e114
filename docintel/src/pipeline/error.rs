//! Caller-facing errors of the document service.

use thiserror::Error;

use crate::error::{AgentError, GenerationError, GraphError};
use crate::retrieval::RetrievalError;

/// Request rejected before the pipeline runs. Never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("No documents loaded. Please upload a PDF first via POST /upload")]
    NoDocuments,

    #[error("Empty file")]
    EmptyDocument,

    #[error("Unsupported file type: {0}. Please upload a PDF, TXT or MD file")]
    UnsupportedDocument(String),
}

/// Error returned by [`DocIntelligence`](super::DocIntelligence).
///
/// Distinguishes bad requests, generation backend failures (with the failing stage),
/// cancellation and other pipeline or indexing failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// A stage's generation call failed or timed out.
    #[error("generation failed in `{node}`: {source}")]
    Generation {
        node: String,
        #[source]
        source: GenerationError,
    },

    #[error("request cancelled")]
    Cancelled,

    /// Extraction or embedding failed while indexing an upload.
    #[error("failed to process document: {0}")]
    Indexing(#[source] RetrievalError),

    /// Any other execution failure (retrieval during a run, invalid update, unknown route).
    #[error("pipeline error: {0}")]
    Pipeline(#[source] GraphError),
}

impl ServiceError {
    /// Short machine-readable kind, used in HTTP error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Precondition(PreconditionError::EmptyQuestion) => "empty_question",
            ServiceError::Precondition(PreconditionError::NoDocuments) => "no_documents",
            ServiceError::Precondition(PreconditionError::EmptyDocument) => "empty_document",
            ServiceError::Precondition(PreconditionError::UnsupportedDocument(_)) => {
                "unsupported_document"
            }
            ServiceError::Generation { .. } => "generation_failed",
            ServiceError::Cancelled => "cancelled",
            ServiceError::Indexing(_) => "indexing_failed",
            ServiceError::Pipeline(_) => "pipeline_error",
        }
    }

    /// Stage the error is attributed to, when there is one.
    pub fn node(&self) -> Option<&str> {
        match self {
            ServiceError::Generation { node, .. } => Some(node),
            ServiceError::Pipeline(e) => e.node(),
            _ => None,
        }
    }
}

impl From<GraphError> for ServiceError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::NodeFailed {
                node,
                source: AgentError::Generation(source),
            } => ServiceError::Generation { node, source },
            GraphError::Cancelled => ServiceError::Cancelled,
            other => ServiceError::Pipeline(other),
        }
    }
}

impl From<RetrievalError> for ServiceError {
    fn from(e: RetrievalError) -> Self {
        match e {
            RetrievalError::EmptyDocument => PreconditionError::EmptyDocument.into(),
            RetrievalError::UnsupportedDocument(name) => {
                PreconditionError::UnsupportedDocument(name).into()
            }
            other => ServiceError::Indexing(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_node_failure_keeps_node_name() {
        let err: ServiceError = GraphError::NodeFailed {
            node: "analyst".into(),
            source: AgentError::Generation(GenerationError::Backend("503".into())),
        }
        .into();
        assert!(matches!(&err, ServiceError::Generation { node, .. } if node == "analyst"));
        assert_eq!(err.kind(), "generation_failed");
        assert_eq!(err.node(), Some("analyst"));
    }

    #[test]
    fn retrieval_failure_during_run_is_pipeline_error() {
        let err: ServiceError = GraphError::NodeFailed {
            node: "retriever".into(),
            source: AgentError::Retrieval(RetrievalError::Embedding("down".into())),
        }
        .into();
        assert_eq!(err.kind(), "pipeline_error");
        assert_eq!(err.node(), Some("retriever"));
    }

    #[test]
    fn upload_errors_map_to_preconditions() {
        let err: ServiceError = RetrievalError::UnsupportedDocument("a.docx".into()).into();
        assert_eq!(err.kind(), "unsupported_document");
        let err: ServiceError = RetrievalError::EmptyDocument.into();
        assert_eq!(err.to_string(), "Empty file");
        let err: ServiceError = RetrievalError::Extraction("bad xref".into()).into();
        assert_eq!(err.kind(), "indexing_failed");
    }

    #[test]
    fn no_documents_message_matches_api() {
        let err = ServiceError::from(PreconditionError::NoDocuments);
        assert_eq!(
            err.to_string(),
            "No documents loaded. Please upload a PDF first via POST /upload"
        );
        assert_eq!(ServiceError::from(GraphError::Cancelled).kind(), "cancelled");
    }
}
