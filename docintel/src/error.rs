//! Stage and execution error types.
//!
//! [`GenerationError`] is what the text-generation boundary returns, [`AgentError`] is what a
//! stage returns from `Node::run`, and [`GraphError`] is what the executor surfaces to callers
//! (with the failing node attached).

use std::time::Duration;

use thiserror::Error;

use crate::retrieval::RetrievalError;
use crate::state::StateError;

/// Failure of one call to the text-generation backend.
///
/// Not retried inside the core; retry policy belongs to the backend client.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The backend returned an error (transport, auth, rate limit, malformed request).
    #[error("generation backend error: {0}")]
    Backend(String),

    /// The call did not complete within the configured timeout.
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),

    /// The backend answered without any completion choice.
    #[error("generation backend returned no choices")]
    EmptyResponse,
}

/// Stage execution error.
///
/// Returned by `Node::run` when a stage cannot produce its update. The executor never
/// swallows it: the run is aborted and the error is wrapped in [`GraphError::NodeFailed`].
#[derive(Debug, Error)]
pub enum AgentError {
    /// Text generation failed or timed out.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Similarity search over the document index failed.
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),
}

/// Error that aborts a graph execution.
///
/// Partial state accumulated before the error is dropped; only the error is reported.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A stage returned an error.
    #[error("node `{node}` failed: {source}")]
    NodeFailed {
        node: String,
        #[source]
        source: AgentError,
    },

    /// A stage returned an update that violates the state's merge rules.
    #[error("node `{node}` returned an invalid update: {source}")]
    InvalidUpdate {
        node: String,
        #[source]
        source: StateError,
    },

    /// A router produced a label that is not in its path map.
    #[error("router after `{node}` returned unknown label `{label}`")]
    UnknownRoute { node: String, label: String },

    /// The run was cancelled between two stages.
    #[error("execution cancelled")]
    Cancelled,
}

impl GraphError {
    /// Name of the node the error is attributed to, when there is one.
    pub fn node(&self) -> Option<&str> {
        match self {
            GraphError::NodeFailed { node, .. }
            | GraphError::InvalidUpdate { node, .. }
            | GraphError::UnknownRoute { node, .. } => Some(node),
            GraphError::Cancelled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: NodeFailed display names the node and the underlying generation error.
    #[test]
    fn node_failed_display_names_node_and_cause() {
        let err = GraphError::NodeFailed {
            node: "analyst".to_string(),
            source: AgentError::Generation(GenerationError::Backend("503".to_string())),
        };
        let s = err.to_string();
        assert!(s.contains("analyst"), "Display should contain node: {}", s);
        assert!(s.contains("503"), "Display should contain cause: {}", s);
        assert_eq!(err.node(), Some("analyst"));
    }

    /// **Scenario**: Cancelled carries no node and is not a node failure.
    #[test]
    fn cancelled_has_no_node() {
        let err = GraphError::Cancelled;
        assert_eq!(err.node(), None);
        assert!(err.to_string().contains("cancelled"));
    }

    #[test]
    fn timeout_display_includes_duration() {
        let err = GenerationError::Timeout(Duration::from_secs(30));
        assert!(err.to_string().contains("30s"), "{}", err);
    }
}
