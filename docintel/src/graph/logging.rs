//! Logging utilities for graph execution.
//!
//! Structured `tracing` events for graph runs, node execution, state merges and routing.

/// Log node execution start.
pub fn log_node_start(node_id: &str) {
    tracing::debug!(node_id = node_id, "Starting node execution");
}

/// Log node execution completion.
pub fn log_node_complete(node_id: &str) {
    tracing::debug!(node_id = node_id, "Node execution complete");
}

/// Log state update after a node's update was merged.
pub fn log_state_update<S: std::fmt::Debug>(node_id: &str, state: &S) {
    tracing::trace!(node_id = node_id, state = ?state, "State updated");
}

/// Log the edge taken after a node.
pub fn log_routing(from: &str, to: &str, conditional: bool) {
    tracing::debug!(from = from, to = to, conditional, "routing");
}

/// Log graph execution start.
pub fn log_graph_start(entry: &str) {
    tracing::info!(entry = entry, "Starting graph execution");
}

/// Log graph execution completion.
pub fn log_graph_complete(steps: usize) {
    tracing::info!(steps, "Graph execution complete");
}

/// Log graph cancellation (between stages).
pub fn log_graph_cancelled(next_node: &str) {
    tracing::warn!(next_node = next_node, "Graph execution cancelled");
}

/// Log graph execution error.
pub fn log_graph_error(error: &crate::error::GraphError) {
    tracing::error!(%error, "Graph execution error");
}
