//! Graph compilation error.
//!
//! Returned by `StateGraph::compile` when the declared nodes and edges do not form a valid
//! workflow: unknown ids, ambiguous successors, unreachable nodes, or a node from which the
//! terminal node cannot be reached under some router label.

use thiserror::Error;

/// Error when compiling a state graph. Fatal: the graph is built once at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompilationError {
    /// The same node id was registered more than once.
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    /// A node id in an edge or the entry point was not registered via `add_node`.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No entry point was declared.
    #[error("graph must have exactly one edge from START")]
    MissingStart,

    /// Edges do not form a valid chain (branch, duplicate successor, edge into START).
    #[error("invalid edges: {0}")]
    InvalidChain(String),

    /// A node has both an outgoing edge and conditional edges; it must have exactly one.
    #[error("node has both edge and conditional edges: {0}")]
    NodeHasBothEdgeAndConditional(String),

    /// More than one conditional edge-set was declared.
    #[error("only one conditional edge-set is supported, found another on: {0}")]
    MultipleConditionalEdges(String),

    /// A value in a conditional path_map is not a valid node id or END.
    #[error("conditional path_map invalid target: {0}")]
    InvalidConditionalPathMap(String),

    /// No label of the conditional edge-set on this node maps to END.
    #[error("conditional edges on {0} have no label mapping to END")]
    ConditionalWithoutEnd(String),

    /// A declared node cannot be reached from the entry point.
    #[error("node is unreachable from the entry point: {0}")]
    UnreachableNode(String),

    /// A reachable node has no outgoing edge; execution would stall there.
    #[error("node has no outgoing edge: {0}")]
    DeadEnd(String),

    /// From this node, no sequence of edges (over every router label) reaches END.
    #[error("no path to END from node: {0}")]
    NoPathToEnd(String),
}
