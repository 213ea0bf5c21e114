//! State graph: nodes + edges + one optional conditional edge-set, compile and invoke.
//!
//! StateGraph: add nodes and edges, compile (structural validation happens here), then
//! invoke the compiled graph with an initial state. The compiled graph is immutable and can
//! be shared across concurrent runs.

mod compile_error;
mod compiled;
mod conditional;
mod logging;
mod logging_middleware;
mod name_node;
mod node;
mod node_middleware;
mod state_graph;
mod visualization;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use logging::{
    log_graph_cancelled, log_graph_complete, log_graph_error, log_graph_start, log_node_complete,
    log_node_start, log_routing, log_state_update,
};
pub use logging_middleware::LoggingNodeMiddleware;
pub use name_node::NameNode;
pub use node::{GraphState, Node};
pub use node_middleware::{NodeFuture, NodeMiddleware};
pub use state_graph::{StateGraph, END, START};
pub use visualization::{generate_dot, generate_text};
