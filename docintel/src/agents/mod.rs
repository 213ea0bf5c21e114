//! Pipeline stages: planner → retriever → analyst → writer → critic, plus the router that
//! decides whether the critic sends the draft back to the writer.
//!
//! Every stage implements `Node<DocState>`, reads the state by reference and returns a
//! `DocStateUpdate` setting only the fields it owns.

mod analyst;
mod critic;
mod planner;
mod retriever;
mod routing;
mod writer;

pub use analyst::AnalystNode;
pub use critic::CriticNode;
pub use planner::PlannerNode;
pub use retriever::{RetrieverNode, CONTEXT_SEPARATOR, NO_DOCUMENTS_CONTEXT};
pub use routing::{route_after_critic, Verdict, MAX_ITERATIONS, ROUTE_END, ROUTE_WRITER};
pub use writer::WriterNode;

/// Node ids used in the document graph.
pub const PLANNER: &str = "planner";
pub const RETRIEVER: &str = "retriever";
pub const ANALYST: &str = "analyst";
pub const WRITER: &str = "writer";
pub const CRITIC: &str = "critic";
