//! Graph node trait: one stage in a StateGraph.
//!
//! A node reads the current state by shared reference and returns a partial update; the
//! executor merges the update into the state with [`GraphState::apply_update`]. Nodes never
//! decide routing themselves: the next node comes from the graph's edges.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::AgentError;
use crate::state::StateError;

/// State type that can flow through a [`StateGraph`](super::StateGraph).
///
/// `Update` is the partial record a node returns. `apply_update` merges it into the current
/// state: fields present in the update replace the previous value, absent fields are left
/// untouched. Implementations validate their own invariants here and reject updates that
/// break them.
pub trait GraphState: Clone + Send + Sync + Debug + 'static {
    /// Partial update returned by one node. `Default` is the empty update.
    type Update: Default + Send + Debug + 'static;

    /// Merges `update` into `self`.
    fn apply_update(&mut self, update: Self::Update) -> Result<(), StateError>;
}

/// One stage in a graph: state in (borrowed), partial update out.
///
/// **Interaction**: Registered with `StateGraph::add_node`; run by
/// `CompiledStateGraph::invoke`. Implementations must only set the fields they own and must
/// be stateless between invocations (the same node instance serves concurrent runs).
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: GraphState,
{
    /// Node id (e.g. `"planner"`, `"critic"`). Must be unique within a graph.
    fn id(&self) -> &str;

    /// One step: read `state`, return the update to merge.
    async fn run(&self, state: &S) -> Result<S::Update, AgentError>;
}
