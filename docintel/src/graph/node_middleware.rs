//! Node middleware: wrap node.run with external async logic (around pattern).
//!
//! Set via `StateGraph::with_middleware`. The executor hands the middleware an owned snapshot
//! of the state and a boxed `inner` closure that runs the node on it.

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

use crate::error::AgentError;

use super::GraphState;

/// Boxed future produced by the `inner` closure given to [`NodeMiddleware::around_run`].
pub type NodeFuture<S> =
    Pin<Box<dyn Future<Output = Result<<S as GraphState>::Update, AgentError>> + Send>>;

/// Async middleware that wraps node.run.
///
/// Implementations decide what to do before and after calling `inner`; they must call it
/// exactly once to execute the node and should return its result unchanged unless they
/// deliberately replace it.
#[async_trait]
pub trait NodeMiddleware<S>: Send + Sync
where
    S: GraphState,
{
    /// Wraps node.run.
    ///
    /// - `node_id`: current node id
    /// - `state`: snapshot of the state passed to the node
    /// - `inner`: actual node.run logic
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: Box<dyn FnOnce(S) -> NodeFuture<S> + Send>,
    ) -> Result<S::Update, AgentError>;
}
