//! Compiled state graph: immutable, supports invoke only.
//!
//! Built by `StateGraph::compile`. Holds the nodes, the entry node and the next map derived
//! from explicit and conditional edges. One compiled graph serves any number of concurrent
//! runs; each run owns its state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::error::GraphError;

use super::logging::{
    log_graph_cancelled, log_graph_complete, log_graph_error, log_graph_start, log_node_complete,
    log_node_start, log_routing, log_state_update,
};
use super::node_middleware::{NodeFuture, NodeMiddleware};
use super::state_graph::{END, START};
use super::{GraphState, NextEntry, Node};

/// Compiled graph: immutable structure, supports invoke only.
///
/// Runs from the entry node; after each node, merges its update into the state and follows
/// the unconditional edge or the conditional router to pick the next node, until END.
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// First node to run (the target of the START edge).
    pub(super) first_node_id: String,
    /// Map from node id to how to get next: Unconditional(to_id) or Conditional(router).
    pub(super) next_map: HashMap<String, NextEntry<S>>,
    /// Optional node middleware; set with `StateGraph::with_middleware`.
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
}

impl<S> CompiledStateGraph<S>
where
    S: GraphState,
{
    /// Id of the entry node.
    pub fn entry(&self) -> &str {
        &self.first_node_id
    }

    /// Node ids, sorted.
    pub fn node_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        ids.sort();
        ids
    }

    /// All edges as `(from, to, label)`, START edge first, then sorted by source and label.
    /// `label` is `None` for unconditional edges.
    pub fn edges(&self) -> Vec<(&str, &str, Option<&str>)> {
        let mut edges: Vec<(&str, &str, Option<&str>)> = Vec::new();
        for (from, entry) in &self.next_map {
            match entry {
                NextEntry::Unconditional(to) => edges.push((from.as_str(), to.as_str(), None)),
                NextEntry::Conditional(router) => {
                    for (label, to) in router.routes() {
                        edges.push((from.as_str(), to, Some(label)));
                    }
                }
            }
        }
        edges.sort();
        edges.insert(0, (START, self.first_node_id.as_str(), None));
        edges
    }

    /// Runs the graph to completion from `state`.
    ///
    /// Equivalent to [`invoke_with_cancel`](Self::invoke_with_cancel) with a token that is
    /// never cancelled.
    pub async fn invoke(&self, state: S) -> Result<S, GraphError> {
        self.invoke_with_cancel(state, &CancellationToken::new())
            .await
    }

    /// Runs the graph to completion, checking `cancel` before every node.
    ///
    /// A node that has started is allowed to finish; its update is merged, then the next
    /// check stops the run with [`GraphError::Cancelled`]. On any error the partial state is
    /// dropped.
    pub async fn invoke_with_cancel(
        &self,
        state: S,
        cancel: &CancellationToken,
    ) -> Result<S, GraphError> {
        let span = tracing::info_span!("graph_run", run_id = %uuid::Uuid::new_v4());
        let result = self.run_loop(state, cancel).instrument(span.clone()).await;
        if let Err(e) = &result {
            let _enter = span.enter();
            log_graph_error(e);
        }
        result
    }

    async fn run_loop(&self, mut state: S, cancel: &CancellationToken) -> Result<S, GraphError> {
        log_graph_start(&self.first_node_id);
        let mut current = self.first_node_id.clone();
        let mut steps = 0usize;

        loop {
            if cancel.is_cancelled() {
                log_graph_cancelled(&current);
                return Err(GraphError::Cancelled);
            }

            let node = self.nodes.get(&current).cloned().ok_or_else(|| {
                GraphError::UnknownRoute {
                    node: current.clone(),
                    label: current.clone(),
                }
            })?;

            log_node_start(&current);
            let update = self
                .run_node(node, &state)
                .await
                .map_err(|source| GraphError::NodeFailed {
                    node: current.clone(),
                    source,
                })?;
            log_node_complete(&current);

            state
                .apply_update(update)
                .map_err(|source| GraphError::InvalidUpdate {
                    node: current.clone(),
                    source,
                })?;
            log_state_update(&current, &state);
            steps += 1;

            let next = match self.next_map.get(&current) {
                Some(NextEntry::Unconditional(to)) => {
                    log_routing(&current, to, false);
                    to.clone()
                }
                Some(NextEntry::Conditional(router)) => {
                    let to = router.resolve_next(&state).map_err(|label| {
                        GraphError::UnknownRoute {
                            node: current.clone(),
                            label,
                        }
                    })?;
                    log_routing(&current, &to, true);
                    to
                }
                None => END.to_string(),
            };

            if next == END {
                log_graph_complete(steps);
                return Ok(state);
            }
            current = next;
        }
    }

    async fn run_node(
        &self,
        node: Arc<dyn Node<S>>,
        state: &S,
    ) -> Result<S::Update, crate::error::AgentError> {
        match &self.middleware {
            Some(middleware) => {
                let node_id = node.id().to_string();
                middleware
                    .around_run(
                        &node_id,
                        state.clone(),
                        Box::new(move |s: S| -> NodeFuture<S> {
                            Box::pin(async move { node.run(&s).await })
                        }),
                    )
                    .await
            }
            None => node.run(state).await,
        }
    }
}
