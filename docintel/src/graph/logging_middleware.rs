//! Logging middleware that prints node enter/exit around each node.run call.
//!
//! Enabled by the CLI's `--verbose` flag. Interacts with [`NodeMiddleware`](super::NodeMiddleware).

use async_trait::async_trait;
use std::time::Instant;

use crate::error::AgentError;

use super::{GraphState, NodeFuture, NodeMiddleware};

/// Middleware that logs node enter/exit (with elapsed time) around each node.run call.
///
/// Logs to stderr so that normal output (the answer) can be redirected separately.
pub struct LoggingNodeMiddleware<S> {
    _phantom: std::marker::PhantomData<fn(S)>,
}

impl<S> Default for LoggingNodeMiddleware<S> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<S> NodeMiddleware<S> for LoggingNodeMiddleware<S>
where
    S: GraphState,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: Box<dyn FnOnce(S) -> NodeFuture<S> + Send>,
    ) -> Result<S::Update, AgentError> {
        eprintln!("[node] enter node={}", node_id);
        let started = Instant::now();
        let result = inner(state).await;
        let elapsed_ms = started.elapsed().as_millis();
        match &result {
            Ok(_) => eprintln!("[node] exit node={} elapsed_ms={}", node_id, elapsed_ms),
            Err(e) => eprintln!(
                "[node] exit node={} elapsed_ms={} error={}",
                node_id, elapsed_ms, e
            ),
        }
        result
    }
}
