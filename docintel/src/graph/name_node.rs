//! Name node: a no-op node that only has a name.
//!
//! Implements `Node<S>` for any graph state. Used as a placeholder when wiring or testing
//! graph topology; returns the empty update so the state is left unchanged.

use async_trait::async_trait;

use crate::error::AgentError;

use super::{GraphState, Node};

/// A node that does nothing except expose a name.
///
/// `run` returns `S::Update::default()`, which merges as a no-op.
pub struct NameNode {
    name: String,
}

impl NameNode {
    /// Creates a name node with the given id (returned by `Node::id`).
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl<S> Node<S> for NameNode
where
    S: GraphState,
{
    fn id(&self) -> &str {
        &self.name
    }

    async fn run(&self, _state: &S) -> Result<S::Update, AgentError> {
        Ok(S::Update::default())
    }
}
