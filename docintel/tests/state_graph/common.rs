//! Shared types for StateGraph integration tests: TrailState, StepNode, FailingNode.
//!
//! Used by compile_fail, invoke and cancel test modules.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use docintel::{AgentError, GenerationError, GraphState, Node, StateError, StateGraph, END};

/// Records the order nodes ran in.
#[derive(Debug, Clone, Default)]
pub struct TrailState {
    pub trail: Vec<String>,
}

#[derive(Debug, Default)]
pub struct TrailUpdate {
    pub visited: Option<String>,
    /// When set, the merge is rejected.
    pub reject: bool,
}

impl GraphState for TrailState {
    type Update = TrailUpdate;

    fn apply_update(&mut self, update: TrailUpdate) -> Result<(), StateError> {
        if update.reject {
            return Err(StateError::ImmutableField("trail"));
        }
        if let Some(v) = update.visited {
            self.trail.push(v);
        }
        Ok(())
    }
}

/// Appends its own id to the trail.
pub struct StepNode(pub &'static str);

#[async_trait]
impl Node<TrailState> for StepNode {
    fn id(&self) -> &str {
        self.0
    }

    async fn run(&self, _state: &TrailState) -> Result<TrailUpdate, AgentError> {
        Ok(TrailUpdate {
            visited: Some(self.0.to_string()),
            reject: false,
        })
    }
}

/// Always fails with a backend error.
pub struct FailingNode(pub &'static str);

#[async_trait]
impl Node<TrailState> for FailingNode {
    fn id(&self) -> &str {
        self.0
    }

    async fn run(&self, _state: &TrailState) -> Result<TrailUpdate, AgentError> {
        Err(GenerationError::Backend("always fails".into()).into())
    }
}

/// Returns an update the state refuses to merge.
pub struct RejectedNode(pub &'static str);

#[async_trait]
impl Node<TrailState> for RejectedNode {
    fn id(&self) -> &str {
        self.0
    }

    async fn run(&self, _state: &TrailState) -> Result<TrailUpdate, AgentError> {
        Ok(TrailUpdate {
            visited: None,
            reject: true,
        })
    }
}

pub fn path_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// a → b → c, where c loops back to b while the trail is shorter than `stop_at`.
pub fn looping_graph(stop_at: usize) -> StateGraph<TrailState> {
    let mut graph = StateGraph::<TrailState>::new();
    graph
        .add_node("a", Arc::new(StepNode("a")))
        .add_node("b", Arc::new(StepNode("b")))
        .add_node("c", Arc::new(StepNode("c")))
        .set_entry_point("a")
        .add_edge("a", "b")
        .add_edge("b", "c")
        .add_conditional_edges(
            "c",
            Arc::new(move |s: &TrailState| {
                if s.trail.len() < stop_at {
                    "again".to_string()
                } else {
                    "done".to_string()
                }
            }),
            path_map(&[("again", "b"), ("done", END)]),
        );
    graph
}
