//! Cancellation: checked between nodes; a started node finishes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use docintel::{AgentError, GraphError, Node, StateGraph, END};
use tokio_util::sync::CancellationToken;

use crate::common::{StepNode, TrailState, TrailUpdate};

/// Cancels the token while it runs, then completes normally.
struct CancellingNode {
    token: CancellationToken,
}

#[async_trait]
impl Node<TrailState> for CancellingNode {
    fn id(&self) -> &str {
        "canceller"
    }

    async fn run(&self, _state: &TrailState) -> Result<TrailUpdate, AgentError> {
        self.token.cancel();
        tokio::time::sleep(Duration::from_millis(5)).await;
        Ok(TrailUpdate {
            visited: Some("canceller".into()),
            reject: false,
        })
    }
}

/// **Scenario**: cancelling mid-node stops the run before the next node.
#[tokio::test]
async fn cancel_during_node_stops_before_next_node() {
    let token = CancellationToken::new();
    let mut graph = StateGraph::<TrailState>::new();
    graph
        .add_node("a", Arc::new(StepNode("a")))
        .add_node(
            "canceller",
            Arc::new(CancellingNode {
                token: token.clone(),
            }),
        )
        .add_node("after", Arc::new(StepNode("after")))
        .set_entry_point("a")
        .add_edge("a", "canceller")
        .add_edge("canceller", "after")
        .add_edge("after", END);
    let compiled = graph.compile().unwrap();

    let err = compiled
        .invoke_with_cancel(TrailState::default(), &token)
        .await
        .unwrap_err();
    assert!(matches!(err, GraphError::Cancelled));
    assert_eq!(err.node(), None);
}

/// **Scenario**: a fresh token lets the same compiled graph run to completion.
#[tokio::test]
async fn uncancelled_token_runs_to_end() {
    let mut graph = StateGraph::<TrailState>::new();
    graph
        .add_node("a", Arc::new(StepNode("a")))
        .set_entry_point("a")
        .add_edge("a", END);
    let out = graph
        .compile()
        .unwrap()
        .invoke_with_cancel(TrailState::default(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(out.trail, vec!["a"]);
}
