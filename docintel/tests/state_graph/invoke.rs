//! Invoke: node order, loop termination and error propagation.

use std::sync::Arc;

use docintel::{AgentError, GenerationError, GraphError, StateError, StateGraph, END};

use crate::common::{looping_graph, FailingNode, RejectedNode, StepNode, TrailState};

/// **Scenario**: the router loops c → b until the trail is long enough, then ends.
#[tokio::test]
async fn invoke_runs_loop_until_router_picks_end() {
    let compiled = looping_graph(5).compile().unwrap();
    let out = compiled.invoke(TrailState::default()).await.unwrap();
    assert_eq!(out.trail, vec!["a", "b", "c", "b", "c"]);
}

/// **Scenario**: the same compiled graph serves concurrent runs, each with its own state.
#[tokio::test]
async fn compiled_graph_is_shared_across_concurrent_runs() {
    let compiled = Arc::new(looping_graph(3).compile().unwrap());
    let mut handles = Vec::new();
    for _ in 0..8 {
        let g = compiled.clone();
        handles.push(tokio::spawn(async move { g.invoke(TrailState::default()).await }));
    }
    for h in handles {
        let out = h.await.unwrap().unwrap();
        assert_eq!(out.trail, vec!["a", "b", "c"]);
    }
}

/// **Scenario**: a failing node stops the run and is named in the error.
#[tokio::test]
async fn failing_node_aborts_run_with_node_id() {
    let mut graph = StateGraph::<TrailState>::new();
    graph
        .add_node("a", Arc::new(StepNode("a")))
        .add_node("boom", Arc::new(FailingNode("boom")))
        .add_node("never", Arc::new(StepNode("never")))
        .set_entry_point("a")
        .add_edge("a", "boom")
        .add_edge("boom", "never")
        .add_edge("never", END);
    let err = graph
        .compile()
        .unwrap()
        .invoke(TrailState::default())
        .await
        .unwrap_err();
    assert_eq!(err.node(), Some("boom"));
    match err {
        GraphError::NodeFailed { node, source } => {
            assert_eq!(node, "boom");
            assert!(matches!(
                source,
                AgentError::Generation(GenerationError::Backend(_))
            ));
        }
        other => panic!("expected NodeFailed, got {:?}", other),
    }
}

/// **Scenario**: an update the state refuses is reported as InvalidUpdate for that node.
#[tokio::test]
async fn rejected_update_is_reported_with_node_id() {
    let mut graph = StateGraph::<TrailState>::new();
    graph
        .add_node("bad", Arc::new(RejectedNode("bad")))
        .set_entry_point("bad")
        .add_edge("bad", END);
    let err = graph
        .compile()
        .unwrap()
        .invoke(TrailState::default())
        .await
        .unwrap_err();
    match err {
        GraphError::InvalidUpdate { node, source } => {
            assert_eq!(node, "bad");
            assert_eq!(source, StateError::ImmutableField("trail"));
        }
        other => panic!("expected InvalidUpdate, got {:?}", other),
    }
}

/// **Scenario**: a router returning a label outside its path map fails at run time.
#[tokio::test]
async fn unknown_router_label_fails_run() {
    let mut graph = StateGraph::<TrailState>::new();
    graph
        .add_node("a", Arc::new(StepNode("a")))
        .set_entry_point("a")
        .add_conditional_edges(
            "a",
            Arc::new(|_: &TrailState| "sideways".to_string()),
            crate::common::path_map(&[("done", END)]),
        );
    let err = graph
        .compile()
        .unwrap()
        .invoke(TrailState::default())
        .await
        .unwrap_err();
    match err {
        GraphError::UnknownRoute { node, label } => {
            assert_eq!(node, "a");
            assert_eq!(label, "sideways");
        }
        other => panic!("expected UnknownRoute, got {:?}", other),
    }
}
