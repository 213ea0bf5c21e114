//! Compile-time validation: every malformed graph is rejected before it can run.

use std::sync::Arc;

use docintel::{CompilationError, StateGraph, END, START};

use crate::common::{looping_graph, path_map, StepNode, TrailState};

fn graph_with(ids: &[&'static str]) -> StateGraph<TrailState> {
    let mut graph = StateGraph::<TrailState>::new();
    for id in ids {
        graph.add_node(*id, Arc::new(StepNode(id)));
    }
    graph
}

/// **Scenario**: the looping fixture is valid.
#[test]
fn looping_graph_compiles() {
    let compiled = looping_graph(5).compile().expect("valid graph");
    assert_eq!(compiled.entry(), "a");
    assert_eq!(compiled.node_ids(), vec!["a", "b", "c"]);
}

/// **Scenario**: no entry point.
#[test]
fn compile_fails_without_entry_point() {
    let mut graph = graph_with(&["a"]);
    graph.add_edge("a", END);
    assert_eq!(graph.compile().err(), Some(CompilationError::MissingStart));
}

/// **Scenario**: the same id registered twice.
#[test]
fn compile_fails_on_duplicate_node() {
    let mut graph = graph_with(&["a", "a"]);
    graph.set_entry_point("a").add_edge("a", END);
    assert_eq!(
        graph.compile().err(),
        Some(CompilationError::DuplicateNode("a".into()))
    );
}

/// **Scenario**: an edge names a node that was never added.
#[test]
fn compile_fails_on_unknown_edge_target() {
    let mut graph = graph_with(&["a"]);
    graph.set_entry_point("a").add_edge("a", "ghost");
    assert_eq!(
        graph.compile().err(),
        Some(CompilationError::NodeNotFound("ghost".into()))
    );
}

/// **Scenario**: a path map target is not a node.
#[test]
fn compile_fails_on_unknown_path_map_target() {
    let mut graph = graph_with(&["a"]);
    graph.set_entry_point("a").add_conditional_edges(
        "a",
        Arc::new(|_: &TrailState| "x".to_string()),
        path_map(&[("x", "ghost"), ("done", END)]),
    );
    assert_eq!(
        graph.compile().err(),
        Some(CompilationError::InvalidConditionalPathMap("ghost".into()))
    );
}

/// **Scenario**: a conditional edge-set with no way out.
#[test]
fn compile_fails_when_router_never_reaches_end() {
    let mut graph = graph_with(&["a", "b"]);
    graph
        .set_entry_point("a")
        .add_edge("a", "b")
        .add_conditional_edges(
            "b",
            Arc::new(|_: &TrailState| "again".to_string()),
            path_map(&[("again", "a")]),
        );
    assert_eq!(
        graph.compile().err(),
        Some(CompilationError::ConditionalWithoutEnd("b".into()))
    );
}

/// **Scenario**: two outgoing edges from one node.
#[test]
fn compile_fails_on_branching_edges() {
    let mut graph = graph_with(&["a", "b"]);
    graph
        .set_entry_point("a")
        .add_edge("a", "b")
        .add_edge("a", END)
        .add_edge("b", END);
    assert!(matches!(
        graph.compile().err(),
        Some(CompilationError::InvalidChain(_))
    ));
}

/// **Scenario**: an edge pointing back into START.
#[test]
fn compile_fails_on_edge_into_start() {
    let mut graph = graph_with(&["a"]);
    graph.set_entry_point("a").add_edge("a", START);
    assert!(matches!(
        graph.compile().err(),
        Some(CompilationError::InvalidChain(_))
    ));
}

/// **Scenario**: a node with both a plain edge and a router.
#[test]
fn compile_fails_on_edge_and_conditional_from_same_node() {
    let mut graph = graph_with(&["a"]);
    graph
        .set_entry_point("a")
        .add_edge("a", END)
        .add_conditional_edges(
            "a",
            Arc::new(|_: &TrailState| "done".to_string()),
            path_map(&[("done", END)]),
        );
    assert_eq!(
        graph.compile().err(),
        Some(CompilationError::NodeHasBothEdgeAndConditional("a".into()))
    );
}

/// **Scenario**: a node that nothing leads to.
#[test]
fn compile_fails_on_unreachable_node() {
    let mut graph = graph_with(&["a", "orphan"]);
    graph
        .set_entry_point("a")
        .add_edge("a", END)
        .add_edge("orphan", END);
    assert_eq!(
        graph.compile().err(),
        Some(CompilationError::UnreachableNode("orphan".into()))
    );
}

/// **Scenario**: a reachable node with no successor.
#[test]
fn compile_fails_on_dead_end() {
    let mut graph = graph_with(&["a", "b"]);
    graph.set_entry_point("a").add_edge("a", "b");
    assert_eq!(
        graph.compile().err(),
        Some(CompilationError::DeadEnd("b".into()))
    );
}

/// **Scenario**: a router label leads into a cycle that never reaches END.
#[test]
fn compile_fails_on_trapped_cycle() {
    let mut graph = graph_with(&["a", "b", "c"]);
    graph
        .set_entry_point("a")
        .add_conditional_edges(
            "a",
            Arc::new(|_: &TrailState| "done".to_string()),
            path_map(&[("loop", "b"), ("done", END)]),
        )
        .add_edge("b", "c")
        .add_edge("c", "b");
    assert_eq!(
        graph.compile().err(),
        Some(CompilationError::NoPathToEnd("b".into()))
    );
}
