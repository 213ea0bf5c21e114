//! Wiring of the document graph.

use std::collections::HashMap;
use std::sync::Arc;

use crate::agents::{
    route_after_critic, AnalystNode, CriticNode, PlannerNode, RetrieverNode, WriterNode, ANALYST,
    CRITIC, PLANNER, RETRIEVER, ROUTE_END, ROUTE_WRITER, WRITER,
};
use crate::graph::{CompilationError, CompiledStateGraph, NodeMiddleware, StateGraph, END};
use crate::prompts::StagePrompts;
use crate::retrieval::Retriever;
use crate::state::DocState;

use super::{PipelineConfig, PipelineLlms};

/// Builds and compiles planner → retriever → analyst → writer → critic, with the critic
/// routing back to the writer while the router says so.
///
/// Called once at startup; the result is shared by every request.
pub fn build_doc_graph(
    llms: PipelineLlms,
    prompts: Arc<StagePrompts>,
    retriever: Arc<dyn Retriever>,
    config: &PipelineConfig,
    middleware: Option<Arc<dyn NodeMiddleware<DocState>>>,
) -> Result<CompiledStateGraph<DocState>, CompilationError> {
    let max_iterations = config.max_iterations;
    let path_map: HashMap<String, String> = [
        (ROUTE_WRITER.to_string(), WRITER.to_string()),
        (ROUTE_END.to_string(), END.to_string()),
    ]
    .into_iter()
    .collect();

    let mut graph = StateGraph::<DocState>::new();
    graph
        .add_node(PLANNER, Arc::new(PlannerNode::new(llms.planner, prompts.clone())))
        .add_node(
            RETRIEVER,
            Arc::new(RetrieverNode::new(retriever, config.retrieval_k)),
        )
        .add_node(ANALYST, Arc::new(AnalystNode::new(llms.analyst, prompts.clone())))
        .add_node(WRITER, Arc::new(WriterNode::new(llms.writer, prompts.clone())))
        .add_node(CRITIC, Arc::new(CriticNode::new(llms.critic, prompts)))
        .set_entry_point(PLANNER)
        .add_edge(PLANNER, RETRIEVER)
        .add_edge(RETRIEVER, ANALYST)
        .add_edge(ANALYST, WRITER)
        .add_edge(WRITER, CRITIC)
        .add_conditional_edges(
            CRITIC,
            Arc::new(move |s: &DocState| route_after_critic(s, max_iterations).to_string()),
            path_map,
        );

    match middleware {
        Some(m) => graph.with_middleware(m).compile(),
        None => graph.compile(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::generate_text;
    use crate::llm::MockLlm;
    use crate::retrieval::{DocumentIndex, HashEmbedder, RecursiveSplitter};

    #[test]
    fn doc_graph_compiles_with_expected_edges() {
        let graph = build_doc_graph(
            PipelineLlms::uniform(Arc::new(MockLlm::with_content("x"))),
            Arc::new(StagePrompts::default()),
            Arc::new(DocumentIndex::new(
                Arc::new(HashEmbedder::default()),
                RecursiveSplitter::default(),
            )),
            &PipelineConfig::default(),
            None,
        )
        .unwrap();
        assert_eq!(graph.entry(), PLANNER);
        let text = generate_text(&graph);
        assert!(text.contains("writer -> critic"));
        assert!(text.contains("critic -> writer [writer]"));
        assert!(text.contains("critic -> __end__ [end]"));
    }
}
