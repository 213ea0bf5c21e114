//! State graph: nodes + explicit edges (from → to) and at most one conditional edge-set.
//!
//! Add nodes with `add_node`, declare the entry with `set_entry_point` (same as
//! `add_edge(START, id)`), chain nodes with `add_edge(from, to)` using `END` for the exit,
//! and optionally route after one node with `add_conditional_edges`. Then `compile` to get
//! a `CompiledStateGraph`.
//!
//! # Conditional edges
//!
//! After the source node runs and its update is merged, a routing function `(state) -> label`
//! is called and the label is looked up in the path map. A node must have either one
//! outgoing `add_edge` or `add_conditional_edges`, not both, and one label must map to `END`.
//!
//! # Validation
//!
//! `compile` checks the topology statically: every node is reachable from the entry, every
//! reachable node has a successor, and END is reachable from every reachable node when all
//! router labels are considered. A graph that compiles can only stall if a router keeps
//! choosing a loop label; bounding that is the router's job.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
use crate::graph::node::{GraphState, Node};
use crate::graph::node_middleware::NodeMiddleware;

/// Sentinel for graph entry: use as `from_id` in `add_edge(START, first_node_id)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: use as `to_id` in `add_edge(last_node_id, END)` or as a
/// conditional path_map target.
pub const END: &str = "__end__";

/// State graph: nodes plus explicit edges and an optional conditional edge-set.
///
/// Generic over state type `S`. Built once at startup; `compile()` consumes it and yields an
/// immutable `CompiledStateGraph<S>`.
pub struct StateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Ids passed to `add_node` more than once; reported by `compile`.
    duplicate_nodes: Vec<String>,
    /// Edges (from_id, to_id). A node may have one outgoing edge or conditional_edges, not both.
    edges: Vec<(String, String)>,
    /// Conditional edges: (source node id, router). At most one entry is valid.
    conditional_edges: Vec<(String, ConditionalRouter<S>)>,
    /// Optional node middleware; see `with_middleware`.
    middleware: Option<Arc<dyn NodeMiddleware<S>>>,
}

impl<S> Default for StateGraph<S>
where
    S: GraphState,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: GraphState,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            duplicate_nodes: Vec::new(),
            edges: Vec::new(),
            conditional_edges: Vec::new(),
            middleware: None,
        }
    }

    /// Attaches node middleware. Chain with `compile()`: `graph.with_middleware(m).compile()?`.
    pub fn with_middleware(self, middleware: Arc<dyn NodeMiddleware<S>>) -> Self {
        Self {
            middleware: Some(middleware),
            ..self
        }
    }

    /// Adds a node; id must be unique (a repeated id makes `compile` fail).
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            self.duplicate_nodes.push(id);
        } else {
            self.nodes.insert(id, node);
        }
        self
    }

    /// Declares the entry node. Equivalent to `add_edge(START, id)`.
    pub fn set_entry_point(&mut self, id: impl Into<String>) -> &mut Self {
        self.add_edge(START, id)
    }

    /// Adds an edge from `from_id` to `to_id`.
    ///
    /// Use `START` for graph entry and `END` for graph exit. Both ids (except START/END)
    /// must be registered via `add_node` before `compile()`.
    pub fn add_edge(&mut self, from_id: impl Into<String>, to_id: impl Into<String>) -> &mut Self {
        self.edges.push((from_id.into(), to_id.into()));
        self
    }

    /// Adds conditional edges from `source`: after it runs, `path(state)` yields a label and
    /// the next node is `path_map[label]`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// graph.add_conditional_edges(
    ///     "critic",
    ///     Arc::new(|s: &DocState| route_after_critic(s, 3).to_string()),
    ///     [("writer".into(), "writer".into()), ("end".into(), END.into())].into_iter().collect(),
    /// );
    /// ```
    pub fn add_conditional_edges(
        &mut self,
        source: impl Into<String>,
        path: ConditionalRouterFn<S>,
        path_map: HashMap<String, String>,
    ) -> &mut Self {
        self.conditional_edges
            .push((source.into(), ConditionalRouter::new(path, path_map)));
        self
    }

    /// Builds the executable graph after validating its structure.
    ///
    /// Returns `CompilationError` for unknown ids, ambiguous successors, unreachable nodes or
    /// nodes with no path to END. On success, the graph is immutable and ready for `invoke`.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        if let Some(id) = self.duplicate_nodes.first() {
            return Err(CompilationError::DuplicateNode(id.clone()));
        }

        for (from, to) in &self.edges {
            if from == END {
                return Err(CompilationError::InvalidChain("edge out of END".into()));
            }
            if to == START {
                return Err(CompilationError::InvalidChain("edge into START".into()));
            }
            if from != START && !self.nodes.contains_key(from) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if to != END && !self.nodes.contains_key(to) {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
        }

        if let Some((extra, _)) = self.conditional_edges.get(1) {
            return Err(CompilationError::MultipleConditionalEdges(extra.clone()));
        }
        for (source, router) in &self.conditional_edges {
            if !self.nodes.contains_key(source) {
                return Err(CompilationError::NodeNotFound(source.clone()));
            }
            for target in router.targets() {
                if target != END && !self.nodes.contains_key(target) {
                    return Err(CompilationError::InvalidConditionalPathMap(target.clone()));
                }
            }
            if !router.targets().any(|t| t == END) {
                return Err(CompilationError::ConditionalWithoutEnd(source.clone()));
            }
        }

        let start_edges: Vec<&String> = self
            .edges
            .iter()
            .filter(|(f, _)| f == START)
            .map(|(_, t)| t)
            .collect();
        let first = match start_edges.as_slice() {
            [] => return Err(CompilationError::MissingStart),
            [only] => (*only).clone(),
            _ => {
                return Err(CompilationError::InvalidChain(
                    "multiple edges from START (branch)".into(),
                ))
            }
        };
        if first == END {
            return Err(CompilationError::InvalidChain("START connects directly to END".into()));
        }

        let mut next_map: HashMap<String, NextEntry<S>> = HashMap::new();
        for (from, to) in self.edges.iter().filter(|(f, _)| f != START) {
            if next_map.contains_key(from) {
                return Err(CompilationError::InvalidChain(format!(
                    "node {} has more than one outgoing edge (branch)",
                    from
                )));
            }
            next_map.insert(from.clone(), NextEntry::Unconditional(to.clone()));
        }
        for (source, router) in &self.conditional_edges {
            if next_map.contains_key(source) {
                return Err(CompilationError::NodeHasBothEdgeAndConditional(
                    source.clone(),
                ));
            }
            next_map.insert(source.clone(), NextEntry::Conditional(router.clone()));
        }

        let successors: HashMap<&str, Vec<&str>> = next_map
            .iter()
            .map(|(from, entry)| {
                let targets = match entry {
                    NextEntry::Unconditional(to) => vec![to.as_str()],
                    NextEntry::Conditional(router) => {
                        router.targets().map(String::as_str).collect()
                    }
                };
                (from.as_str(), targets)
            })
            .collect();

        let reachable = reachable_from(&first, &successors);
        let mut unreachable: Vec<&String> = self
            .nodes
            .keys()
            .filter(|id| !reachable.contains(id.as_str()))
            .collect();
        unreachable.sort();
        if let Some(id) = unreachable.first() {
            return Err(CompilationError::UnreachableNode((*id).clone()));
        }

        let mut ordered: Vec<&str> = reachable.iter().copied().collect();
        ordered.sort();
        for id in &ordered {
            if !successors.contains_key(id) {
                return Err(CompilationError::DeadEnd(id.to_string()));
            }
        }

        let reaches_end = nodes_reaching_end(&successors);
        for id in &ordered {
            if !reaches_end.contains(id) {
                return Err(CompilationError::NoPathToEnd(id.to_string()));
            }
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            first_node_id: first,
            next_map,
            middleware: self.middleware,
        })
    }
}

/// Nodes reachable from `entry` following every edge and every router label (END excluded).
fn reachable_from<'a>(entry: &'a str, successors: &HashMap<&'a str, Vec<&'a str>>) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([entry]);
    while let Some(id) = queue.pop_front() {
        if id == END || !seen.insert(id) {
            continue;
        }
        if let Some(next) = successors.get(id) {
            queue.extend(next.iter().copied());
        }
    }
    seen
}

/// Nodes from which END is reachable: backward search from END over reversed edges.
fn nodes_reaching_end<'a>(successors: &HashMap<&'a str, Vec<&'a str>>) -> HashSet<&'a str> {
    let mut predecessors: HashMap<&str, Vec<&str>> = HashMap::new();
    for (from, targets) in successors {
        for to in targets {
            predecessors.entry(*to).or_default().push(*from);
        }
    }
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([END]);
    while let Some(id) = queue.pop_front() {
        if let Some(prev) = predecessors.get(id) {
            for p in prev {
                if seen.insert(*p) {
                    queue.push_back(*p);
                }
            }
        }
    }
    seen
}
