//! Conditional edges: route to the next node based on state.
//!
//! A source node has a routing function that takes the current state and returns a label;
//! the label is looked up in the path map to get the next node id (or `END`).
//!
//! **Interaction**: Used by `StateGraph::add_conditional_edges` and by the
//! `CompiledStateGraph` run loop after the source node's update has been merged.

use std::collections::HashMap;
use std::sync::Arc;

/// Router function: takes a reference to state and returns a routing label.
///
/// Must be total: every state maps to some label. Labels are resolved through the path map.
pub type ConditionalRouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Conditional edge definition: routing function plus label → node map.
#[derive(Clone)]
pub struct ConditionalRouter<S> {
    /// Function that returns a routing label from the current state.
    pub(super) path: ConditionalRouterFn<S>,
    /// Map from routing label to node id (or END).
    pub(super) path_map: HashMap<String, String>,
}

impl<S> ConditionalRouter<S> {
    /// Builds a conditional router.
    pub fn new(path: ConditionalRouterFn<S>, path_map: HashMap<String, String>) -> Self {
        Self { path, path_map }
    }

    /// Resolves the next node id from the current state.
    ///
    /// Returns `Err(label)` when the router produced a label with no entry in the path map.
    pub fn resolve_next(&self, state: &S) -> Result<String, String> {
        let label = (self.path)(state);
        match self.path_map.get(&label) {
            Some(target) => Ok(target.clone()),
            None => Err(label),
        }
    }

    /// All targets reachable through this router, one per label.
    pub fn targets(&self) -> impl Iterator<Item = &String> {
        self.path_map.values()
    }

    /// Label → target pairs, sorted by label.
    pub fn routes(&self) -> Vec<(&str, &str)> {
        let mut routes: Vec<(&str, &str)> = self
            .path_map
            .iter()
            .map(|(l, t)| (l.as_str(), t.as_str()))
            .collect();
        routes.sort();
        routes
    }
}

/// How to determine the next node after a given node runs.
///
/// Stored in the compiled graph's next map.
#[derive(Clone)]
pub enum NextEntry<S> {
    /// Single fixed next node (or END).
    Unconditional(String),
    /// Next node is decided by the router from the merged state.
    Conditional(ConditionalRouter<S>),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> ConditionalRouter<u32> {
        ConditionalRouter::new(
            Arc::new(|n: &u32| if *n > 2 { "stop".into() } else { "again".into() }),
            [
                ("again".to_string(), "work".to_string()),
                ("stop".to_string(), "__end__".to_string()),
            ]
            .into_iter()
            .collect(),
        )
    }

    #[test]
    fn resolve_next_maps_label_through_path_map() {
        let r = router();
        assert_eq!(r.resolve_next(&1).unwrap(), "work");
        assert_eq!(r.resolve_next(&3).unwrap(), "__end__");
    }

    #[test]
    fn resolve_next_reports_unmapped_label() {
        let r = ConditionalRouter::new(
            Arc::new(|_: &u32| "nowhere".to_string()),
            HashMap::new(),
        );
        assert_eq!(r.resolve_next(&0).unwrap_err(), "nowhere");
    }

    #[test]
    fn routes_are_sorted_by_label() {
        let r = router();
        assert_eq!(r.routes(), vec![("again", "work"), ("stop", "__end__")]);
    }
}
