//! State threaded through the document pipeline.
//!
//! [`DocState`] is created per question by the caller and accumulates the output of every
//! stage. Stages return a [`DocStateUpdate`]; the executor merges it with
//! [`GraphState::apply_update`](crate::graph::GraphState::apply_update), which rejects
//! updates that break the field ownership rules with a [`StateError`].
//!
//! # Example
//!
//! ```rust
//! use docintel::{DocState, DocStateUpdate, GraphState};
//!
//! let mut state = DocState::new("What is the refund policy?");
//! state
//!     .apply_update(DocStateUpdate {
//!         plan: Some("1. find the policy".into()),
//!         ..Default::default()
//!     })
//!     .unwrap();
//! assert_eq!(state.plan.as_deref(), Some("1. find the policy"));
//! assert_eq!(state.iteration, 0);
//! ```

mod doc_state;

pub use doc_state::{DocState, DocStateUpdate, StateError};
