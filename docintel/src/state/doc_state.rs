//! DocState: question plus the output of each stage, and the critic's iteration counter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::GraphState;

/// Rejected state merge.
///
/// Raised by [`DocState::apply_update`]; the executor reports it as
/// `GraphError::InvalidUpdate` naming the stage that produced the update.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// The field is set by the caller and may not be changed by a stage.
    #[error("field `{0}` is immutable once set")]
    ImmutableField(&'static str),

    /// The field is written once per execution and already has a value.
    #[error("field `{0}` was already written")]
    AlreadyWritten(&'static str),

    /// `iteration` may only advance by exactly one per critic run.
    #[error("iteration must advance from {current} to {}, got {got}", .current + 1)]
    NonMonotonicIteration { current: u32, got: u32 },
}

/// Shared state of one pipeline execution.
///
/// | field | written by |
/// |---|---|
/// | `question` | caller |
/// | `plan` | planner (once) |
/// | `context` | retriever (once) |
/// | `analysis` | analyst (once) |
/// | `draft_answer` | writer (every pass) |
/// | `feedback`, `iteration` | critic (every pass) |
///
/// Never shared between executions; the compiled graph is what is shared.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocState {
    pub question: String,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub draft_answer: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    /// Number of critic passes so far. Starts at 0.
    #[serde(default)]
    pub iteration: u32,
}

impl DocState {
    /// Initial state: only the question is set.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }
}

/// Partial update returned by one stage. Absent fields leave the state untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocStateUpdate {
    pub question: Option<String>,
    pub plan: Option<String>,
    pub context: Option<String>,
    pub analysis: Option<String>,
    pub draft_answer: Option<String>,
    pub feedback: Option<String>,
    pub iteration: Option<u32>,
}

fn write_once(
    slot: &mut Option<String>,
    value: Option<String>,
    field: &'static str,
) -> Result<(), StateError> {
    if let Some(v) = value {
        if slot.is_some() {
            return Err(StateError::AlreadyWritten(field));
        }
        *slot = Some(v);
    }
    Ok(())
}

impl GraphState for DocState {
    type Update = DocStateUpdate;

    /// Validates the whole update first, then applies it; a rejected update leaves the
    /// state unchanged.
    fn apply_update(&mut self, update: DocStateUpdate) -> Result<(), StateError> {
        if matches!(&update.question, Some(q) if *q != self.question) {
            return Err(StateError::ImmutableField("question"));
        }
        for (field, incoming, current) in [
            ("plan", &update.plan, &self.plan),
            ("context", &update.context, &self.context),
            ("analysis", &update.analysis, &self.analysis),
        ] {
            if incoming.is_some() && current.is_some() {
                return Err(StateError::AlreadyWritten(field));
            }
        }
        if let Some(got) = update.iteration {
            if got != self.iteration + 1 {
                return Err(StateError::NonMonotonicIteration {
                    current: self.iteration,
                    got,
                });
            }
        }

        write_once(&mut self.plan, update.plan, "plan")?;
        write_once(&mut self.context, update.context, "context")?;
        write_once(&mut self.analysis, update.analysis, "analysis")?;
        if let Some(draft) = update.draft_answer {
            self.draft_answer = Some(draft);
        }
        if let Some(feedback) = update.feedback {
            self.feedback = Some(feedback);
        }
        if let Some(iteration) = update.iteration {
            self.iteration = iteration;
        }
        Ok(())
    }
}
