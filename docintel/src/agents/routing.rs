//! Routing after the critic: loop back to the writer or finish.

use crate::state::DocState;

/// Default bound on writer+critic passes.
pub const MAX_ITERATIONS: u32 = 3;

/// Label returned when the draft goes back to the writer.
pub const ROUTE_WRITER: &str = "writer";
/// Label returned when the run finishes.
pub const ROUTE_END: &str = "end";

/// The critic's verdict, derived once from its raw feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Feedback contains `IMPROVE` (any case).
    Improve,
    /// Anything else, including no feedback at all.
    Final,
}

impl Verdict {
    /// Only the presence of `IMPROVE` matters; `FINAL` is not required.
    pub fn classify(feedback: Option<&str>) -> Self {
        match feedback {
            Some(f) if f.to_uppercase().contains("IMPROVE") => Verdict::Improve,
            _ => Verdict::Final,
        }
    }
}

/// Routes after the critic: `"writer"` iff the verdict is `Improve` and fewer than
/// `max_iterations` critic passes have happened, else `"end"`. Total and pure.
pub fn route_after_critic(state: &DocState, max_iterations: u32) -> &'static str {
    match Verdict::classify(state.feedback.as_deref()) {
        Verdict::Improve if state.iteration < max_iterations => ROUTE_WRITER,
        _ => ROUTE_END,
    }
}
