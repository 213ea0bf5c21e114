//! Plain-text event formatter for file logs: each line carries the ids of the enclosing
//! spans so the lines of one pipeline run can be grouped.
//!
//! Used by `logging::init()` when `LOG_FILE` is set.

use std::fmt;

use tracing_core::Subscriber;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

/// Formats `TIMESTAMP trace_id=X span_id=Y span=NAME LEVEL target: fields`.
///
/// `trace_id` is the id of the outermost span (e.g. `graph_run`), `span_id` and `span` the
/// innermost. Events outside any span omit the three span fields.
pub struct TextWithSpanIds {
    timer: SystemTime,
    with_target: bool,
}

impl Default for TextWithSpanIds {
    fn default() -> Self {
        Self {
            timer: SystemTime,
            with_target: true,
        }
    }
}

impl TextWithSpanIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Omit the target (module path).
    #[allow(dead_code)]
    pub fn with_target(mut self, on: bool) -> Self {
        self.with_target = on;
        self
    }
}

impl<S, N> FormatEvent<S, N> for TextWithSpanIds
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing_core::Event<'_>,
    ) -> fmt::Result {
        self.timer.format_time(&mut writer)?;
        if let Some(scope) = ctx.event_scope() {
            let mut spans = scope.from_root();
            if let Some(root) = spans.next() {
                let leaf = spans.last();
                let (leaf_id, leaf_name) = match &leaf {
                    Some(span) => (span.id().into_u64(), span.name()),
                    None => (root.id().into_u64(), root.name()),
                };
                write!(
                    writer,
                    " trace_id={} span_id={} span={}",
                    root.id().into_u64(),
                    leaf_id,
                    leaf_name
                )?;
            }
        }
        write!(writer, " {}:", event.metadata().level())?;
        if self.with_target {
            write!(writer, " {}:", event.metadata().target())?;
        }
        write!(writer, " ")?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
