//! Stage prompts: templates for planner, analyst, writer and critic.
//!
//! Default text lives in `docintel/prompts/stages.yaml` and is embedded at compile time.
//! [`load`] reads an override file from a directory (`PROMPTS_DIR` by default); keys it
//! leaves out keep the embedded defaults.

mod load;

pub use load::{default_from_embedded, load, load_or_default, PromptsLoadError};

use serde::Deserialize;

/// Resolved prompt templates, one per stage plus the writer's feedback sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePrompts {
    pub planner: String,
    pub analyst: String,
    pub writer: String,
    pub writer_revise: String,
    pub writer_improve: String,
    pub writer_footer: String,
    pub critic: String,
}

impl Default for StagePrompts {
    fn default() -> Self {
        default_from_embedded()
    }
}

/// On-disk shape of `stages.yaml`; every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct StagePromptsFile {
    pub planner: Option<String>,
    pub analyst: Option<String>,
    pub writer: Option<String>,
    pub writer_revise: Option<String>,
    pub writer_improve: Option<String>,
    pub writer_footer: Option<String>,
    pub critic: Option<String>,
}

impl StagePrompts {
    /// Replaces the templates that `file` sets.
    pub(crate) fn merge(mut self, file: StagePromptsFile) -> Self {
        let slots = [
            (&mut self.planner, file.planner),
            (&mut self.analyst, file.analyst),
            (&mut self.writer, file.writer),
            (&mut self.writer_revise, file.writer_revise),
            (&mut self.writer_improve, file.writer_improve),
            (&mut self.writer_footer, file.writer_footer),
            (&mut self.critic, file.critic),
        ];
        for (slot, value) in slots {
            if let Some(v) = value {
                *slot = v;
            }
        }
        self
    }
}

/// Substitutes `{name}` placeholders in one pass.
///
/// Substituted values are not scanned again, so document text containing `{plan}` stays
/// literal. Unknown placeholders are left as they are.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| (*v, close))
        });
        match value {
            Some((v, close)) => {
                out.push_str(v);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
