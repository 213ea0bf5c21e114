//! Load stage prompts from a directory of YAML files.
//!
//! **Canonical source**: default prompt text lives in `docintel/prompts/stages.yaml`; it is
//! embedded at compile time and used when no `PROMPTS_DIR` or directory is present.

use std::path::{Path, PathBuf};

use super::{StagePrompts, StagePromptsFile};

/// Embedded default YAML (canonical source: `docintel/prompts/stages.yaml`).
const EMBED_STAGES: &str = include_str!("../../prompts/stages.yaml");

/// Name of the YAML file under the prompts directory.
const STAGES_FILE: &str = "stages.yaml";

/// Default directory name when `PROMPTS_DIR` is not set.
const DEFAULT_PROMPTS_DIR: &str = "prompts";

/// Error when loading prompts from a directory (missing dir, unreadable file, invalid YAML).
#[derive(Debug, thiserror::Error)]
pub enum PromptsLoadError {
    #[error("prompts directory not found or not readable: {0}")]
    DirNotFound(String),
    #[error("failed to read prompts file {path}: {message}")]
    ReadFile { path: String, message: String },
    #[error("failed to parse YAML in {path}: {message}")]
    ParseYaml { path: String, message: String },
}

/// Returns the directory to load prompts from: `dir` if `Some`, else `PROMPTS_DIR` env, else `./prompts`.
fn prompts_dir(dir: Option<&Path>) -> PathBuf {
    dir.map(PathBuf::from).unwrap_or_else(|| {
        std::env::var("PROMPTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_PROMPTS_DIR))
    })
}

/// Loads prompts from a directory: embedded defaults overlaid with `stages.yaml` when present.
///
/// Fails when the directory is missing or when the file exists but cannot be read or parsed.
pub fn load(dir: Option<&Path>) -> Result<StagePrompts, PromptsLoadError> {
    let base = prompts_dir(dir);
    if !base.is_dir() {
        return Err(PromptsLoadError::DirNotFound(base.display().to_string()));
    }
    let path = base.join(STAGES_FILE);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(default_from_embedded()),
        Err(e) => {
            return Err(PromptsLoadError::ReadFile {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        }
    };
    let file: StagePromptsFile =
        serde_yaml::from_str(&content).map_err(|e| PromptsLoadError::ParseYaml {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    Ok(default_from_embedded().merge(file))
}

/// Returns default prompts by parsing the embedded YAML.
///
/// This is the single source of truth for default prompt text; no duplicate strings in Rust.
pub fn default_from_embedded() -> StagePrompts {
    let file: StagePromptsFile = serde_yaml::from_str(EMBED_STAGES).unwrap_or_default();
    StagePrompts {
        planner: file.planner.unwrap_or_default(),
        analyst: file.analyst.unwrap_or_default(),
        writer: file.writer.unwrap_or_default(),
        writer_revise: file.writer_revise.unwrap_or_default(),
        writer_improve: file.writer_improve.unwrap_or_default(),
        writer_footer: file.writer_footer.unwrap_or_default(),
        critic: file.critic.unwrap_or_default(),
    }
}

/// Loads prompts from `dir` if it exists and parses; otherwise logs and returns the defaults.
pub fn load_or_default(dir: Option<&Path>) -> StagePrompts {
    match load(dir) {
        Ok(p) => p,
        Err(PromptsLoadError::DirNotFound(_)) => default_from_embedded(),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring prompt overrides");
            default_from_embedded()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_yaml_defines_every_prompt() {
        let p = default_from_embedded();
        assert!(p.planner.contains("{question}") && p.planner.ends_with("Plan:"));
        assert!(p.analyst.contains("{plan}") && p.analyst.contains("{context}"));
        assert!(p.writer.contains("{analysis}"));
        assert!(p.writer_revise.contains("{feedback}"));
        assert!(p.writer_improve.contains("you must improve"));
        assert!(p.writer_footer.contains("professional format"));
        assert!(p.critic.contains("{draft}") && p.critic.contains("IMPROVE"));
    }

    /// Load with a non-existent directory returns DirNotFound (when dir is explicitly given).
    #[test]
    fn load_nonexistent_dir_returns_error() {
        let result = load(Some(Path::new("/nonexistent_prompts_dir_12345")));
        assert!(matches!(result, Err(PromptsLoadError::DirNotFound(_))));
        let fallback = load_or_default(Some(Path::new("/nonexistent_prompts_dir_12345")));
        assert_eq!(fallback, default_from_embedded());
    }

    #[test]
    fn load_from_dir_overrides_present_keys() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("stages.yaml"),
            "planner: \"Plan for {question}\"\n",
        )
        .unwrap();
        let p = load(Some(temp.path())).unwrap();
        assert_eq!(p.planner, "Plan for {question}");
        assert_eq!(p.critic, default_from_embedded().critic);
    }

    #[test]
    fn load_empty_dir_returns_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        assert_eq!(load(Some(temp.path())).unwrap(), default_from_embedded());
    }

    #[test]
    fn load_invalid_yaml_returns_parse_error() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("stages.yaml"), "planner: [not closed").unwrap();
        let err = load(Some(temp.path())).unwrap_err();
        assert!(matches!(err, PromptsLoadError::ParseYaml { .. }));
    }

    #[test]
    fn unknown_key_is_a_parse_error() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("stages.yaml"), "planer: typo\n").unwrap();
        assert!(matches!(
            load(Some(temp.path())),
            Err(PromptsLoadError::ParseYaml { .. })
        ));
    }
}
