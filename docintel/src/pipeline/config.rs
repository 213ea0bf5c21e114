//! Pipeline configuration read from the environment.

use std::str::FromStr;
use std::time::Duration;

use crate::agents::MAX_ITERATIONS;
use crate::retrieval::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_RETRIEVAL_K};

/// Default chat model for every stage.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
/// Default per-call generation timeout.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Settings for building the pipeline. Every field has a default; see [`PipelineConfig::from_env`].
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Chat model for all stages.
    pub model: String,
    /// Embedding model for the document index.
    pub embedding_model: String,
    /// Bound on writer+critic passes.
    pub max_iterations: u32,
    /// Passages retrieved per question.
    pub retrieval_k: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    /// Timeout of one generation call.
    pub llm_timeout: Duration,
    /// OpenAI API key. When None, `OPENAI_API_KEY` is read by the client itself.
    pub openai_api_key: Option<String>,
    /// OpenAI API base URL. When None, the default API base is used.
    pub openai_base_url: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            max_iterations: MAX_ITERATIONS,
            retrieval_k: DEFAULT_RETRIEVAL_K,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            llm_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            openai_api_key: None,
            openai_base_url: None,
        }
    }
}

impl PipelineConfig {
    /// Builds config from environment variables. No variable is required; unset or unparsable
    /// values keep the defaults. Call after `config::load_and_apply` so `.env` and XDG
    /// config are visible.
    ///
    /// Reads: `DOCINTEL_MODEL`, `DOCINTEL_EMBEDDING_MODEL`, `DOCINTEL_MAX_ITERATIONS`,
    /// `DOCINTEL_RETRIEVAL_K`, `DOCINTEL_CHUNK_SIZE`, `DOCINTEL_CHUNK_OVERLAP`,
    /// `DOCINTEL_LLM_TIMEOUT_SECS`, `OPENAI_API_KEY`, `OPENAI_BASE_URL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            model: lookup("DOCINTEL_MODEL").unwrap_or(defaults.model),
            embedding_model: lookup("DOCINTEL_EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
            max_iterations: parse_var(&lookup, "DOCINTEL_MAX_ITERATIONS")
                .filter(|n: &u32| *n >= 1)
                .unwrap_or(defaults.max_iterations),
            retrieval_k: parse_var(&lookup, "DOCINTEL_RETRIEVAL_K")
                .filter(|k: &usize| *k >= 1)
                .unwrap_or(defaults.retrieval_k),
            chunk_size: parse_var(&lookup, "DOCINTEL_CHUNK_SIZE")
                .filter(|n: &usize| *n >= 1)
                .unwrap_or(defaults.chunk_size),
            chunk_overlap: parse_var(&lookup, "DOCINTEL_CHUNK_OVERLAP")
                .unwrap_or(defaults.chunk_overlap),
            llm_timeout: parse_var(&lookup, "DOCINTEL_LLM_TIMEOUT_SECS")
                .filter(|s: &u64| *s >= 1)
                .map(Duration::from_secs)
                .unwrap_or(defaults.llm_timeout),
            openai_api_key: lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()),
            openai_base_url: lookup("OPENAI_BASE_URL"),
        }
    }
}

/// Parses one variable; an unparsable value is logged and treated as unset.
fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring invalid value");
            None
        }
    }
}
