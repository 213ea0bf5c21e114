//! Library side of the `docintel` binary: service wiring shared by `serve`, `ask` and `graph`.
//!
//! **Public API**: [`ServiceOptions`], [`build_service`], [`index_documents`],
//! [`render_graph`], [`render_answer`], [`CliError`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use docintel::pipeline::openai_config;
use docintel::prompts::load_or_default;
use docintel::{
    generate_dot, generate_text, AskResponse, CompilationError, DocIntelligence,
    DocState, DocumentIndex, Embedder, HashEmbedder, LlmClient, LoggingNodeMiddleware, MockLlm,
    NodeMiddleware, OpenAIEmbedder, PipelineConfig, PipelineLlms, RecursiveSplitter, ServiceError,
};

/// Reply prefix of the offline echo model.
pub const OFFLINE_PREFIX: &str = "[offline] ";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("OPENAI_API_KEY is not set. Add it to .env (OPENAI_API_KEY=sk-...) or pass --offline")]
    MissingApiKey,

    #[error("workflow graph is invalid: {0}")]
    Compile(#[from] CompilationError),

    #[error("read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Upload {
        path: PathBuf,
        #[source]
        source: ServiceError,
    },

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// How to build the service.
#[derive(Debug, Clone, Default)]
pub struct ServiceOptions {
    /// Hash embedder and echo model instead of OpenAI; no network, no key needed.
    pub offline: bool,
    /// Print node enter/exit to stderr around every stage.
    pub verbose: bool,
    /// Prompt override directory; `PROMPTS_DIR` or `./prompts` when None.
    pub prompts_dir: Option<PathBuf>,
}

/// Builds the document service from `config`.
///
/// Online mode requires an API key; the check happens here so startup fails before any
/// request is served.
pub fn build_service(
    config: &PipelineConfig,
    options: &ServiceOptions,
) -> Result<DocIntelligence, CliError> {
    let (llms, embedder): (PipelineLlms, Arc<dyn Embedder>) = if options.offline {
        let echo: Arc<dyn LlmClient> = Arc::new(MockLlm::echo(OFFLINE_PREFIX));
        (PipelineLlms::uniform(echo), Arc::new(HashEmbedder::default()))
    } else {
        if config.openai_api_key.is_none() {
            return Err(CliError::MissingApiKey);
        }
        (
            PipelineLlms::openai(config),
            Arc::new(OpenAIEmbedder::with_config(
                openai_config(config),
                config.embedding_model.clone(),
            )),
        )
    };

    let index = Arc::new(DocumentIndex::new(
        embedder,
        RecursiveSplitter::new(config.chunk_size, config.chunk_overlap),
    ));
    let prompts = Arc::new(load_or_default(options.prompts_dir.as_deref()));
    let middleware = options.verbose.then(|| {
        Arc::new(LoggingNodeMiddleware::<DocState>::default()) as Arc<dyn NodeMiddleware<DocState>>
    });

    tracing::info!(
        offline = options.offline,
        model = %config.model,
        max_iterations = config.max_iterations,
        "building document service"
    );
    Ok(DocIntelligence::build(llms, prompts, index, config, middleware)?)
}

/// Uploads every file in order; each upload replaces the previous index, so the last file
/// is the one questions are answered from. Returns the chunk count of the last file.
pub async fn index_documents(
    service: &DocIntelligence,
    paths: &[PathBuf],
) -> Result<usize, CliError> {
    let mut chunks = 0;
    for path in paths {
        let bytes = tokio::fs::read(path).await.map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?;
        let filename = file_name(path);
        let result = service
            .upload(bytes, &filename)
            .await
            .map_err(|source| CliError::Upload {
                path: path.clone(),
                source,
            })?;
        tracing::info!(file = %path.display(), chunks = result.chunks_indexed, "indexed");
        chunks = result.chunks_indexed;
    }
    Ok(chunks)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Workflow structure as Graphviz DOT or as a plain edge listing.
pub fn render_graph(service: &DocIntelligence, dot: bool) -> String {
    if dot {
        generate_dot(service.graph())
    } else {
        generate_text(service.graph())
    }
}

/// Answer as pretty JSON, or as text with the plan and pass count.
pub fn render_answer(response: &AskResponse, json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(response).unwrap_or_else(|_| response.answer.clone());
    }
    let mut out = String::new();
    if let Some(plan) = &response.plan {
        out.push_str("Plan:\n");
        out.push_str(plan.trim_end());
        out.push_str("\n\n");
    }
    out.push_str(response.answer.trim_end());
    let plural = if response.iterations == 1 { "" } else { "es" };
    out.push_str(&format!("\n\n({} pass{})", response.iterations, plural));
    out
}
