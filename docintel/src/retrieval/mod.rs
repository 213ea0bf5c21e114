//! Document ingestion and similarity search.
//!
//! Upload path: [`load_document`] extracts text from the uploaded bytes, [`RecursiveSplitter`]
//! cuts it into overlapping chunks, an [`Embedder`] turns chunks into vectors and a
//! [`VectorIndex`] is built from them. [`DocumentIndex`] owns the current index and swaps it
//! atomically on every upload.
//!
//! Query path: the retriever stage calls [`Retriever::search`], which embeds the query and
//! returns the top-k passages by cosine similarity.

mod document_index;
mod embedder;
mod loader;
mod openai_embedder;
mod splitter;
mod vector_index;

pub use document_index::DocumentIndex;
pub use embedder::{Embedder, HashEmbedder};
pub use loader::{load_document, DocumentKind};
pub use openai_embedder::OpenAIEmbedder;
pub use splitter::{RecursiveSplitter, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
pub use vector_index::VectorIndex;

use async_trait::async_trait;
use thiserror::Error;

/// Number of passages returned per query unless configured otherwise.
pub const DEFAULT_RETRIEVAL_K: usize = 4;

/// Ingestion or search failure.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The uploaded payload, or the text extracted from it, is empty.
    #[error("document is empty")]
    EmptyDocument,

    /// The file type is not one of pdf, txt or md.
    #[error("unsupported document type: {0}")]
    UnsupportedDocument(String),

    /// Text could not be extracted from the payload.
    #[error("text extraction failed: {0}")]
    Extraction(String),

    /// The embedding backend failed.
    #[error("embedding failed: {0}")]
    Embedding(String),
}

/// Similarity index handle used by the retriever stage and the upload path.
///
/// **Interaction**: `DocumentIndex` is the default implementation; the pipeline holds it as
/// `Arc<dyn Retriever>` so tests can substitute a stub.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Up to `k` passages most similar to `query`, best first. Empty when nothing is indexed.
    async fn search(&self, query: &str, k: usize) -> Result<Vec<String>, RetrievalError>;

    /// Replaces the index with the chunks of one document; returns the number of chunks.
    async fn index(&self, bytes: Vec<u8>, filename: &str) -> Result<usize, RetrievalError>;

    /// Whether a document has been indexed.
    fn has_index(&self) -> bool;
}
