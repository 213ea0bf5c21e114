//! DocumentIndex: the process-wide similarity index, replaced on every upload.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{load_document, Embedder, RecursiveSplitter, RetrievalError, Retriever, VectorIndex};

/// Chunks embedded per backend call while indexing.
const EMBED_BATCH: usize = 64;

/// Shared document index.
///
/// A rebuild extracts, splits and embeds outside the lock, then swaps the `Arc` under a
/// short write lock. Searches clone the current `Arc` under a read lock and never block a
/// rebuild; a search that started before a swap finishes against the old index.
pub struct DocumentIndex {
    embedder: Arc<dyn Embedder>,
    splitter: RecursiveSplitter,
    current: RwLock<Option<Arc<VectorIndex>>>,
}

impl DocumentIndex {
    pub fn new(embedder: Arc<dyn Embedder>, splitter: RecursiveSplitter) -> Self {
        Self {
            embedder,
            splitter,
            current: RwLock::new(None),
        }
    }

    /// Current index snapshot, if any.
    pub fn snapshot(&self) -> Option<Arc<VectorIndex>> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn swap(&self, index: Arc<VectorIndex>) {
        match self.current.write() {
            Ok(mut guard) => *guard = Some(index),
            Err(poisoned) => *poisoned.into_inner() = Some(index),
        }
    }

    /// Embeds `chunks` and builds a new index from them without touching the current one.
    pub async fn build(&self, chunks: Vec<String>) -> Result<VectorIndex, RetrievalError> {
        let mut entries = Vec::with_capacity(chunks.len());
        for batch in chunks.chunks(EMBED_BATCH) {
            let texts: Vec<&str> = batch.iter().map(String::as_str).collect();
            let vectors = self.embedder.embed(&texts).await?;
            if vectors.len() != batch.len() {
                return Err(RetrievalError::Embedding(format!(
                    "expected {} vectors, got {}",
                    batch.len(),
                    vectors.len()
                )));
            }
            entries.extend(batch.iter().cloned().zip(vectors));
        }
        Ok(VectorIndex::new(entries))
    }
}

#[async_trait]
impl Retriever for DocumentIndex {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<String>, RetrievalError> {
        let Some(index) = self.snapshot() else {
            return Ok(Vec::new());
        };
        let query_vector = self
            .embedder
            .embed(&[query])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RetrievalError::Embedding("no vector returned for query".into()))?;
        Ok(index
            .top_k(&query_vector, k)
            .into_iter()
            .map(|(chunk, _)| chunk.to_string())
            .collect())
    }

    async fn index(&self, bytes: Vec<u8>, filename: &str) -> Result<usize, RetrievalError> {
        let name = filename.to_string();
        let text = tokio::task::spawn_blocking(move || load_document(&bytes, &name))
            .await
            .map_err(|e| RetrievalError::Extraction(e.to_string()))??;
        let chunks = self.splitter.split_text(&text);
        if chunks.is_empty() {
            return Err(RetrievalError::EmptyDocument);
        }
        let index = self.build(chunks).await?;
        let count = index.len();
        self.swap(Arc::new(index));
        tracing::info!(filename, chunks = count, "document indexed");
        Ok(count)
    }

    fn has_index(&self) -> bool {
        self.snapshot().is_some()
    }
}
