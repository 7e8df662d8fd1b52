//! Indexing pipeline

use std::sync::Arc;

use tracing::{info, warn};

use dochat_core::{EmbeddingProvider, Error, Ingestor, Result, VectorRecord, VectorStore};

use crate::{Chunker, EmbeddedRetriever, MemoryVectorStore};

/// Composes ingestion, chunking, embedding, and indexing into one startup
/// procedure.
///
/// `build` runs exactly once before any request is served; a failure here is
/// fatal and the process must not start serving.
pub struct IndexPipeline {
    ingestor: Arc<dyn Ingestor>,
    chunker: Chunker,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl IndexPipeline {
    pub fn new(
        ingestor: Arc<dyn Ingestor>,
        chunker: Chunker,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            ingestor,
            chunker,
            embedder,
        }
    }

    /// Load, chunk, embed, and index all documents, returning the retriever
    /// handle over the populated store.
    pub async fn build(&self) -> Result<EmbeddedRetriever> {
        let documents = self
            .ingestor
            .load()
            .await
            .map_err(|e| Error::IndexBuild(format!("document load failed: {}", e)))?;

        if documents.is_empty() {
            warn!("no documents found; the index will be empty");
        }

        let chunks = self.chunker.split_documents(&documents);
        info!(
            documents = documents.len(),
            chunks = chunks.len(),
            "chunked document set"
        );

        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.content.clone()).collect();
        let vectors = self
            .embedder
            .embed(&texts)
            .await
            .map_err(|e| Error::IndexBuild(format!("embedding failed: {}", e)))?;

        if vectors.len() != chunks.len() {
            return Err(Error::IndexBuild(format!(
                "embedding count mismatch: {} chunks, {} vectors",
                chunks.len(),
                vectors.len()
            )));
        }

        let store = Arc::new(MemoryVectorStore::new());
        let records: Vec<VectorRecord> = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| VectorRecord::from_chunk(chunk, vector))
            .collect();
        store
            .insert_batch(records)
            .await
            .map_err(|e| Error::IndexBuild(format!("index insert failed: {}", e)))?;

        let indexed = store.count().await?;
        info!(indexed, "vector index built");

        Ok(EmbeddedRetriever::new(store, Arc::clone(&self.embedder)))
    }
}
