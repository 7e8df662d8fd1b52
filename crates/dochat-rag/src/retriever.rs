//! Embedding-backed retriever

use std::sync::Arc;

use async_trait::async_trait;

use dochat_core::{EmbeddingProvider, Result, Retriever, ScoredChunk, VectorStore};

/// Retriever that embeds the query and searches the vector store.
pub struct EmbeddedRetriever {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl EmbeddedRetriever {
    pub fn new(store: Arc<dyn VectorStore>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { store, embedder }
    }
}

#[async_trait]
impl Retriever for EmbeddedRetriever {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let vector = self.embedder.embed_one(query).await?;
        self.store.search_by_vector(&vector, k).await
    }
}
