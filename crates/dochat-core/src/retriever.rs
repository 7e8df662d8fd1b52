//! Retriever trait

use async_trait::async_trait;

use crate::{Result, ScoredChunk};

/// Default number of chunks retrieved per query.
pub const DEFAULT_TOP_K: usize = 3;

/// Capability to find the stored chunks most similar to a query.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Return up to `k` chunks ranked by descending similarity to `query`.
    ///
    /// Fewer than `k` results are returned when the index holds fewer chunks.
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>>;
}
