//! Vector store trait

use async_trait::async_trait;

use crate::{Result, ScoredChunk, VectorRecord};

/// Trait for vector indexes.
///
/// The index maps embeddings to their originating chunk text and source
/// metadata, and supports similarity search. dochat builds its index once at
/// startup and treats it as read-only afterwards.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert a single record.
    async fn insert(&self, record: VectorRecord) -> Result<()>;

    /// Insert multiple records in one call.
    async fn insert_batch(&self, records: Vec<VectorRecord>) -> Result<()>;

    /// Return up to `k` records ranked by descending similarity to `vector`.
    async fn search_by_vector(&self, vector: &[f32], k: usize) -> Result<Vec<ScoredChunk>>;

    /// Total number of stored records.
    async fn count(&self) -> Result<usize>;
}
