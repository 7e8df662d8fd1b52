//! In-memory vector store

use async_trait::async_trait;
use tokio::sync::RwLock;

use dochat_core::{Result, ScoredChunk, VectorRecord, VectorStore};

/// In-memory vector index with cosine-similarity search.
///
/// Built once at startup and rebuilt from scratch every process start;
/// nothing is persisted.
pub struct MemoryVectorStore {
    records: RwLock<Vec<VectorRecord>>,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        0.0
    } else {
        dot / (mag_a * mag_b)
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn insert(&self, record: VectorRecord) -> Result<()> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn insert_batch(&self, records: Vec<VectorRecord>) -> Result<()> {
        self.records.write().await.extend(records);
        Ok(())
    }

    async fn search_by_vector(&self, vector: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        let records = self.records.read().await;

        let mut scored: Vec<ScoredChunk> = records
            .iter()
            .map(|record| ScoredChunk {
                content: record.content.clone(),
                source: record.source.clone(),
                score: cosine_similarity(vector, &record.embedding),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);

        Ok(scored)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }
}
