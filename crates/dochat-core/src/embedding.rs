//! Embedding provider trait

use async_trait::async_trait;

use crate::Result;

/// Trait for embedding providers (e.g. OpenAI embeddings, local models).
///
/// Implementations turn text into fixed-dimension vectors whose cosine
/// similarity reflects semantic similarity. The batch call is the primary
/// interface; `embed_one` is a convenience for single queries.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts, one vector per input, in input order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text.
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed(&[text.to_string()]).await?;
        vectors.pop().ok_or_else(|| {
            crate::Error::EmbeddingProvider("provider returned no vectors".to_string())
        })
    }

    /// Dimension of the vectors this provider produces.
    fn dimension(&self) -> usize;
}
