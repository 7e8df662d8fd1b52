//! Local hash-based embedding provider

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use dochat_core::{EmbeddingProvider, Result};

const DEFAULT_DIMENSION: usize = 384;

/// Deterministic bag-of-words embedder.
///
/// Hashes words and bigrams into a fixed-dimension vector and normalizes it,
/// so cosine similarity tracks lexical overlap. No network calls and no
/// model weights; used for offline indexing and as the test embedder.
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
        }
    }

    fn hash_of(token: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        hasher.finish()
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let normalized: String = text
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect();
        let words: Vec<&str> = normalized.split_whitespace().collect();

        let mut embedding = vec![0.0f32; self.dimension];

        // Spread each word over three feature indices for better coverage
        // of the vector space.
        for word in &words {
            let hash = Self::hash_of(word);
            let idx1 = (hash % self.dimension as u64) as usize;
            let idx2 = ((hash >> 16) % self.dimension as u64) as usize;
            let idx3 = ((hash >> 32) % self.dimension as u64) as usize;

            embedding[idx1] += 1.0;
            embedding[idx2] += 0.7;
            embedding[idx3] += 0.5;
        }

        // Bigram features keep some word-order signal.
        for window in words.windows(2) {
            let bigram = format!("{} {}", window[0], window[1]);
            let idx = (Self::hash_of(&bigram) % self.dimension as u64) as usize;
            embedding[idx] += 0.8;
        }

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for val in embedding.iter_mut() {
                *val /= magnitude;
            }
        }

        embedding
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
