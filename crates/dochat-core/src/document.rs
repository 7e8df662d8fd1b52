//! Document, chunk, and interaction types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A raw text document loaded from the filesystem.
///
/// Documents are immutable once loaded and discarded after chunking.
#[derive(Debug, Clone)]
pub struct Document {
    pub content: String,
    pub source: PathBuf,
}

impl Document {
    pub fn new(content: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
        }
    }
}

/// A bounded-length piece of a document, ready for embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub content: String,
    pub source: String,
    /// Position of this chunk within its source document.
    pub index: usize,
}

impl Chunk {
    pub fn new(content: impl Into<String>, source: impl Into<String>, index: usize) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            source: source.into(),
            index,
        }
    }
}

/// A chunk plus its embedding, as stored in the vector index.
///
/// Owned by the store; never mutated after insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub content: String,
    pub source: String,
    pub embedding: Vec<f32>,
}

impl VectorRecord {
    pub fn from_chunk(chunk: Chunk, embedding: Vec<f32>) -> Self {
        Self {
            id: chunk.id,
            content: chunk.content,
            source: chunk.source,
            embedding,
        }
    }
}

/// A retrieval result: chunk text, source path, and similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub content: String,
    pub source: String,
    pub score: f32,
}

/// One recorded question/answer exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub question: String,
    pub answer: String,
}

impl Interaction {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}
