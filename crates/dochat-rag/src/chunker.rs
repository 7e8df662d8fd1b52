//! Sliding-window text chunker

use dochat_core::{Chunk, Document, Error, Result};

/// Splits documents into overlapping fixed-size character windows.
///
/// The walk is greedy and deterministic: emit `chunk_size` characters,
/// advance the window start by `chunk_size - chunk_overlap`, and finish with
/// the shorter tail once less than a full window remains.
#[derive(Debug, Clone)]
pub struct Chunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Chunker {
    pub const DEFAULT_CHUNK_SIZE: usize = 500;
    pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

    /// Create a chunker, validating the window geometry.
    ///
    /// The overlap must be strictly smaller than the chunk size or the walk
    /// would never advance.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::Configuration(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        if chunk_overlap >= chunk_size {
            return Err(Error::Configuration(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                chunk_overlap, chunk_size
            )));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Split raw text into overlapping windows of characters.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let step = self.chunk_size - self.chunk_overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        while start + self.chunk_size < chars.len() {
            chunks.push(chars[start..start + self.chunk_size].iter().collect());
            start += step;
        }
        chunks.push(chars[start..].iter().collect());

        chunks
    }

    /// Split each document into chunks carrying their source path.
    pub fn split_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        documents
            .iter()
            .flat_map(|doc| {
                let source = doc.source.display().to_string();
                self.split_text(&doc.content)
                    .into_iter()
                    .enumerate()
                    .map(move |(index, content)| Chunk::new(content, source.clone(), index))
            })
            .collect()
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            chunk_overlap: Self::DEFAULT_CHUNK_OVERLAP,
        }
    }
}
