//! Retrieval-augmented answer pipeline for dochat
//!
//! This crate provides the indexing pipeline (ingest, chunk, embed, store),
//! the retriever, the bounded conversation memory, and the answer engine.

mod chunker;
mod embedder;
mod engine;
mod ingest;
mod memory;
mod pipeline;
mod retriever;
mod store;

pub use chunker::Chunker;
pub use embedder::HashEmbedder;
pub use engine::{Answer, AnswerEngine};
pub use ingest::FsIngestor;
pub use memory::{MEMORY_CAPACITY, MemoryBuffer};
pub use pipeline::IndexPipeline;
pub use retriever::EmbeddedRetriever;
pub use store::MemoryVectorStore;

// Re-export core types for convenience
pub use dochat_core::{
    Chunk, DEFAULT_TOP_K, Document, EmbeddingProvider, Error, GenerationConfig, Ingestor,
    Interaction, LlmProvider, Result, Retriever, ScoredChunk, VectorRecord, VectorStore,
};
