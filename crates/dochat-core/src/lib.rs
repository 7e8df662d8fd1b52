//! Core traits and types for dochat
//!
//! This crate defines the fundamental traits and types used across the dochat
//! system. It provides capability-facing interfaces for LLM providers,
//! embedding providers, vector stores, retrievers, and document ingestors,
//! making the system test-friendly and extensible.

pub mod document;
pub mod embedding;
pub mod error;
pub mod ingest;
pub mod llm;
pub mod retriever;
pub mod vector_store;

pub use document::{Chunk, Document, Interaction, ScoredChunk, VectorRecord};
pub use embedding::EmbeddingProvider;
pub use error::{Error, Result};
pub use ingest::Ingestor;
pub use llm::{GenerationConfig, GenerationResult, LlmProvider};
pub use retriever::{DEFAULT_TOP_K, Retriever};
pub use vector_store::VectorStore;
