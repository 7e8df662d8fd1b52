//! Error types shared across the dochat crates

use thiserror::Error;

/// Result alias used throughout dochat.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the dochat pipeline and its providers.
///
/// Ingestion errors are recovered locally (skip-and-log); configuration and
/// index-build errors are fatal at startup; per-request failures are caught
/// at the answer engine and surfaced as `AnswerGeneration`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to ingest document: {0}")]
    Ingestion(String),

    #[error("failed to build index: {0}")]
    IndexBuild(String),

    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("failed to generate an answer: {0}")]
    AnswerGeneration(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("authentication error: {0}")]
    Authentication(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("LLM provider error: {0}")]
    LlmProvider(String),

    #[error("embedding provider error: {0}")]
    EmbeddingProvider(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
