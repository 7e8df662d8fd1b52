//! OpenAI integration for dochat
//!
//! This crate provides the OpenAI implementations of the `LlmProvider` and
//! `EmbeddingProvider` traits.

mod client;
mod config;


pub use client::OpenAiClient;
pub use config::OpenAiConfig;

// Re-export core types for convenience
pub use dochat_core::{
    EmbeddingProvider, Error, GenerationConfig, GenerationResult, LlmProvider, Result,
};
