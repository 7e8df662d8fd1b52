//! OpenAI configuration

use std::env;

use dochat_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the OpenAI client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub api_url: String,
    /// Outbound proxy for all provider calls, when set.
    pub proxy: Option<String>,
    pub model: String,
    pub embedding_model: String,
}

impl OpenAiConfig {
    pub const DEFAULT_MODEL: &'static str = "gpt-4.1-nano";
    pub const DEFAULT_EMBEDDING_MODEL: &'static str = "text-embedding-3-small";

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            Error::Configuration("OPENAI_API_KEY environment variable not found".to_string())
        })?;

        let api_url = env::var("OPENAI_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let proxy = env::var("PROXY").ok().filter(|p| !p.is_empty());

        let model = env::var("DOCHAT_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string());

        let embedding_model = env::var("DOCHAT_EMBEDDING_MODEL")
            .unwrap_or_else(|_| Self::DEFAULT_EMBEDDING_MODEL.to_string());

        Ok(Self {
            api_key,
            api_url,
            proxy,
            model,
            embedding_model,
        })
    }

    /// Create configuration with explicit values
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: "https://api.openai.com/v1".to_string(),
            proxy: None,
            model: Self::DEFAULT_MODEL.to_string(),
            embedding_model: Self::DEFAULT_EMBEDDING_MODEL.to_string(),
        }
    }
}
