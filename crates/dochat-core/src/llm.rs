//! Language model provider trait and types

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Parameters for a single generation call.
///
/// Defaults follow the service's answer profile: deterministic sampling and a
/// short bounded completion to keep latency and cost predictable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model_id: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Upper bound on the whole provider round-trip.
    #[serde(skip)]
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model_id: String::new(),
            temperature: 0.0,
            max_tokens: 100,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Result of a generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub model_id: String,
    pub tokens_used: Option<u32>,
}

/// Trait for language model providers.
///
/// `context` carries the retrieved chunks used to ground the completion;
/// implementations decide how to fold them into the provider request.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for `prompt` grounded in `context`.
    async fn complete(
        &self,
        prompt: &str,
        context: &[String],
        config: &GenerationConfig,
    ) -> Result<GenerationResult>;

    /// Identifier of the model this provider targets.
    fn model_id(&self) -> &str;
}
