//! OpenAI client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use dochat_core::{
    EmbeddingProvider, Error, GenerationConfig, GenerationResult, LlmProvider, Result,
};

use crate::config::OpenAiConfig;

/// Dimension of `text-embedding-3-small` vectors.
const EMBEDDING_DIMENSION: usize = 1536;

/// OpenAI client implementing both the LLM and embedding provider traits.
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: Client,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Serialize)]
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

impl OpenAiClient {
    /// Create a new OpenAI client from configuration
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let mut builder = Client::builder().timeout(Duration::from_secs(60));

        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| Error::Configuration(format!("invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new OpenAI client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = OpenAiConfig::from_env()?;
        Self::new(config)
    }

    /// Fold retrieved chunks into the system message grounding the answer.
    fn build_system_message(context: &[String]) -> String {
        if context.is_empty() {
            return "You are a helpful assistant. Answer the user's question concisely."
                .to_string();
        }

        let mut message = String::from(
            "You are a helpful assistant. Use the following pieces of context \
             to answer the user's question. If the answer is not in the \
             context, say that you don't know.\n\n",
        );
        for (i, chunk) in context.iter().enumerate() {
            message.push_str(&format!("{}. {}\n\n", i + 1, chunk));
        }
        message
    }

    /// Perform the actual completion request
    async fn perform_completion(
        &self,
        prompt: &str,
        context: &[String],
        config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        let request_body = ChatRequest {
            model: config.model_id.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Self::build_system_message(context),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        };

        let url = format!("{}/chat/completions", self.config.api_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication(
                "OpenAI rejected the API key".to_string(),
            ));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::LlmProvider(format!(
                "OpenAI API request failed with status {}: {}",
                status, error_text
            )));
        }

        let data: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let text = data
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| Error::LlmProvider("empty response from OpenAI API".to_string()))?;

        Ok(GenerationResult {
            text,
            model_id: config.model_id.clone(),
            tokens_used: data.usage.map(|u| u.total_tokens),
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiClient {
    async fn complete(
        &self,
        prompt: &str,
        context: &[String],
        config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        let completion = self.perform_completion(prompt, context, config);

        match timeout(config.timeout, completion).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(format!(
                "completion did not finish within {:?}",
                config.timeout
            ))),
        }
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request_body = EmbeddingRequest {
            model: self.config.embedding_model.clone(),
            input: texts.to_vec(),
        };

        let url = format!("{}/embeddings", self.config.api_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::EmbeddingProvider(format!(
                "OpenAI embeddings request failed with status {}: {}",
                status, error_text
            )));
        }

        let data: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        if data.data.len() != texts.len() {
            return Err(Error::EmbeddingProvider(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                data.data.len()
            )));
        }

        // The API may return entries out of order; restore input order.
        let mut ordered = data.data;
        ordered.sort_by_key(|d| d.index);

        Ok(ordered.into_iter().map(|d| d.embedding).collect())
    }

    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_message_numbers_context_chunks() {
        let context = vec!["The sky is blue.".to_string(), "Grass is green.".to_string()];
        let message = OpenAiClient::build_system_message(&context);

        assert!(message.contains("1. The sky is blue."));
        assert!(message.contains("2. Grass is green."));
    }

    #[test]
    fn system_message_without_context_is_minimal() {
        let message = OpenAiClient::build_system_message(&[]);
        assert!(!message.contains("context to answer"));
    }

    #[test]
    fn invalid_proxy_is_a_configuration_error() {
        let mut config = OpenAiConfig::new("test_key".to_string());
        config.proxy = Some("not a url".to_string());

        match OpenAiClient::new(config) {
            Err(Error::Configuration(_)) => {}
            other => panic!("expected configuration error, got {:?}", other.map(|_| ())),
        }
    }
}
