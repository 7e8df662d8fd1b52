//! Answer engine

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use dochat_core::{
    DEFAULT_TOP_K, Error, GenerationConfig, Interaction, LlmProvider, Result, Retriever,
    ScoredChunk,
};

use crate::MemoryBuffer;

/// Result of one answered question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
    /// Retrieved chunks the answer was grounded in, for citation.
    pub sources: Vec<ScoredChunk>,
    /// History snapshot after recording this interaction, oldest first.
    pub history: Vec<Interaction>,
}

/// Orchestrates retrieval, generation, and conversation memory per request.
///
/// Conversational continuity comes from replaying the prior Q/A pairs
/// verbatim into each prompt; nothing is summarized or fine-tuned.
pub struct AnswerEngine {
    retriever: Arc<dyn Retriever>,
    llm: Arc<dyn LlmProvider>,
    memory: Arc<MemoryBuffer>,
    config: GenerationConfig,
    top_k: usize,
}

impl AnswerEngine {
    pub fn new(
        retriever: Arc<dyn Retriever>,
        llm: Arc<dyn LlmProvider>,
        memory: Arc<MemoryBuffer>,
    ) -> Self {
        let config = GenerationConfig {
            model_id: llm.model_id().to_string(),
            ..Default::default()
        };

        Self {
            retriever,
            llm,
            memory,
            config,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Answer a question using retrieved context and the rolling history.
    ///
    /// The original question is what gets recorded in memory, not the
    /// history-augmented prompt, so history does not inflate recursively.
    /// Retrieval and generation failures are surfaced as `AnswerGeneration`
    /// and leave the memory buffer untouched.
    pub async fn answer(&self, question: &str) -> Result<Answer> {
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::EmptyQuestion);
        }

        let prompt = self.compose_prompt(question);
        debug!(prompt_chars = prompt.len(), "composed prompt");

        let sources = self
            .retriever
            .retrieve(&prompt, self.top_k)
            .await
            .map_err(|e| {
                error!(error = %e, "retrieval failed");
                Error::AnswerGeneration(e.to_string())
            })?;

        let context: Vec<String> = sources.iter().map(|s| s.content.clone()).collect();
        let generated = self
            .llm
            .complete(&prompt, &context, &self.config)
            .await
            .map_err(|e| {
                error!(error = %e, "generation failed");
                Error::AnswerGeneration(e.to_string())
            })?;

        self.memory.add_interaction(question, &generated.text);

        Ok(Answer {
            answer: generated.text,
            sources,
            history: self.memory.history(),
        })
    }

    /// Concatenate the question with a verbatim rendering of the history.
    fn compose_prompt(&self, question: &str) -> String {
        let history = self.memory.history();
        if history.is_empty() {
            return question.to_string();
        }

        let mut prompt = format!("{}\n\nPrevious conversation:\n", question);
        for interaction in &history {
            prompt.push_str(&format!(
                "User: {}\nAssistant: {}\n",
                interaction.question, interaction.answer
            ));
        }
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Chunker, FsIngestor, HashEmbedder, IndexPipeline};
    use async_trait::async_trait;
    use dochat_core::GenerationResult;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns nothing and counts how often it was asked.
    struct EmptyRetriever {
        calls: AtomicUsize,
    }

    impl EmptyRetriever {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Retriever for EmptyRetriever {
        async fn retrieve(&self, _query: &str, _k: usize) -> Result<Vec<ScoredChunk>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    struct FailingRetriever;

    #[async_trait]
    impl Retriever for FailingRetriever {
        async fn retrieve(&self, _query: &str, _k: usize) -> Result<Vec<ScoredChunk>> {
            Err(Error::Network("index unreachable".to_string()))
        }
    }

    /// Echoes its prompt back and records every call.
    struct EchoLlm {
        calls: Mutex<Vec<String>>,
    }

    impl EchoLlm {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for EchoLlm {
        async fn complete(
            &self,
            prompt: &str,
            _context: &[String],
            config: &GenerationConfig,
        ) -> Result<GenerationResult> {
            self.calls.lock().unwrap().push(prompt.to_string());
            Ok(GenerationResult {
                text: format!("echo: {}", prompt.lines().next().unwrap_or("")),
                model_id: config.model_id.clone(),
                tokens_used: None,
            })
        }

        fn model_id(&self) -> &str {
            "echo"
        }
    }

    struct FailingLlm;

    #[async_trait]
    impl LlmProvider for FailingLlm {
        async fn complete(
            &self,
            _prompt: &str,
            _context: &[String],
            _config: &GenerationConfig,
        ) -> Result<GenerationResult> {
            Err(Error::LlmProvider("provider exploded".to_string()))
        }

        fn model_id(&self) -> &str {
            "failing"
        }
    }

    fn engine_with(retriever: Arc<dyn Retriever>, llm: Arc<dyn LlmProvider>) -> AnswerEngine {
        AnswerEngine::new(retriever, llm, Arc::new(MemoryBuffer::new()))
    }

    #[tokio::test]
    async fn empty_and_whitespace_questions_are_rejected_without_side_effects() {
        let retriever = Arc::new(EmptyRetriever::new());
        let llm = Arc::new(EchoLlm::new());
        let memory = Arc::new(MemoryBuffer::new());
        let engine = AnswerEngine::new(retriever.clone(), llm.clone(), memory.clone());

        for question in ["", "   ", "\n\t"] {
            match engine.answer(question).await {
                Err(Error::EmptyQuestion) => {}
                other => panic!("expected EmptyQuestion, got {:?}", other.map(|_| ())),
            }
        }

        assert!(memory.is_empty());
        assert_eq!(retriever.calls.load(Ordering::SeqCst), 0);
        assert!(llm.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn successful_answer_is_recorded_with_the_original_question() {
        let memory = Arc::new(MemoryBuffer::new());
        let engine = AnswerEngine::new(
            Arc::new(EmptyRetriever::new()),
            Arc::new(EchoLlm::new()),
            memory.clone(),
        );

        let answer = engine.answer("What color is the sky?").await.unwrap();

        assert!(!answer.answer.is_empty());
        assert_eq!(answer.history.len(), 1);
        assert_eq!(answer.history[0].question, "What color is the sky?");
        assert_eq!(answer.history[0].answer, answer.answer);
    }

    #[tokio::test]
    async fn generation_failure_leaves_the_memory_untouched() {
        let memory = Arc::new(MemoryBuffer::new());
        memory.add_interaction("earlier", "answer");
        let engine = AnswerEngine::new(
            Arc::new(EmptyRetriever::new()),
            Arc::new(FailingLlm),
            memory.clone(),
        );

        match engine.answer("a question").await {
            Err(Error::AnswerGeneration(_)) => {}
            other => panic!("expected AnswerGeneration, got {:?}", other.map(|_| ())),
        }
        assert_eq!(memory.len(), 1);
    }

    #[tokio::test]
    async fn retrieval_failure_is_surfaced_as_answer_generation() {
        let memory = Arc::new(MemoryBuffer::new());
        let engine = AnswerEngine::new(
            Arc::new(FailingRetriever),
            Arc::new(EchoLlm::new()),
            memory.clone(),
        );

        match engine.answer("a question").await {
            Err(Error::AnswerGeneration(_)) => {}
            other => panic!("expected AnswerGeneration, got {:?}", other.map(|_| ())),
        }
        assert!(memory.is_empty());
    }

    #[tokio::test]
    async fn prior_interactions_are_replayed_into_the_prompt() {
        let llm = Arc::new(EchoLlm::new());
        let engine = engine_with(Arc::new(EmptyRetriever::new()), llm.clone());

        engine.answer("first question").await.unwrap();
        engine.answer("second question").await.unwrap();

        let calls = llm.calls.lock().unwrap();
        assert!(!calls[0].contains("Previous conversation"));
        assert!(calls[1].contains("Previous conversation"));
        assert!(calls[1].contains("User: first question"));
        assert!(calls[1].starts_with("second question"));
    }

    #[tokio::test]
    async fn answers_are_grounded_in_the_indexed_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sky.txt"), "The sky is blue.").unwrap();
        std::fs::write(dir.path().join("grass.txt"), "Grass is green.").unwrap();

        let pipeline = IndexPipeline::new(
            Arc::new(FsIngestor::all_files(dir.path())),
            Chunker::default(),
            Arc::new(HashEmbedder::new()),
        );
        let retriever = pipeline.build().await.unwrap();

        let engine = engine_with(Arc::new(retriever), Arc::new(EchoLlm::new()));
        let answer = engine.answer("What color is the sky?").await.unwrap();

        assert!(!answer.answer.is_empty());
        assert_eq!(answer.sources[0].content, "The sky is blue.");
        assert_eq!(answer.history.len(), 1);
        assert_eq!(answer.history[0].question, "What color is the sky?");
    }
}
