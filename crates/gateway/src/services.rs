//! Retrieval-augmented answering on top of the memory manager and an LLM.

use std::sync::Arc;

use {
    coastal_memory::{EmbedOutcome, MemoryError, MemoryManager, SearchResult},
    coastal_providers::{LlmProvider, prompts},
    tracing::debug,
};

pub const NO_ANSWER: &str = "No answer available";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Memory(#[from] MemoryError),

    #[error("{0}")]
    Llm(anyhow::Error),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Memory(e) if e.is_not_found())
    }
}

/// An answer plus the fragments it was grounded on.
#[derive(Debug)]
pub struct RagAnswer {
    pub answer: String,
    pub sources: Vec<SearchResult>,
}

#[derive(Clone)]
pub struct RagService {
    memory: Arc<MemoryManager>,
    llm: Arc<dyn LlmProvider>,
}

impl RagService {
    pub fn new(memory: Arc<MemoryManager>, llm: Arc<dyn LlmProvider>) -> Self {
        Self { memory, llm }
    }

    pub fn memory(&self) -> &MemoryManager {
        &self.memory
    }

    pub async fn embed(&self, path: &str, force: bool) -> Result<EmbedOutcome, MemoryError> {
        self.memory.embed_file(path, force).await
    }

    /// Retrieve fragments for `query` (restricted to `source` when given),
    /// stuff them into the retrieval prompt, and ask the model.
    pub async fn ask(&self, query: &str, source: Option<&str>) -> Result<RagAnswer, ServiceError> {
        let sources = self.memory.retrieve(query, source).await?;
        let context = prompts::join_context(sources.iter().map(|s| s.text.as_str()));
        let prompt = prompts::retrieval_prompt(query, &context);
        debug!(
            model = %self.llm.id(),
            fragments = sources.len(),
            context_len = context.len(),
            "asking with retrieved context"
        );

        let answer = self.llm.complete(&prompt).await.map_err(ServiceError::Llm)?;
        let answer = if answer.trim().is_empty() {
            NO_ANSWER.to_string()
        } else {
            answer
        };
        Ok(RagAnswer { answer, sources })
    }

    /// Ask the model directly, without retrieval. Returns the raw completion,
    /// which may be empty.
    pub async fn ask_model(&self, query: &str) -> anyhow::Result<String> {
        self.llm.complete(&prompts::direct_prompt(query)).await
    }

    pub async fn generate_raw(&self, prompt: &str) -> anyhow::Result<String> {
        self.llm.generate_raw(prompt).await
    }
}
