//! Language-model access: the provider seam, the Ollama backend, and prompt templates.

pub mod model;
pub mod ollama;
pub mod prompts;

pub use {model::LlmProvider, ollama::OllamaProvider};
