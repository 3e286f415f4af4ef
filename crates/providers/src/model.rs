use async_trait::async_trait;

/// A text-completion backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Model identifier, e.g. `llama3.1`.
    fn id(&self) -> &str;

    /// Complete `prompt` and return the generated text.
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;

    /// Send `prompt` to the backend's native generate endpoint and return the
    /// response body untouched (a JSON document).
    async fn generate_raw(&self, prompt: &str) -> anyhow::Result<String>;
}
