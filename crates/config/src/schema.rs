//! Typed configuration tree, deserialized from `coastal.toml`.
//!
//! Every section is `#[serde(default)]`, so an empty file (or no file at all)
//! yields a working local setup: Ollama on `localhost:11434` serving
//! `llama3.1`, embeddings from `all-minilm`, vectors in `data/coastal.db`.

use std::{fmt, path::PathBuf};

use {secrecy::Secret, serde::Deserialize};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CoastalConfig {
    pub server: ServerConfig,
    pub ollama: OllamaConfig,
    pub embeddings: EmbeddingsConfig,
    pub store: StoreConfig,
    pub geocoding: GeocodingConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
        }
    }
}

/// The model-serving host used for generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Upper bound for a single generate call, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".into(),
            model: "llama3.1".into(),
            temperature: 0.0,
            request_timeout_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Ollama `/api/embed`.
    #[default]
    Ollama,
    /// Any OpenAI-compatible `/v1/embeddings` endpoint.
    #[serde(alias = "openai-compatible")]
    OpenAi,
}

impl EmbeddingBackend {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ollama" => Some(Self::Ollama),
            "openai" | "openai-compatible" => Some(Self::OpenAi),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct EmbeddingsConfig {
    pub provider: EmbeddingBackend,
    pub model: String,
    /// Defaults to `ollama.base_url` for the Ollama backend.
    pub base_url: Option<String>,
    pub api_key: Option<Secret<String>>,
    pub dimensions: usize,
}

impl Default for EmbeddingsConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingBackend::Ollama,
            model: "all-minilm".into(),
            base_url: None,
            api_key: None,
            dimensions: 384,
        }
    }
}

impl fmt::Debug for EmbeddingsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingsConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

/// Vector store location and retrieval knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    /// Fragment size in whitespace-separated words.
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    /// Number of fragments handed to the model as context.
    pub top_k: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("data/coastal.db"),
            chunk_size: 400,
            chunk_overlap: 80,
            top_k: 10,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    pub base_url: String,
    pub api_key: Option<Secret<String>>,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com".into(),
            api_key: None,
        }
    }
}

impl fmt::Debug for GeocodingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocodingConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl EmbeddingsConfig {
    /// Base URL the embedding backend should talk to.
    pub fn effective_base_url<'a>(&'a self, ollama: &'a OllamaConfig) -> &'a str {
        match (&self.base_url, self.provider) {
            (Some(url), _) => url,
            (None, EmbeddingBackend::Ollama) => &ollama.base_url,
            (None, EmbeddingBackend::OpenAi) => "https://api.openai.com",
        }
    }
}
