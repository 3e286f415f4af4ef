//! Semantic checks that serde cannot express.

use std::fmt;

use crate::schema::{CoastalConfig, EmbeddingBackend};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Dotted config path, e.g. `store.top_k`.
    pub path: &'static str,
    pub message: String,
}

impl Diagnostic {
    fn error(path: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            path,
            message: message.into(),
        }
    }

    fn warning(path: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

pub fn validate(config: &CoastalConfig) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    if config.server.port == 0 {
        out.push(Diagnostic::error("server.port", "port must be non-zero"));
    }
    if config.ollama.base_url.trim().is_empty() {
        out.push(Diagnostic::error("ollama.base_url", "must not be empty"));
    }
    if config.ollama.model.trim().is_empty() {
        out.push(Diagnostic::error("ollama.model", "must not be empty"));
    }
    if config.embeddings.model.trim().is_empty() {
        out.push(Diagnostic::error("embeddings.model", "must not be empty"));
    }
    if config.embeddings.dimensions == 0 {
        out.push(Diagnostic::error(
            "embeddings.dimensions",
            "must be greater than zero",
        ));
    }
    if config.store.chunk_size == 0 {
        out.push(Diagnostic::error(
            "store.chunk_size",
            "must be greater than zero",
        ));
    } else if config.store.chunk_overlap >= config.store.chunk_size {
        out.push(Diagnostic::error(
            "store.chunk_overlap",
            format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                config.store.chunk_overlap, config.store.chunk_size
            ),
        ));
    }
    if config.store.top_k == 0 {
        out.push(Diagnostic::error("store.top_k", "must be greater than zero"));
    }

    if config.embeddings.provider == EmbeddingBackend::OpenAi
        && config.embeddings.base_url.is_none()
        && config.embeddings.api_key.is_none()
    {
        out.push(Diagnostic::warning(
            "embeddings.api_key",
            "OpenAI backend without base_url or api_key will be rejected by api.openai.com",
        ));
    }
    if config.geocoding.api_key.is_none() {
        out.push(Diagnostic::warning(
            "geocoding.api_key",
            "not set; `coastal enrich` needs GOOGLE_MAPS_API_KEY",
        ));
    }

    out
}
