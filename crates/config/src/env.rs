//! Environment-variable overrides applied on top of the file config.

use secrecy::Secret;

use crate::{
    ConfigError,
    schema::{CoastalConfig, EmbeddingBackend},
};

/// Apply overrides, reading variables through `lookup`.
pub fn apply_env_overrides<F>(config: &mut CoastalConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(host) = get("OLLAMA_HOST") {
        config.ollama.base_url = normalize_ollama_host(&host);
    }
    if let Some(model) = get("COASTAL_LLM_MODEL") {
        config.ollama.model = model;
    }
    if let Some(raw) = get("COASTAL_EMBEDDING_PROVIDER") {
        config.embeddings.provider =
            EmbeddingBackend::parse(&raw).ok_or(ConfigError::InvalidEnv {
                var: "COASTAL_EMBEDDING_PROVIDER",
                value: raw,
            })?;
    }
    if let Some(model) = get("COASTAL_EMBEDDING_MODEL") {
        config.embeddings.model = model;
    }
    if let Some(key) = get("COASTAL_EMBEDDING_API_KEY") {
        config.embeddings.api_key = Some(Secret::new(key));
    }
    if let Some(path) = get("COASTAL_DB_PATH") {
        config.store.db_path = path.into();
    }
    if let Some(host) = get("COASTAL_HOST") {
        config.server.host = host;
    }
    if let Some(raw) = get("COASTAL_PORT") {
        config.server.port = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            var: "COASTAL_PORT",
            value: raw.clone(),
        })?;
    }
    if let Some(key) = get("GOOGLE_MAPS_API_KEY") {
        config.geocoding.api_key = Some(Secret::new(key));
    }
    Ok(())
}

/// `OLLAMA_HOST` is commonly given as `host:port` without a scheme.
fn normalize_ollama_host(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
