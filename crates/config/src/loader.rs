//! Config file discovery and loading.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{
    ConfigError,
    env::apply_env_overrides,
    schema::CoastalConfig,
    validate::{Severity, validate},
};

pub const CONFIG_FILE_NAME: &str = "coastal.toml";

/// Parse a TOML document into a config. Missing sections take their defaults.
pub fn parse_str(raw: &str) -> Result<CoastalConfig, toml::de::Error> {
    toml::from_str(raw)
}

pub fn load_from_path(path: &Path) -> Result<CoastalConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Platform config directory, e.g. `~/.config/coastal` on Linux.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "coastal", "coastal")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Find the config file to load: the working directory first, then the
/// platform config directory.
pub fn discover() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|p| p.is_file())
}

/// Load config from `explicit` (which must exist) or the discovered file,
/// then apply environment overrides and validate.
pub fn discover_and_load(explicit: Option<&Path>) -> Result<CoastalConfig, ConfigError> {
    let config = load_layered(explicit)?;
    check(&config)?;
    Ok(config)
}

/// Like [`discover_and_load`] but without validation, for callers that layer
/// more overrides (command-line flags) on top and then call [`check`].
pub fn load_layered(explicit: Option<&Path>) -> Result<CoastalConfig, ConfigError> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => discover(),
    };

    let mut config = match path {
        Some(ref p) => {
            info!(path = %p.display(), "loading config");
            load_from_path(p)?
        },
        None => {
            debug!("no config file found, using defaults");
            CoastalConfig::default()
        },
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Log warnings and fail on any error-level diagnostic.
pub fn check(config: &CoastalConfig) -> Result<(), ConfigError> {
    let mut errors = Vec::new();
    for diag in validate(config) {
        match diag.severity {
            Severity::Warning => warn!(path = diag.path, "config: {}", diag.message),
            Severity::Error => errors.push(diag.to_string()),
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(errors.join("; ")))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, crate::EmbeddingBackend, std::io::Write};

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = parse_str("").unwrap();
        assert_eq!(cfg.ollama.model, "llama3.1");
        assert_eq!(cfg.store.chunk_size, 400);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = parse_str(
            r#"
            [ollama]
            base_url = "http://ollama:11434"

            [embeddings]
            provider = "openai"
            model = "sentence-transformers/all-MiniLM-L6-v2"
            base_url = "http://tei:8080"

            [store]
            top_k = 4
            "#,
        )
        .unwrap();
        assert_eq!(cfg.ollama.base_url, "http://ollama:11434");
        assert_eq!(cfg.ollama.model, "llama3.1");
        assert_eq!(cfg.embeddings.provider, EmbeddingBackend::OpenAi);
        assert_eq!(cfg.embeddings.base_url.as_deref(), Some("http://tei:8080"));
        assert_eq!(cfg.store.top_k, 4);
        assert_eq!(cfg.store.chunk_overlap, 80);
    }

    #[test]
    fn load_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 8123").unwrap();
        let cfg = load_from_path(file.path()).unwrap();
        assert_eq!(cfg.server.port, 8123);
        assert_eq!(cfg.server.host, "0.0.0.0");
    }

    #[test]
    fn load_from_missing_path_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_path(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        let err = load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn check_rejects_invalid_values() {
        let mut cfg = CoastalConfig::default();
        cfg.store.top_k = 0;
        let err = check(&cfg).unwrap_err();
        assert!(err.to_string().contains("store.top_k"));
    }
}
