//! Configuration for the coastal service: TOML discovery, env overrides, validation.

pub mod env;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    error::ConfigError,
    loader::{
        CONFIG_FILE_NAME, check, discover_and_load, load_from_path, load_layered, parse_str,
    },
    schema::{
        CoastalConfig, EmbeddingBackend, EmbeddingsConfig, GeocodingConfig, OllamaConfig,
        ServerConfig, StoreConfig,
    },
};
