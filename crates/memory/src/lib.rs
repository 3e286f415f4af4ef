//! Document memory: files → fragments → embedded → similarity search in SQLite.
//!
//! Every fragment carries a single source tag (the file path it came from).
//! The tag is the only partition key: embedding replaces a tag's fragments
//! wholesale, and retrieval may be restricted to one tag.

pub mod chunker;
pub mod config;
pub mod embeddings;
pub mod embeddings_ollama;
pub mod embeddings_openai;
pub mod error;
pub mod manager;
pub mod schema;
pub mod search;
pub mod store;
pub mod store_sqlite;

pub use {
    config::MemoryConfig,
    embeddings::EmbeddingProvider,
    error::MemoryError,
    manager::{EmbedOutcome, MemoryManager, MemoryStatus},
    search::SearchResult,
    store::VectorStore,
    store_sqlite::SqliteVectorStore,
};
