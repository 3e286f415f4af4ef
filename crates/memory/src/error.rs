#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// The file to embed does not exist.
    #[error("File not found: {path}")]
    SourceNotFound { path: String },

    /// Retrieval was restricted to a source tag that has no fragments.
    #[error("No embeddings found for file: {source_tag}")]
    NoEmbeddings { source_tag: String },

    #[error("Error reading file: {0}")]
    Io(#[from] std::io::Error),

    #[error("embedding request failed: {0}")]
    Embedding(anyhow::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MemoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SourceNotFound { .. } | Self::NoEmbeddings { .. })
    }
}
