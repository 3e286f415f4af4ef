/// Memory manager: orchestrates file reading, chunking, embedding, and retrieval.
use {
    sha2::{Digest, Sha256},
    tracing::{debug, info},
};

use crate::{
    chunker::chunk_text,
    config::MemoryConfig,
    embeddings::{EmbeddingProvider, vector_to_blob},
    error::MemoryError,
    schema::FragmentRow,
    search::{self, SearchResult},
    store::VectorStore,
};

pub struct MemoryManager {
    config: MemoryConfig,
    store: Box<dyn VectorStore>,
    embedder: Box<dyn EmbeddingProvider>,
}

/// What `embed_file` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedOutcome {
    /// The source already had fragments and `force` was not set.
    AlreadyEmbedded,
    Embedded {
        fragments: usize,
        /// Fragments deleted for this source before inserting.
        replaced: u64,
    },
}

/// Status info about the memory system.
#[derive(Debug, Clone)]
pub struct MemoryStatus {
    pub total_sources: usize,
    pub total_fragments: u64,
    pub embedding_model: String,
}

impl MemoryManager {
    pub fn new(
        config: MemoryConfig,
        store: Box<dyn VectorStore>,
        embedder: Box<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            config,
            store,
            embedder,
        }
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Embed the file at `path` under the source tag `path`.
    ///
    /// Skips work when the tag already has fragments unless `force` is set.
    /// The file is read and embedded before anything is deleted, so a failure
    /// leaves prior fragments in place.
    pub async fn embed_file(&self, path: &str, force: bool) -> Result<EmbedOutcome, MemoryError> {
        let existing = self.store.ids_for_source(path).await?;
        if !existing.is_empty() && !force {
            debug!(path, fragments = existing.len(), "already embedded, skipping");
            return Ok(EmbedOutcome::AlreadyEmbedded);
        }

        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(MemoryError::SourceNotFound {
                    path: path.to_string(),
                });
            },
            Err(e) => return Err(MemoryError::Io(e)),
        };

        let rows = self.build_fragments(path, &content).await?;
        let replaced = self.store.replace_source(path, &rows).await?;

        info!(
            path,
            fragments = rows.len(),
            replaced,
            model = %self.embedder.model_name(),
            "embedded file"
        );
        Ok(EmbedOutcome::Embedded {
            fragments: rows.len(),
            replaced,
        })
    }

    async fn build_fragments(
        &self,
        source: &str,
        content: &str,
    ) -> Result<Vec<FragmentRow>, MemoryError> {
        let raw_chunks = chunk_text(content, self.config.chunk_size, self.config.chunk_overlap);
        let texts: Vec<String> = raw_chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self
            .embedder
            .embed_batch(&texts)
            .await
            .map_err(MemoryError::Embedding)?;
        if embeddings.len() != raw_chunks.len() {
            return Err(MemoryError::Embedding(anyhow::anyhow!(
                "expected {} embeddings, got {}",
                raw_chunks.len(),
                embeddings.len()
            )));
        }

        let model_name = self.embedder.model_name().to_string();
        let created_at = chrono::Utc::now().to_rfc3339();
        Ok(raw_chunks
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(i, (chunk, emb))| FragmentRow {
                id: format!("{source}:{i}"),
                source: source.to_string(),
                ordinal: i as i64,
                start_line: chunk.start_line as i64,
                end_line: chunk.end_line as i64,
                hash: sha256_hex(&chunk.text),
                model: model_name.clone(),
                text: chunk.text,
                embedding: Some(vector_to_blob(&emb)),
                created_at: created_at.clone(),
            })
            .collect())
    }

    pub async fn has_embeddings(&self, source: &str) -> Result<bool, MemoryError> {
        Ok(!self.store.ids_for_source(source).await?.is_empty())
    }

    /// Top-k fragments for `query`. With a source tag, the tag must have
    /// fragments; without one, the whole corpus is searched.
    pub async fn retrieve(
        &self,
        query: &str,
        source: Option<&str>,
    ) -> Result<Vec<SearchResult>, MemoryError> {
        if let Some(tag) = source
            && !self.has_embeddings(tag).await?
        {
            return Err(MemoryError::NoEmbeddings {
                source_tag: tag.to_string(),
            });
        }
        let results = search::vector_search(
            self.store.as_ref(),
            self.embedder.as_ref(),
            query,
            source,
            self.config.top_k,
        )
        .await?;
        debug!(query, ?source, hits = results.len(), "retrieved fragments");
        Ok(results)
    }

    /// Drop every fragment stored under `source`. Returns how many were removed.
    pub async fn forget(&self, source: &str) -> Result<u64, MemoryError> {
        let removed = self.store.delete_source(source).await?;
        info!(source, removed, "removed embeddings");
        Ok(removed)
    }

    pub async fn status(&self) -> Result<MemoryStatus, MemoryError> {
        Ok(MemoryStatus {
            total_sources: self.store.sources().await?.len(),
            total_fragments: self.store.count().await?,
            embedding_model: self.embedder.model_name().to_string(),
        })
    }
}

fn sha256_hex(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}
