//! Similarity search over stored fragments.

use tracing::debug;

use crate::{
    embeddings::{EmbeddingProvider, blob_to_vector, cosine_similarity},
    store::VectorStore,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub fragment_id: String,
    pub source: String,
    pub start_line: i64,
    pub end_line: i64,
    pub score: f32,
    pub text: String,
}

/// Embed `query` and rank fragments (optionally restricted to `source`) by
/// cosine similarity, best first, keeping at most `limit`.
pub async fn vector_search(
    store: &dyn VectorStore,
    embedder: &dyn EmbeddingProvider,
    query: &str,
    source: Option<&str>,
    limit: usize,
) -> anyhow::Result<Vec<SearchResult>> {
    let query_vec = embedder.embed(query).await?;
    let fragments = store.fragments(source).await?;

    let mut scored: Vec<SearchResult> = fragments
        .into_iter()
        .filter_map(|frag| {
            let vector = blob_to_vector(frag.embedding.as_deref()?);
            if vector.len() != query_vec.len() {
                debug!(
                    id = %frag.id,
                    stored = vector.len(),
                    query = query_vec.len(),
                    "skipping fragment with mismatched dimensions"
                );
                return None;
            }
            Some(SearchResult {
                score: cosine_similarity(&query_vec, &vector),
                fragment_id: frag.id,
                source: frag.source,
                start_line: frag.start_line,
                end_line: frag.end_line,
                text: frag.text,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    Ok(scored)
}
