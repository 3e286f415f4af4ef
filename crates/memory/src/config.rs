/// Configuration for the memory subsystem.
#[derive(Debug, Clone)]
pub struct MemoryConfig {
    /// Target fragment size in tokens (approximate, counted as whitespace-split words).
    pub chunk_size: usize,
    /// Overlap between consecutive fragments in tokens.
    pub chunk_overlap: usize,
    /// How many fragments a retrieval returns.
    pub top_k: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            chunk_size: 400,
            chunk_overlap: 80,
            top_k: 10,
        }
    }
}
