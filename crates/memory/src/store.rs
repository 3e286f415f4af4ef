use async_trait::async_trait;

use crate::schema::FragmentRow;

/// Persistence for embedded fragments, partitioned by source tag.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Fragment ids stored under `source`, in ordinal order.
    async fn ids_for_source(&self, source: &str) -> anyhow::Result<Vec<String>>;

    /// Delete everything under `source` and insert `rows`, atomically.
    /// Returns how many fragments were deleted.
    async fn replace_source(&self, source: &str, rows: &[FragmentRow]) -> anyhow::Result<u64>;

    async fn delete_source(&self, source: &str) -> anyhow::Result<u64>;

    /// All fragments, or only those under `source` when given.
    async fn fragments(&self, source: Option<&str>) -> anyhow::Result<Vec<FragmentRow>>;

    /// Distinct source tags.
    async fn sources(&self) -> anyhow::Result<Vec<String>>;

    async fn count(&self) -> anyhow::Result<u64>;
}
