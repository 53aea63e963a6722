use crate::domain::model::RawRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Persistence for the raw submission log. The same location also holds the
/// compacted leaderboard after a retrieval.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Adds one row at the end without looking at existing content.
    async fn append(&self, record: &RawRecord) -> Result<()>;

    /// Every persisted row in order. Fails if the store does not exist.
    async fn read_all(&self) -> Result<Vec<RawRecord>>;

    /// Overwrites the whole store with exactly `records`.
    async fn replace_all(&self, records: &[RawRecord]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> &str;
    fn store_path(&self) -> &str;
    fn allowed_origins(&self) -> &[String];
    fn leaderboard_size(&self) -> usize;
    fn strict_scores(&self) -> bool;
}
