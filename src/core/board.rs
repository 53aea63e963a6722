use crate::core::ranker;
use crate::core::{RawRecord, Record, Storage};
use crate::domain::model::DEFAULT_LEADERBOARD_SIZE;
use crate::utils::error::{LeaderboardError, Result};
use crate::utils::validation::validate_non_empty;
use tokio::sync::Mutex;

/// Owns the store and serializes every access to it.
///
/// A submission and a read-and-compact cycle never interleave, so a
/// compaction cannot drop a row appended while it was running.
pub struct LeaderboardService<S: Storage> {
    storage: S,
    limit: usize,
    strict_scores: bool,
    lock: Mutex<()>,
}

impl<S: Storage> LeaderboardService<S> {
    pub fn new(storage: S) -> Self {
        Self::with_options(storage, DEFAULT_LEADERBOARD_SIZE, false)
    }

    pub fn with_options(storage: S, limit: usize, strict_scores: bool) -> Self {
        Self {
            storage,
            limit,
            strict_scores,
            lock: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Appends one submission to the store. The score is stored as given
    /// unless strict mode is on; bad scores otherwise surface on the next
    /// retrieval.
    pub async fn submit(&self, name: &str, score: &str) -> Result<()> {
        validate_non_empty("name", name)?;
        let record = RawRecord::new(name, score);
        if self.strict_scores && ranker::decode(&record).is_err() {
            return Err(LeaderboardError::ValidationError {
                message: format!("score {:?} is not an integer", score),
            });
        }

        let _guard = self.lock.lock().await;
        self.storage.append(&record).await?;
        tracing::debug!("Appended score {:?} for {:?}", score, name);
        Ok(())
    }

    /// Reads the raw log and ranks it without touching the store.
    pub async fn compute(&self) -> Result<Vec<Record>> {
        let _guard = self.lock.lock().await;
        self.compute_locked().await
    }

    /// Overwrites the store with an already ranked leaderboard.
    pub async fn persist(&self, leaderboard: &[Record]) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.persist_locked(leaderboard).await
    }

    /// Computes the leaderboard and compacts the store down to it, as one
    /// step with respect to concurrent submissions.
    pub async fn retrieve(&self) -> Result<Vec<Record>> {
        let _guard = self.lock.lock().await;
        let leaderboard = self.compute_locked().await?;
        self.persist_locked(&leaderboard).await?;
        tracing::info!("Leaderboard compacted to {} entries", leaderboard.len());
        Ok(leaderboard)
    }

    async fn compute_locked(&self) -> Result<Vec<Record>> {
        let raw = self.storage.read_all().await?;
        ranker::rank(&raw, self.limit)
    }

    async fn persist_locked(&self, leaderboard: &[Record]) -> Result<()> {
        let rows: Vec<RawRecord> = leaderboard.iter().map(RawRecord::from).collect();
        self.storage.replace_all(&rows).await
    }
}
