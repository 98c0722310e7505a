//! prepdeck-store — Durable, newest-first interview history.
//!
//! The whole history lives in one JSON file under a data directory and is
//! rewritten in full on every mutation. There is no locking: operations are
//! read-modify-write over the blob and concurrent writers are last-write-
//! wins, which is accepted for single-user usage.

pub mod draft;
pub mod schema;

pub use draft::DraftStore;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use uuid::Uuid;

use prepdeck_core::result::InterviewResult;
use prepdeck_core::statistics::{compute_history_stats, HistoryStats};

/// File name of the history blob inside the data directory.
pub const HISTORY_FILE: &str = "history.json";

/// Handle to the persisted interview history.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// A store rooted at `data_dir`; the directory is created on first
    /// write.
    pub fn new(data_dir: impl Into<PathBuf>) -> HistoryStore {
        HistoryStore {
            path: data_dir.into().join(HISTORY_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All results, newest first.
    ///
    /// A missing file is an empty history; an unreadable or unparseable
    /// file degrades to empty with a warning rather than failing the
    /// caller.
    pub async fn list(&self) -> Vec<InterviewResult> {
        match self.load().await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!("failed to load history, showing empty: {e:#}");
                Vec::new()
            }
        }
    }

    /// Prepend a result and persist the whole collection.
    ///
    /// Best-effort, not transactional: on error the on-disk state is
    /// whatever the failed write left behind.
    pub async fn append(&self, result: &InterviewResult) -> Result<()> {
        let mut results = self
            .load()
            .await
            .context("refusing to append over an unreadable history")?;
        results.insert(0, result.clone());
        self.persist(&results).await
    }

    /// Linear scan for a result by id.
    pub async fn get(&self, id: Uuid) -> Option<InterviewResult> {
        self.list().await.into_iter().find(|r| r.id == id)
    }

    /// Remove the result with the given id, keeping the order of the rest.
    /// Returns whether anything was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut results = self
            .load()
            .await
            .context("refusing to rewrite an unreadable history")?;
        let before = results.len();
        results.retain(|r| r.id != id);
        if results.len() == before {
            return Ok(false);
        }
        self.persist(&results).await?;
        Ok(true)
    }

    /// Aggregate statistics over the stored history.
    pub async fn stats(&self) -> HistoryStats {
        compute_history_stats(&self.list().await)
    }

    async fn load(&self) -> Result<Vec<InterviewResult>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => schema::decode_history(&content)
                .with_context(|| format!("failed to parse {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", self.path.display())),
        }
    }

    async fn persist(&self, results: &[InterviewResult]) -> Result<()> {
        let json = schema::encode_history(results)?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}
