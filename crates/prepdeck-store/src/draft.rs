//! Persistence for a saved in-progress session.
//!
//! At most one draft exists per data directory; saving overwrites any
//! previous one, and submitting or resuming-then-finishing a session clears
//! it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use prepdeck_core::session::SessionDraft;

/// File name of the draft inside the data directory.
pub const DRAFT_FILE: &str = "draft.json";

/// Handle to the persisted session draft.
#[derive(Debug, Clone)]
pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    /// A store rooted at `data_dir`; the directory is created on first
    /// write.
    pub fn new(data_dir: impl Into<PathBuf>) -> DraftStore {
        DraftStore {
            path: data_dir.into().join(DRAFT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved draft, or `None` when there is none.
    pub async fn load(&self) -> Result<Option<SessionDraft>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let draft = serde_json::from_str(&content)
                    .with_context(|| format!("failed to parse {}", self.path.display()))?;
                Ok(Some(draft))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", self.path.display())),
        }
    }

    /// Persist a draft, replacing any previous one.
    pub async fn save(&self, draft: &SessionDraft) -> Result<()> {
        let json = serde_json::to_string_pretty(draft).context("failed to serialize draft")?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("failed to write {}", self.path.display()))
    }

    /// Remove the saved draft. Returns whether one existed.
    pub async fn clear(&self) -> Result<bool> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("failed to remove {}", self.path.display())),
        }
    }
}
