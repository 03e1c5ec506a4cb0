//! Resumable progress record of the batch achievement sync
//!
//! The checkpoint is a plain value: each completed batch produces a new one
//! from the previous, and the driver hands it to a [`CheckpointStore`].

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models;
use crate::storage::{read_json, write_json_atomic};
use crate::sync::progress::BatchPlan;

/// Progress after the last completed batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncCheckpoint {
    /// Set once the final summary has been written
    pub completed: bool,
    /// `null` when no batch has run, as for an empty title list
    #[serde(default)]
    pub last_completed_batch: Option<usize>,
    pub total_batches: usize,
    pub processed_games: usize,
    pub total_games: usize,
    /// Absent from checkpoints written before the count was tracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub games_with_achievements: Option<usize>,
    #[serde(with = "models::iso_millis")]
    pub last_update: DateTime<Utc>,
}

impl SyncCheckpoint {
    /// Record the completion of `batch_index`, returning the next checkpoint
    pub fn after_batch(
        plan: &BatchPlan,
        batch_index: usize,
        processed_games: usize,
        games_with_achievements: usize,
    ) -> Self {
        Self::new(plan, Some(batch_index), processed_games, games_with_achievements)
    }

    /// Progress with an explicit last completed batch, `None` when no batch exists
    pub fn new(
        plan: &BatchPlan,
        last_completed_batch: Option<usize>,
        processed_games: usize,
        games_with_achievements: usize,
    ) -> Self {
        Self {
            completed: false,
            last_completed_batch,
            total_batches: plan.total_batches,
            processed_games,
            total_games: plan.total_games,
            games_with_achievements: Some(games_with_achievements),
            last_update: models::now(),
        }
    }

    /// The same progress, marked as a finished run
    pub fn finished(&self) -> Self {
        Self {
            completed: true,
            last_update: models::now(),
            ..self.clone()
        }
    }

    /// Batch a resumed run should start from
    pub fn next_batch(&self) -> usize {
        self.last_completed_batch
            .map_or(0, |batch| batch.saturating_add(1))
    }
}

/// Where the sync driver keeps its checkpoint
pub trait CheckpointStore: Send + Sync {
    fn load(&self) -> Result<Option<SyncCheckpoint>>;
    fn save(&self, checkpoint: &SyncCheckpoint) -> Result<()>;
}

/// Checkpoint kept in a single JSON file, overwritten on every save
#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn load(&self) -> Result<Option<SyncCheckpoint>> {
        read_json(&self.path)
    }

    fn save(&self, checkpoint: &SyncCheckpoint) -> Result<()> {
        write_json_atomic(&self.path, checkpoint)
    }
}

/// In-memory checkpoint store that remembers every save
#[derive(Debug, Default)]
pub struct MemoryCheckpointStore {
    saved: Mutex<Vec<SyncCheckpoint>>,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing checkpoint, as if left by an earlier run
    pub fn with_checkpoint(checkpoint: SyncCheckpoint) -> Self {
        Self {
            saved: Mutex::new(vec![checkpoint]),
        }
    }

    /// Every checkpoint saved so far, oldest first
    pub fn history(&self) -> Vec<SyncCheckpoint> {
        self.saved.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    fn load(&self) -> Result<Option<SyncCheckpoint>> {
        Ok(self
            .saved
            .lock()
            .ok()
            .and_then(|s| s.last().cloned()))
    }

    fn save(&self, checkpoint: &SyncCheckpoint) -> Result<()> {
        if let Ok(mut saved) = self.saved.lock() {
            saved.push(checkpoint.clone());
        }
        Ok(())
    }
}
