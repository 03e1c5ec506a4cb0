//! Achievement synchronization
//!
//! Provides:
//! - Batched, checkpointed fetching of achievements for the whole library
//! - Resume from the last completed batch after a crash or kill
//! - A lighter refresh for recently played titles
//! - Pacing through an injectable [`Throttle`]
//!
//! Everything runs sequentially: one request at a time, titles in list order,
//! batches in increasing order.

pub mod checkpoint;
pub mod merge;
pub mod progress;
pub mod rate_limiter;

use std::fmt;

use tracing::{info, warn};

use crate::client::Catalog;
use crate::config::DEFAULT_BATCH_SIZE;
use crate::error::{Result, SteamError};
use crate::models::{self, AchievementSummary, Game, TitleAchievementFile};
use crate::storage::AchievementStore;

pub use checkpoint::{CheckpointStore, FileCheckpointStore, MemoryCheckpointStore, SyncCheckpoint};
pub use merge::merge;
pub use progress::{BatchPlan, SyncStats};
pub use rate_limiter::{RateLimiter, Throttle};

/// Where a run starts in the batch sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resume {
    /// Start at batch 0
    #[default]
    Fresh,
    /// Continue after the checkpoint's last completed batch
    FromCheckpoint,
    /// Continue after an explicitly named completed batch
    AfterBatch(usize),
}

impl Resume {
    /// Build from the `RESUME` / `LAST_BATCH` settings
    pub fn from_flags(resume: bool, last_batch: Option<usize>) -> Self {
        match (resume, last_batch) {
            (false, _) => Resume::Fresh,
            (true, None) => Resume::FromCheckpoint,
            (true, Some(k)) => Resume::AfterBatch(k),
        }
    }
}

/// Options for a batch sync run
#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    /// Titles per checkpointed batch
    pub batch_size: usize,
    /// Where to start
    pub resume: Resume,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            resume: Resume::Fresh,
        }
    }
}

/// Result of processing a single title
#[derive(Debug, Clone, PartialEq)]
pub enum TitleOutcome {
    /// Achievement file written with this many achievements
    Saved { achievements: usize },
    /// Title has no achievements, or the player's stats are private
    NoAchievements,
    /// Fetch failed; the title was skipped
    Failed(String),
}

/// Outcome of a full batch run
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// First batch processed by this run
    pub start_batch: usize,
    /// Batches processed by this run
    pub batches_run: usize,
    /// Title counters for this run only
    pub stats: SyncStats,
    /// Summary written at completion, covering resumed batches too
    pub summary: AchievementSummary,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} batch(es) from #{}; {}; {}/{} games with achievements",
            self.batches_run,
            self.start_batch + 1,
            self.stats,
            self.summary.games_with_achievements,
            self.summary.total_games
        )
    }
}

/// Sequential achievement sync over a catalog, persisting to an achievement store
pub struct AchievementSync<'a> {
    catalog: &'a dyn Catalog,
    throttle: &'a mut dyn Throttle,
    store: &'a dyn AchievementStore,
}

impl<'a> AchievementSync<'a> {
    pub fn new(
        catalog: &'a dyn Catalog,
        throttle: &'a mut dyn Throttle,
        store: &'a dyn AchievementStore,
    ) -> Self {
        Self {
            catalog,
            throttle,
            store,
        }
    }

    /// Fetch, merge and assemble the achievement file of one title.
    ///
    /// `Ok(None)` when the title has no player achievement data. Schema and
    /// global percentages are fetched only when player data exists.
    pub async fn fetch_title(&mut self, game: &Game) -> Result<Option<TitleAchievementFile>> {
        self.throttle.wait().await;
        let Some(player) = self.catalog.player_achievements(game.appid).await? else {
            return Ok(None);
        };

        self.throttle.wait().await;
        let schema = self.catalog.schema(game.appid).await;

        self.throttle.wait().await;
        let global = self.catalog.global_percentages(game.appid).await;

        let achievements = merge(&player, &schema, &global);
        Ok(Some(TitleAchievementFile::new(
            game.appid,
            game.name.clone(),
            achievements,
        )))
    }

    /// Fetch one title and persist its file.
    ///
    /// Fetch errors are logged and reported as [`TitleOutcome::Failed`];
    /// only a storage failure is returned as an error.
    pub async fn sync_title(&mut self, game: &Game) -> Result<TitleOutcome> {
        match self.fetch_title(game).await {
            Ok(Some(file)) => {
                self.store.save_title(&file)?;
                let achievements = file.achievements.len();
                info!(
                    appid = game.appid,
                    name = %game.name,
                    achievements,
                    unlocked = file.unlocked(),
                    "saved achievements"
                );
                Ok(TitleOutcome::Saved { achievements })
            }
            Ok(None) => {
                info!(appid = game.appid, name = %game.name, "no achievements");
                Ok(TitleOutcome::NoAchievements)
            }
            Err(e) => {
                warn!(appid = game.appid, name = %game.name, error = %e, "failed to fetch achievements");
                Ok(TitleOutcome::Failed(e.to_string()))
            }
        }
    }

    /// Process titles in order, returning counters
    async fn sync_titles(&mut self, games: &[Game]) -> Result<SyncStats> {
        let mut stats = SyncStats::default();
        for game in games {
            match self.sync_title(game).await? {
                TitleOutcome::Saved { .. } => stats.saved += 1,
                TitleOutcome::NoAchievements => stats.no_achievements += 1,
                TitleOutcome::Failed(_) => stats.failed += 1,
            }
        }
        Ok(stats)
    }

    /// Refresh achievement files for a short list of titles, without batching
    /// or checkpointing
    pub async fn refresh(&mut self, games: &[Game]) -> Result<SyncStats> {
        info!(count = games.len(), "refreshing achievements");
        let stats = self.sync_titles(games).await?;
        info!(%stats, "refresh complete");
        Ok(stats)
    }

    /// Run the batched sync over `games`.
    ///
    /// A checkpoint is saved after every batch; the summary and a final
    /// `completed` checkpoint are written once the last batch is done.
    pub async fn run(
        &mut self,
        games: &[Game],
        opts: SyncOptions,
        checkpoints: &dyn CheckpointStore,
    ) -> Result<SyncReport> {
        if opts.batch_size == 0 {
            return Err(SteamError::invalid_param("batch size must be at least 1"));
        }

        let plan = BatchPlan::new(games.len(), opts.batch_size);
        let previous = match opts.resume {
            Resume::Fresh => None,
            _ => checkpoints.load()?,
        };
        let start_batch = resolve_start(opts.resume, previous.as_ref());

        info!(
            total_games = plan.total_games,
            batch_size = plan.batch_size,
            total_batches = plan.total_batches,
            "starting achievement sync"
        );
        if start_batch > 0 {
            info!(batch = start_batch + 1, "resuming");
        }

        let mut processed = plan.titles_before(start_batch);
        let mut with_achievements = self.carried_over(games, &plan, start_batch, previous.as_ref());
        let mut last = previous.filter(|cp| !cp.completed);
        let mut stats = SyncStats::default();
        let mut batches_run = 0;

        for batch_index in start_batch..plan.total_batches {
            let range = plan.range(batch_index);
            info!(
                batch = batch_index + 1,
                total_batches = plan.total_batches,
                first = range.start + 1,
                last = range.end,
                total_games = plan.total_games,
                "processing batch"
            );

            let batch_stats = self.sync_titles(&games[range.clone()]).await?;
            processed += range.len();
            with_achievements += batch_stats.saved as usize;
            stats.absorb(batch_stats);
            batches_run += 1;

            let checkpoint =
                SyncCheckpoint::after_batch(&plan, batch_index, processed, with_achievements);
            checkpoints.save(&checkpoint)?;
            info!(batch = batch_index + 1, %batch_stats, "batch completed");
            last = Some(checkpoint);

            if !plan.is_last(batch_index) {
                self.throttle.pause_between_batches().await;
            }
        }

        let summary = AchievementSummary {
            total_games: plan.total_games,
            games_with_achievements: with_achievements,
            last_sync: models::now(),
        };
        self.store.save_summary(&summary)?;

        // Without a batch checkpoint every batch was already covered by the
        // resume index, or there was no batch at all
        let final_checkpoint = match last {
            Some(cp) => cp.finished(),
            None => SyncCheckpoint::new(
                &plan,
                plan.total_batches.checked_sub(1),
                processed,
                with_achievements,
            )
            .finished(),
        };
        checkpoints.save(&final_checkpoint)?;

        info!(
            processed,
            games_with_achievements = with_achievements,
            "all batches completed"
        );

        Ok(SyncReport {
            start_batch,
            batches_run,
            stats,
            summary,
        })
    }

    /// Titles with achievements among the batches a resumed run skips.
    ///
    /// Taken from the checkpoint when it lines up with the start batch and
    /// carries the count, otherwise counted from the files already in the store.
    fn carried_over(
        &self,
        games: &[Game],
        plan: &BatchPlan,
        start_batch: usize,
        previous: Option<&SyncCheckpoint>,
    ) -> usize {
        if start_batch == 0 {
            return 0;
        }
        let recorded = previous
            .filter(|cp| !cp.completed && cp.next_batch() == start_batch)
            .and_then(|cp| cp.games_with_achievements);

        match recorded {
            Some(count) => count,
            None => games[..plan.titles_before(start_batch)]
                .iter()
                .filter(|g| self.store.has_title(g.appid))
                .count(),
        }
    }
}

/// First batch to process for a resume instruction and the stored checkpoint.
///
/// A finished checkpoint starts a new run from batch 0.
pub fn resolve_start(resume: Resume, checkpoint: Option<&SyncCheckpoint>) -> usize {
    match resume {
        Resume::Fresh => 0,
        Resume::AfterBatch(k) => k.saturating_add(1),
        Resume::FromCheckpoint => match checkpoint {
            Some(cp) if !cp.completed => cp.next_batch(),
            _ => 0,
        },
    }
}
