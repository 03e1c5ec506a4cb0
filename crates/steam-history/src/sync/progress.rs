//! Batch planning and run counters

use std::fmt;
use std::ops::Range;

/// Partition of a title list into fixed-size batches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub total_games: usize,
    pub batch_size: usize,
    pub total_batches: usize,
}

impl BatchPlan {
    /// Plan `total_games` titles in batches of `batch_size` (treated as at least 1)
    pub fn new(total_games: usize, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            total_games,
            batch_size,
            total_batches: total_games.div_ceil(batch_size),
        }
    }

    /// Index range of the titles in a batch, empty past the last batch
    pub fn range(&self, batch_index: usize) -> Range<usize> {
        let start = batch_index
            .saturating_mul(self.batch_size)
            .min(self.total_games);
        let end = start.saturating_add(self.batch_size).min(self.total_games);
        start..end
    }

    /// Number of titles covered by batches before `batch_index`
    pub fn titles_before(&self, batch_index: usize) -> usize {
        self.range(batch_index).start
    }

    pub fn is_last(&self, batch_index: usize) -> bool {
        batch_index + 1 >= self.total_batches
    }
}

/// Per-run title counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncStats {
    /// Titles whose achievement file was written
    pub saved: u32,
    /// Titles without achievements or with private stats
    pub no_achievements: u32,
    /// Titles skipped after an error
    pub failed: u32,
}

impl SyncStats {
    pub fn processed(&self) -> u32 {
        self.saved + self.no_achievements + self.failed
    }

    /// Add another set of counters into this one
    pub fn absorb(&mut self, other: SyncStats) {
        self.saved += other.saved;
        self.no_achievements += other.no_achievements;
        self.failed += other.failed;
    }
}

impl fmt::Display for SyncStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Saved: {}, No achievements: {}",
            self.saved, self.no_achievements
        )?;
        if self.failed > 0 {
            write!(f, ", Failed: {}", self.failed)?;
        }
        Ok(())
    }
}
