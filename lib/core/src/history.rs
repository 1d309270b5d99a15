//! Ordered record of the tracks already shown in a session, plus the
//! navigation cursor and pool-size accounting.
//!
//! The record is append-only: only a fresh selection appends, navigation
//! just moves the cursor. Pool size is the best known count of catalog
//! tracks matching the current target, seen and unseen together, and is
//! recomputed from the latest store query rather than accumulated.

use crate::track::{Track, TrackId};
use ahash::AHashSet;

#[derive(Debug, Default)]
pub struct SessionHistory {
    shown: Vec<Track>,
    cursor: Option<usize>,
    pool_size: usize,
}

impl SessionHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly selected track, move the cursor onto it, and
    /// recompute the pool size from the query that produced it:
    /// `unseen` matches still in the store plus everything shown so far.
    pub fn record(&mut self, track: Track, unseen: usize) {
        self.pool_size = unseen + self.shown.len();
        self.shown.push(track);
        self.cursor = Some(self.shown.len() - 1);
    }

    /// Re-derive the pool size without appending; used when a selection
    /// ends with nothing new to show.
    pub fn settle_pool(&mut self, unseen: usize) {
        self.pool_size = unseen + self.shown.len();
    }

    /// Move the cursor one step back. At the oldest entry (or with
    /// nothing shown) this is a no-op and returns `None`.
    pub fn step_back(&mut self) -> Option<&Track> {
        match self.cursor {
            Some(i) if i > 0 => {
                self.cursor = Some(i - 1);
                self.shown.get(i - 1)
            }
            _ => None,
        }
    }

    /// Move the cursor one step forward through already-shown tracks.
    /// Returns `None` at the newest entry: that case is a request for a
    /// fresh selection, which is the orchestrator's job.
    pub fn step_forward(&mut self) -> Option<&Track> {
        match self.cursor {
            Some(i) if i + 1 < self.shown.len() => {
                self.cursor = Some(i + 1);
                self.shown.get(i + 1)
            }
            _ => None,
        }
    }

    /// Clear everything in one step: record, cursor, and pool size.
    pub fn reset(&mut self) {
        self.shown.clear();
        self.cursor = None;
        self.pool_size = 0;
    }

    #[must_use]
    pub fn current(&self) -> Option<&Track> {
        self.cursor.and_then(|i| self.shown.get(i))
    }

    #[inline]
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        matches!(self.cursor, Some(i) if i > 0)
    }

    /// Forward is possible while older entries lie ahead of the cursor,
    /// while nothing has been shown yet, or while the pool still holds
    /// unseen matches worth fetching.
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        match self.cursor {
            None => true,
            Some(i) => i + 1 < self.shown.len() || self.pool_size > self.shown.len(),
        }
    }

    #[inline]
    #[must_use]
    pub fn seen_count(&self) -> usize {
        self.shown.len()
    }

    #[inline]
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }

    /// Ids of every track shown this session, for store-query exclusion.
    #[must_use]
    pub fn exclude_ids(&self) -> AHashSet<TrackId> {
        self.shown.iter().map(|t| t.id.clone()).collect()
    }
}
