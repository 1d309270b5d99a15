//! Fit scoring: sum of per-dial absolute differences from the target.
//! Lower is better; 0 is a perfect match.

use crate::dials::{DialKey, Dials, DIAL_MAX};
use crate::track::Track;

/// Worst possible fit: every dial at maximum distance.
pub const MAX_FIT: u32 = DialKey::COUNT as u32 * DIAL_MAX as u32;

/// Manhattan distance between two dial sets. Symmetric, unnormalized;
/// only comparable within one selection against one target.
#[inline]
#[must_use]
pub fn fit_score(dials: &Dials, target: &Dials) -> u32 {
    DialKey::ALL
        .iter()
        .map(|key| (dials.get(*key) as i32 - target.get(*key) as i32).unsigned_abs())
        .sum()
}

/// A track paired with its fit against the current target.
#[derive(Debug, Clone)]
pub struct ScoredTrack {
    pub track: Track,
    pub fit: u32,
}

/// Score every track in the pool and sort best-fit first.
#[must_use]
pub fn score_pool(pool: Vec<Track>, target: &Dials) -> Vec<ScoredTrack> {
    let mut scored: Vec<ScoredTrack> = pool
        .into_iter()
        .map(|track| {
            let fit = fit_score(&track.dials, target);
            ScoredTrack { track, fit }
        })
        .collect();
    scored.sort_by_key(|s| s.fit);
    scored
}
