use crate::dials::DialRanges;
use crate::error::Result;
use crate::track::{Track, TrackId};
use ahash::AHashSet;

/// Read-only range query over a track catalog.
///
/// Implementations return every track whose every dial falls inside the
/// closed interval given for that dial, skipping any id in `exclude`.
/// An empty `exclude` set excludes nothing. No ordering is guaranteed.
/// Failures surface as [`Error::StoreUnavailable`](crate::Error); the
/// caller never retries a failed query.
pub trait CandidateStore: Send + Sync {
    fn query(&self, ranges: &DialRanges, exclude: &AHashSet<TrackId>) -> Result<Vec<Track>>;
}
