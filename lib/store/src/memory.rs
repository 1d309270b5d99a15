use ahash::{AHashMap, AHashSet};
use dialx_core::{CandidateStore, DialRanges, Error, Result, Track, TrackId};
use parking_lot::RwLock;
use std::path::Path;
use tracing::{debug, info};

/// An in-memory track catalog.
///
/// Queries are a linear scan with the range filter applied per track;
/// catalogs in this domain are small enough that an index would not pay
/// for itself. Writes validate dial values on the way in, so everything
/// stored is on the 0-10 scale.
pub struct MemoryStore {
    tracks: RwLock<AHashMap<TrackId, Track>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tracks: RwLock::new(AHashMap::new()),
        }
    }

    /// Build a store from a batch of tracks, validating each.
    pub fn from_tracks(tracks: impl IntoIterator<Item = Track>) -> Result<Self> {
        let store = Self::new();
        for track in tracks {
            store.upsert(track)?;
        }
        Ok(store)
    }

    /// Load a catalog from a JSON file holding an array of tracks.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let tracks: Vec<Track> =
            serde_json::from_str(&raw).map_err(|e| Error::Serialization(e.to_string()))?;
        let store = Self::from_tracks(tracks)?;
        info!(
            "Loaded {} tracks from {}",
            store.len(),
            path.as_ref().display()
        );
        Ok(store)
    }

    /// Insert or replace a track.
    pub fn upsert(&self, track: Track) -> Result<()> {
        track.dials.validate()?;
        self.tracks.write().insert(track.id.clone(), track);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &TrackId) -> Option<Track> {
        self.tracks.read().get(id).cloned()
    }

    pub fn remove(&self, id: &TrackId) -> Option<Track> {
        self.tracks.write().remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.read().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateStore for MemoryStore {
    fn query(&self, ranges: &DialRanges, exclude: &AHashSet<TrackId>) -> Result<Vec<Track>> {
        let tracks = self.tracks.read();
        let matches: Vec<Track> = tracks
            .values()
            .filter(|t| !exclude.contains(&t.id) && ranges.contains(&t.dials))
            .cloned()
            .collect();
        debug!(
            "Range query matched {} of {} tracks ({} excluded ids)",
            matches.len(),
            tracks.len(),
            exclude.len()
        );
        Ok(matches)
    }
}
