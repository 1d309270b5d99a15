//! The selection orchestrator: one public operation per user gesture,
//! composing the tolerance schedule, the store, the scorer, the sampler,
//! and the session history.
//!
//! All state lives behind one mutex; selection attempts are additionally
//! serialized by a second mutex so a session runs at most one at a time.
//! Store queries happen with no lock held, so navigation and resets can
//! land mid-attempt: every state mutation bumps an epoch counter, and an
//! attempt only commits if the epoch it started from is still current.
//! A stale attempt is discarded and surfaces as [`Error::Superseded`].

use crate::dials::Dials;
use crate::error::{Error, Result};
use crate::history::SessionHistory;
use crate::sampler::weighted_pick;
use crate::score::score_pool;
use crate::store::CandidateStore;
use crate::tolerance::{ToleranceConfig, ToleranceSchedule};
use crate::track::{Track, TrackId};
use ahash::AHashSet;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of one selection attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// A fresh track, with its fit against the target and the widest
    /// per-dial tolerance the query needed.
    Selected {
        track: Track,
        fit: u32,
        tolerance: u8,
    },
    /// Every track matching the target has already been shown.
    Exhausted,
    /// Nothing in the catalog matches, even at maximum tolerance.
    NoMatch,
}

/// Outcome of a forward gesture: either a replay from history or a fresh
/// selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Forward {
    History(Track),
    New(Selection),
}

/// Point-in-time view of the session for a UI to render.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub current: Option<Track>,
    pub pool_size: usize,
    pub seen_count: usize,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    pub tolerance: ToleranceConfig,
    /// Target in effect before the first explicit selection.
    pub target: Dials,
}

struct SessionState {
    history: SessionHistory,
    playlist: Vec<Track>,
    target: Dials,
    epoch: u64,
}

impl SessionState {
    fn touch(&mut self) {
        self.epoch += 1;
    }
}

/// A listening session over a track catalog.
pub struct Session {
    store: Arc<dyn CandidateStore>,
    tolerance: ToleranceConfig,
    state: Mutex<SessionState>,
    attempt: Mutex<()>,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl Session {
    #[must_use]
    pub fn new(store: Arc<dyn CandidateStore>) -> Self {
        Self::with_config(store, SessionConfig::default())
    }

    #[must_use]
    pub fn with_config(store: Arc<dyn CandidateStore>, config: SessionConfig) -> Self {
        Self::with_rng(store, config, StdRng::from_os_rng())
    }

    /// Construct with an explicit random source, so picks are reproducible.
    #[must_use]
    pub fn with_rng(
        store: Arc<dyn CandidateStore>,
        config: SessionConfig,
        rng: impl RngCore + Send + 'static,
    ) -> Self {
        Self {
            store,
            tolerance: config.tolerance,
            state: Mutex::new(SessionState {
                history: SessionHistory::new(),
                playlist: Vec::new(),
                target: config.target,
                epoch: 0,
            }),
            attempt: Mutex::new(()),
            rng: Mutex::new(Box::new(rng)),
        }
    }

    /// Select one fresh track matching `target`, never repeating anything
    /// shown this session. The target sticks for later forward gestures.
    pub fn select_next(&self, target: &Dials) -> Result<Selection> {
        target.validate()?;
        {
            let mut state = self.state.lock();
            state.target = *target;
            state.touch();
        }
        self.run_attempt()
    }

    /// Update the target without querying; takes effect on the next
    /// selection or forward gesture.
    pub fn set_target(&self, target: Dials) -> Result<()> {
        target.validate()?;
        let mut state = self.state.lock();
        state.target = target;
        state.touch();
        Ok(())
    }

    #[must_use]
    pub fn target(&self) -> Dials {
        self.state.lock().target
    }

    /// Step back through history. No-op at the oldest shown track.
    pub fn navigate_back(&self) -> Option<Track> {
        let mut state = self.state.lock();
        let stepped = state.history.step_back().cloned();
        if stepped.is_some() {
            state.touch();
        }
        stepped
    }

    /// Step forward: replay the next shown track if the cursor is behind,
    /// otherwise run a fresh selection against the current target.
    pub fn navigate_forward(&self) -> Result<Forward> {
        {
            let mut state = self.state.lock();
            if let Some(track) = state.history.step_forward().cloned() {
                state.touch();
                return Ok(Forward::History(track));
            }
        }
        self.run_attempt().map(Forward::New)
    }

    /// Clear history, cursor, and pool accounting in one step. The
    /// playlist survives; an in-flight selection does not.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.history.reset();
        state.touch();
        info!("Session reset");
    }

    /// Save the track under the cursor to the session playlist. Returns
    /// false when nothing is playing or it is already saved.
    pub fn save_current(&self) -> bool {
        let mut state = self.state.lock();
        let Some(track) = state.history.current().cloned() else {
            return false;
        };
        if state.playlist.iter().any(|t| t.id == track.id) {
            return false;
        }
        state.playlist.push(track);
        true
    }

    #[must_use]
    pub fn is_saved(&self, id: &TrackId) -> bool {
        self.state.lock().playlist.iter().any(|t| &t.id == id)
    }

    #[must_use]
    pub fn playlist(&self) -> Vec<Track> {
        self.state.lock().playlist.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock();
        SessionSnapshot {
            current: state.history.current().cloned(),
            pool_size: state.history.pool_size(),
            seen_count: state.history.seen_count(),
            can_go_back: state.history.can_go_back(),
            can_go_forward: state.history.can_go_forward(),
        }
    }

    /// One full attempt: query at base tolerance, widen until the pool is
    /// non-empty or the schedule is spent, then score, sample, and record.
    fn run_attempt(&self) -> Result<Selection> {
        let _attempt = self.attempt.lock();

        let (target, exclude, epoch) = {
            let state = self.state.lock();
            (state.target, state.history.exclude_ids(), state.epoch)
        };

        let mut schedule = ToleranceSchedule::new(&target, self.tolerance);
        let mut pool = self.store.query(&schedule.ranges(), &exclude)?;
        while pool.is_empty() && schedule.widen() {
            debug!(
                "Empty pool, widening to level {} (max dial tolerance {})",
                schedule.level(),
                schedule.tolerance_used()
            );
            pool = self.store.query(&schedule.ranges(), &exclude)?;
        }

        if pool.is_empty() {
            // Zero matches is ambiguous: re-run the final window with no
            // exclusions to tell "all shown" from "nothing matches".
            let unscoped = self.store.query(&schedule.ranges(), &AHashSet::new())?;
            let outcome = if unscoped.is_empty() {
                Selection::NoMatch
            } else {
                Selection::Exhausted
            };

            let mut state = self.state.lock();
            if state.epoch != epoch {
                warn!("Discarding stale selection outcome");
                return Err(Error::Superseded);
            }
            state.history.settle_pool(0);
            state.touch();
            return Ok(outcome);
        }

        let unseen = pool.len();
        let scored = score_pool(pool, &target);
        let picked = {
            let mut rng = self.rng.lock();
            weighted_pick(&mut **rng, &scored).cloned()
        };
        let Some(picked) = picked else {
            return Ok(Selection::NoMatch);
        };

        let mut state = self.state.lock();
        if state.epoch != epoch {
            warn!("Discarding stale selection of track {}", picked.track.id);
            return Err(Error::Superseded);
        }
        state.history.record(picked.track.clone(), unseen);
        state.touch();
        info!(
            "Selected track {} (fit {}, tolerance {}, pool {})",
            picked.track.id,
            picked.fit,
            schedule.tolerance_used(),
            state.history.pool_size()
        );

        Ok(Selection::Selected {
            track: picked.track,
            fit: picked.fit,
            tolerance: schedule.tolerance_used(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dials::DialRanges;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct VecStore(Vec<Track>);

    impl CandidateStore for VecStore {
        fn query(&self, ranges: &DialRanges, exclude: &AHashSet<TrackId>) -> Result<Vec<Track>> {
            Ok(self
                .0
                .iter()
                .filter(|t| ranges.contains(&t.dials) && !exclude.contains(&t.id))
                .cloned()
                .collect())
        }
    }

    fn track(id: u64, value: u8) -> Track {
        Track::new(TrackId::from(id), Dials::uniform(value), None)
    }

    #[test]
    fn test_invalid_target_rejected_before_any_query() {
        struct PanickingStore;
        impl CandidateStore for PanickingStore {
            fn query(&self, _: &DialRanges, _: &AHashSet<TrackId>) -> Result<Vec<Track>> {
                panic!("store must not be queried");
            }
        }

        let session = Session::new(Arc::new(PanickingStore));
        let mut target = Dials::default();
        target.intensity = 12;
        let err = session.select_next(&target).unwrap_err();
        assert!(matches!(err, Error::InvalidDial { key: "intensity", value: 12 }));
    }

    #[test]
    fn test_store_failure_leaves_history_untouched() {
        struct BrokenStore;
        impl CandidateStore for BrokenStore {
            fn query(&self, _: &DialRanges, _: &AHashSet<TrackId>) -> Result<Vec<Track>> {
                Err(Error::StoreUnavailable("connection refused".into()))
            }
        }

        let session = Session::new(Arc::new(BrokenStore));
        let err = session.select_next(&Dials::default()).unwrap_err();
        assert!(matches!(err, Error::StoreUnavailable(_)));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.seen_count, 0);
        assert_eq!(snapshot.pool_size, 0);
    }

    #[test]
    fn test_reset_mid_query_discards_the_attempt() {
        struct ResetOnFirstQuery {
            tracks: VecStore,
            session: Mutex<Option<Arc<Session>>>,
            fired: AtomicBool,
        }

        impl CandidateStore for ResetOnFirstQuery {
            fn query(&self, ranges: &DialRanges, exclude: &AHashSet<TrackId>) -> Result<Vec<Track>> {
                if !self.fired.swap(true, Ordering::SeqCst) {
                    if let Some(session) = self.session.lock().clone() {
                        session.reset();
                    }
                }
                self.tracks.query(ranges, exclude)
            }
        }

        let store = Arc::new(ResetOnFirstQuery {
            tracks: VecStore(vec![track(1, 5)]),
            session: Mutex::new(None),
            fired: AtomicBool::new(false),
        });
        let session = Arc::new(Session::new(store.clone()));
        *store.session.lock() = Some(session.clone());

        let err = session.select_next(&Dials::default()).unwrap_err();
        assert!(matches!(err, Error::Superseded));
        assert_eq!(session.snapshot().seen_count, 0);

        // The next attempt is clean and lands normally.
        let selection = session.select_next(&Dials::default()).unwrap();
        assert!(matches!(selection, Selection::Selected { .. }));
    }

    #[test]
    fn test_playlist_is_idempotent_and_survives_reset() {
        let session = Session::new(Arc::new(VecStore(vec![track(1, 5)])));
        assert!(!session.save_current());

        session.select_next(&Dials::default()).unwrap();
        assert!(session.save_current());
        assert!(!session.save_current());
        assert!(session.is_saved(&TrackId::from(1u64)));

        session.reset();
        assert_eq!(session.playlist().len(), 1);
        assert_eq!(session.snapshot().seen_count, 0);
    }

    #[test]
    fn test_snapshot_after_reset() {
        let session = Session::new(Arc::new(VecStore(vec![track(1, 5), track(2, 6)])));
        session.select_next(&Dials::default()).unwrap();
        session.reset();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.current, None);
        assert_eq!(snapshot.pool_size, 0);
        assert_eq!(snapshot.seen_count, 0);
        assert!(!snapshot.can_go_back);
        assert!(snapshot.can_go_forward);
    }

    #[test]
    fn test_forward_replays_before_fetching() {
        let session = Session::new(Arc::new(VecStore(vec![track(1, 5), track(2, 5)])));
        session.select_next(&Dials::default()).unwrap();
        session.select_next(&Dials::default()).unwrap();

        let back = session.navigate_back().unwrap();
        let forward = session.navigate_forward().unwrap();
        match forward {
            Forward::History(t) => assert_ne!(t.id, back.id),
            Forward::New(_) => panic!("expected a history replay"),
        }
    }
}
