//! # dialx
//!
//! An adaptive dial-matching track recommender.
//!
//! dialx serves one track at a time from a catalog, matched against a
//! seven-dial target profile. The query window starts tight and relaxes
//! progressively until something matches; the pick among matches is
//! weighted-random, favoring better fits. A session never repeats a track
//! and supports back/forward navigation through what it has shown.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dialx::prelude::*;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::load_json("catalog.json").unwrap());
//! let session = Session::new(store);
//!
//! let mut target = Dials::default();
//! target.groove = 9;
//! target.intensity = 8;
//!
//! match session.select_next(&target).unwrap() {
//!     Selection::Selected { track, fit, tolerance } => {
//!         println!("{} (fit {}, tolerance {})", track.label(), fit, tolerance);
//!     }
//!     Selection::Exhausted => println!("you have heard every match"),
//!     Selection::NoMatch => println!("nothing fits those dials"),
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `dialx-core` - Matching engine and session state (dials, scoring,
//!   tolerance relaxation, weighted sampling, history, orchestrator)
//! - `dialx-store` - In-memory catalog with range queries and JSON loading

// Re-export core types
pub use dialx_core::{
    fit_score, score_pool, weighted_pick, CandidateStore, DialKey, DialRanges, Dials, Error,
    Forward, Result, ScoredTrack, Selection, Session, SessionConfig, SessionHistory,
    SessionSnapshot, ToleranceConfig, ToleranceSchedule, Track, TrackId, DIAL_MAX, MAX_FIT,
};

// Re-export the store
pub use dialx_store::MemoryStore;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CandidateStore, DialKey, DialRanges, Dials, Error, Forward, MemoryStore, Result,
        Selection, Session, SessionConfig, SessionSnapshot, ToleranceConfig, Track, TrackId,
    };
}
