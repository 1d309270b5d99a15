//! # dialx Core
//!
//! Core library for the dialx track recommender.
//!
//! This crate provides the matching engine and session state:
//!
//! - [`Dials`] - The seven-dial profile shared by tracks and targets
//! - [`Track`] - A catalog entry with ID and opaque display payload
//! - [`ToleranceSchedule`] - Progressive relaxation of the query window
//! - [`weighted_pick`] - Fit-weighted random draw from a scored pool
//! - [`SessionHistory`] - Shown-track record with navigation cursor
//! - [`Session`] - The orchestrator tying it all together
//!
//! ## Example
//!
//! ```rust
//! use dialx_core::{CandidateStore, Dials, DialRanges, Result, Session, Track, TrackId};
//! use ahash::AHashSet;
//! use std::sync::Arc;
//!
//! // Any range-queryable catalog works; here, a vector scan.
//! struct TinyCatalog(Vec<Track>);
//!
//! impl CandidateStore for TinyCatalog {
//!     fn query(&self, ranges: &DialRanges, exclude: &AHashSet<TrackId>) -> Result<Vec<Track>> {
//!         Ok(self
//!             .0
//!             .iter()
//!             .filter(|t| ranges.contains(&t.dials) && !exclude.contains(&t.id))
//!             .cloned()
//!             .collect())
//!     }
//! }
//!
//! let catalog = TinyCatalog(vec![Track::new(
//!     TrackId::from("t1"),
//!     Dials::uniform(5),
//!     None,
//! )]);
//! let session = Session::new(Arc::new(catalog));
//! let selection = session.select_next(&Dials::uniform(5)).unwrap();
//! ```

pub mod dials;
pub mod error;
pub mod history;
pub mod sampler;
pub mod score;
pub mod session;
pub mod store;
pub mod tolerance;
pub mod track;

pub use dials::{DialKey, DialRanges, Dials, DIAL_MAX};
pub use error::{Error, Result};
pub use history::SessionHistory;
pub use sampler::weighted_pick;
pub use score::{fit_score, score_pool, ScoredTrack, MAX_FIT};
pub use session::{Forward, Selection, Session, SessionConfig, SessionSnapshot};
pub use store::CandidateStore;
pub use tolerance::{ToleranceConfig, ToleranceSchedule};
pub use track::{Track, TrackId};
