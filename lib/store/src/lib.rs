//! # dialx Store
//!
//! In-memory [`CandidateStore`](dialx_core::CandidateStore) implementation
//! for the dialx track recommender: a dial-indexed catalog with range
//! queries, id exclusion, and JSON catalog loading.

pub mod memory;

pub use memory::MemoryStore;
