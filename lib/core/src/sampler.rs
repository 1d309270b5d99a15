//! Weighted-random pick over a scored pool.
//!
//! Each track gets weight `1 / (fit + 1)`: a perfect match weighs 1.0,
//! fit 1 weighs 0.5, and so on, strictly decreasing as fit worsens.

use crate::score::ScoredTrack;
use rand::Rng;

/// Draw one track from the pool, better fits being proportionally more
/// likely. A single-element pool is returned without consuming randomness
/// so that seeded tests stay aligned. Returns `None` on an empty pool.
pub fn weighted_pick<'a, R: Rng + ?Sized>(
    rng: &mut R,
    pool: &'a [ScoredTrack],
) -> Option<&'a ScoredTrack> {
    if pool.is_empty() {
        return None;
    }
    if pool.len() == 1 {
        return pool.first();
    }

    let weights: Vec<f64> = pool.iter().map(|s| 1.0 / (s.fit as f64 + 1.0)).collect();
    let total: f64 = weights.iter().sum();

    let mut remaining = rng.random_range(0.0..total);
    for (scored, weight) in pool.iter().zip(&weights) {
        remaining -= weight;
        if remaining <= 0.0 {
            return Some(scored);
        }
    }

    // Floating-point slack can leave a sliver of the interval uncovered.
    pool.last()
}
