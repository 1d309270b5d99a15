//! Progressive tolerance relaxation for dial range queries.
//!
//! A selection starts with a tight window of `base` around every target
//! dial. While the store keeps coming back empty, the window is widened
//! one dial per step, non-extreme dials first: a dial pinned to 0 or 10
//! is an intentional boundary preference and stays tight longer.

use crate::dials::{DialKey, DialRanges, Dials};
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy)]
pub struct ToleranceConfig {
    /// Starting tolerance for every dial.
    pub base: u8,
    /// Widening stops once the level counter passes this.
    pub max: u8,
    /// Extreme dials sit out the end-of-pass bulk raise until the level
    /// counter passes this. Tuning constant, not load-bearing.
    pub extreme_hold: u8,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            base: 2,
            max: 5,
            extreme_hold: 3,
        }
    }
}

/// Mutable widening state for one selection attempt.
///
/// `widen` advances one step; `ranges` yields the query window to try
/// next. Tolerances only ever grow within an attempt, and the effective
/// intervals stay clamped to the dial scale.
pub struct ToleranceSchedule {
    target: Dials,
    config: ToleranceConfig,
    tolerances: [u8; DialKey::COUNT],
    priority: SmallVec<[DialKey; DialKey::COUNT]>,
    level: u8,
    next: usize,
}

impl ToleranceSchedule {
    #[must_use]
    pub fn new(target: &Dials, config: ToleranceConfig) -> Self {
        let mut priority: SmallVec<[DialKey; DialKey::COUNT]> = SmallVec::new();
        priority.extend(DialKey::ALL.iter().copied().filter(|k| !target.is_extreme(*k)));
        priority.extend(DialKey::ALL.iter().copied().filter(|k| target.is_extreme(*k)));

        Self {
            target: *target,
            config,
            tolerances: [config.base; DialKey::COUNT],
            priority,
            level: config.base,
            next: 0,
        }
    }

    /// The query window for the current tolerances.
    #[must_use]
    pub fn ranges(&self) -> DialRanges {
        DialRanges::around(&self.target, &self.tolerances)
    }

    /// Widen one dial in priority order. Completing a full pass bumps the
    /// level counter and raises every lagging dial to it, extreme dials
    /// excepted while the hold lasts. Returns false once the level has
    /// passed the maximum, meaning the schedule is spent.
    pub fn widen(&mut self) -> bool {
        if self.level > self.config.max {
            return false;
        }

        let key = self.priority[self.next];
        self.tolerances[key as usize] = self.level + 1;
        self.next += 1;

        if self.next >= self.priority.len() {
            self.next = 0;
            self.level += 1;
            for &key in &self.priority {
                if !self.target.is_extreme(key) || self.level > self.config.extreme_hold {
                    self.tolerances[key as usize] = self.level;
                }
            }
        }

        true
    }

    /// The widest per-dial tolerance currently in effect.
    #[must_use]
    pub fn tolerance_used(&self) -> u8 {
        self.tolerances.iter().copied().max().unwrap_or(self.config.base)
    }

    #[inline]
    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[inline]
    #[must_use]
    pub fn tolerance(&self, key: DialKey) -> u8 {
        self.tolerances[key as usize]
    }

    #[cfg(test)]
    fn priority(&self) -> &[DialKey] {
        &self.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dials::DIAL_MAX;

    #[test]
    fn test_priority_puts_extreme_dials_last() {
        let mut target = Dials::uniform(5);
        target.craft = 10;
        target.mood = 0;

        let schedule = ToleranceSchedule::new(&target, ToleranceConfig::default());
        assert_eq!(
            schedule.priority(),
            [
                DialKey::Production,
                DialKey::Groove,
                DialKey::SonicRoots,
                DialKey::Intensity,
                DialKey::Vibe,
                DialKey::Craft,
                DialKey::Mood,
            ]
        );
    }

    #[test]
    fn test_starts_at_base_everywhere() {
        let schedule = ToleranceSchedule::new(&Dials::uniform(5), ToleranceConfig::default());
        for key in DialKey::ALL {
            assert_eq!(schedule.tolerance(key), 2);
        }
        assert_eq!(schedule.tolerance_used(), 2);
        assert_eq!(schedule.ranges().get(DialKey::Groove), (3, 7));
    }

    #[test]
    fn test_extreme_dials_widen_last_within_a_pass() {
        let mut target = Dials::uniform(5);
        target.vibe = 10;

        let mut schedule = ToleranceSchedule::new(&target, ToleranceConfig::default());
        for _ in 0..DialKey::COUNT - 1 {
            assert!(schedule.widen());
        }
        // Every non-extreme dial has been widened; the pinned dial has not.
        assert_eq!(schedule.tolerance(DialKey::Production), 3);
        assert_eq!(schedule.tolerance(DialKey::Intensity), 3);
        assert_eq!(schedule.tolerance(DialKey::Vibe), 2);

        assert!(schedule.widen());
        assert_eq!(schedule.tolerance(DialKey::Vibe), 3);
    }

    #[test]
    fn test_tolerances_never_decrease() {
        let mut target = Dials::uniform(4);
        target.production = 0;
        target.craft = 10;

        let mut schedule = ToleranceSchedule::new(&target, ToleranceConfig::default());
        let mut previous = [0u8; DialKey::COUNT];
        for (i, key) in DialKey::ALL.iter().enumerate() {
            previous[i] = schedule.tolerance(*key);
        }

        while schedule.widen() {
            for (i, key) in DialKey::ALL.iter().enumerate() {
                let now = schedule.tolerance(*key);
                assert!(now >= previous[i], "{} shrank: {} -> {}", key, previous[i], now);
                previous[i] = now;
            }
        }
    }

    #[test]
    fn test_schedule_is_spent_after_four_full_passes() {
        let mut schedule = ToleranceSchedule::new(&Dials::uniform(5), ToleranceConfig::default());
        let mut steps = 0;
        while schedule.widen() {
            steps += 1;
            assert!(steps < 100, "schedule never spent");
        }
        // Levels 2 through 5 each take one pass over the seven dials.
        assert_eq!(steps, 4 * DialKey::COUNT);
        assert_eq!(schedule.level(), 6);
        assert!(!schedule.widen());
    }

    #[test]
    fn test_intervals_stay_on_scale_at_full_width() {
        let mut target = Dials::uniform(5);
        target.production = 0;
        target.craft = 10;

        let mut schedule = ToleranceSchedule::new(&target, ToleranceConfig::default());
        while schedule.widen() {}

        let ranges = schedule.ranges();
        for key in DialKey::ALL {
            let (min, max) = ranges.get(key);
            assert!(min <= max);
            assert!(max <= DIAL_MAX);
        }
        assert_eq!(ranges.get(DialKey::Production), (0, 6));
        assert_eq!(ranges.get(DialKey::Craft), (4, 10));
    }
}
