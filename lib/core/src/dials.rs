use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Upper bound of every dial scale. Dials run from 0 to 10 inclusive.
pub const DIAL_MAX: u8 = 10;

/// The seven dials describing both tracks and the listener's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialKey {
    Production,
    Craft,
    Groove,
    SonicRoots,
    Mood,
    Intensity,
    Vibe,
}

impl DialKey {
    pub const COUNT: usize = 7;

    /// All dials in their natural order.
    pub const ALL: [DialKey; DialKey::COUNT] = [
        DialKey::Production,
        DialKey::Craft,
        DialKey::Groove,
        DialKey::SonicRoots,
        DialKey::Mood,
        DialKey::Intensity,
        DialKey::Vibe,
    ];

    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DialKey::Production => "production",
            DialKey::Craft => "craft",
            DialKey::Groove => "groove",
            DialKey::SonicRoots => "sonic_roots",
            DialKey::Mood => "mood",
            DialKey::Intensity => "intensity",
            DialKey::Vibe => "vibe",
        }
    }
}

impl std::fmt::Display for DialKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A full set of dial values, used both as a track profile and as the
/// listener's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dials {
    pub production: u8,
    pub craft: u8,
    pub groove: u8,
    pub sonic_roots: u8,
    pub mood: u8,
    pub intensity: u8,
    pub vibe: u8,
}

impl Dials {
    /// All dials set to the same value.
    #[inline]
    #[must_use]
    pub fn uniform(value: u8) -> Self {
        Self {
            production: value,
            craft: value,
            groove: value,
            sonic_roots: value,
            mood: value,
            intensity: value,
            vibe: value,
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, key: DialKey) -> u8 {
        match key {
            DialKey::Production => self.production,
            DialKey::Craft => self.craft,
            DialKey::Groove => self.groove,
            DialKey::SonicRoots => self.sonic_roots,
            DialKey::Mood => self.mood,
            DialKey::Intensity => self.intensity,
            DialKey::Vibe => self.vibe,
        }
    }

    #[inline]
    pub fn set(&mut self, key: DialKey, value: u8) {
        match key {
            DialKey::Production => self.production = value,
            DialKey::Craft => self.craft = value,
            DialKey::Groove => self.groove = value,
            DialKey::SonicRoots => self.sonic_roots = value,
            DialKey::Mood => self.mood = value,
            DialKey::Intensity => self.intensity = value,
            DialKey::Vibe => self.vibe = value,
        }
    }

    /// A dial pinned to either end of its scale expresses an intentional
    /// boundary preference and is relaxed later than the others.
    #[inline]
    #[must_use]
    pub fn is_extreme(&self, key: DialKey) -> bool {
        let v = self.get(key);
        v == 0 || v == DIAL_MAX
    }

    /// Reject any value above the dial scale.
    pub fn validate(&self) -> Result<()> {
        for key in DialKey::ALL {
            let value = self.get(key);
            if value > DIAL_MAX {
                return Err(Error::InvalidDial {
                    key: key.name(),
                    value,
                });
            }
        }
        Ok(())
    }
}

impl Default for Dials {
    /// The neutral midpoint on every dial.
    fn default() -> Self {
        Self::uniform(5)
    }
}

/// A closed `[min, max]` query interval per dial, always within the scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialRanges {
    ranges: [(u8, u8); DialKey::COUNT],
}

impl DialRanges {
    /// Build the window `[value - tolerance, value + tolerance]` around each
    /// target dial, clamped to the scale.
    #[must_use]
    pub fn around(target: &Dials, tolerances: &[u8; DialKey::COUNT]) -> Self {
        let mut ranges = [(0u8, 0u8); DialKey::COUNT];
        for (i, key) in DialKey::ALL.iter().enumerate() {
            let value = target.get(*key);
            let tolerance = tolerances[i];
            let min = value.saturating_sub(tolerance);
            let max = (value + tolerance).min(DIAL_MAX);
            ranges[i] = (min, max);
        }
        Self { ranges }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, key: DialKey) -> (u8, u8) {
        self.ranges[key as usize]
    }

    /// True if every dial of `dials` falls inside its interval.
    #[must_use]
    pub fn contains(&self, dials: &Dials) -> bool {
        DialKey::ALL.iter().all(|key| {
            let (min, max) = self.get(*key);
            let v = dials.get(*key);
            v >= min && v <= max
        })
    }
}
