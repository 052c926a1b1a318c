//! Slider values clamped to a fixed integer range.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer slider value that always lies in `MIN..=MAX`.
///
/// Out-of-range input is clamped on construction and on deserialization,
/// so a stored level can never leave its declared range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Level<const MIN: u8, const MAX: u8>(u8);

/// Canvas spoofing strength, 1 (subtle) to 5 (aggressive).
pub type SpoofLevel = Level<1, 5>;

/// Noise amount, 0 (off) to 5.
pub type NoiseLevel = Level<0, 5>;

impl<const MIN: u8, const MAX: u8> Level<MIN, MAX> {
    /// Creates a level, clamping `value` into range.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(i64::from(MIN), i64::from(MAX)) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl<const MIN: u8, const MAX: u8> Default for Level<MIN, MAX> {
    fn default() -> Self {
        Self(MIN)
    }
}

impl<const MIN: u8, const MAX: u8> From<i64> for Level<MIN, MAX> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<const MIN: u8, const MAX: u8> From<Level<MIN, MAX>> for u8 {
    fn from(level: Level<MIN, MAX>) -> Self {
        level.0
    }
}

impl<const MIN: u8, const MAX: u8> fmt::Display for Level<MIN, MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
