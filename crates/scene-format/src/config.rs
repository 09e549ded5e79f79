//! Tessellation settings shared by every shape in a scene.

use serde::{Deserialize, Serialize};

/// Number of tessellation steps per parametric axis.
///
/// Always within `[Divisions::MIN, Divisions::MAX]`; out-of-range requests
/// are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub struct Divisions(usize);

impl Divisions {
    pub const MIN: usize = 4;
    pub const MAX: usize = 254;
    pub const DEFAULT: usize = 32;
    /// Increment used by [`Divisions::increase`] and [`Divisions::decrease`].
    pub const STEP: usize = 2;

    pub fn new(divisions: usize) -> Self {
        Self(divisions.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// One step finer, saturating at [`Divisions::MAX`].
    pub fn increase(self) -> Self {
        Self::new(self.0.saturating_add(Self::STEP))
    }

    /// One step coarser, saturating at [`Divisions::MIN`].
    pub fn decrease(self) -> Self {
        Self::new(self.0.saturating_sub(Self::STEP))
    }
}

impl Default for Divisions {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<usize> for Divisions {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

impl From<Divisions> for usize {
    fn from(value: Divisions) -> Self {
        value.0
    }
}

/// Configuration applied when turning raw control grids into a scene.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TessellationConfig {
    pub divisions: Divisions,
}

impl TessellationConfig {
    pub fn with_divisions(divisions: usize) -> Self {
        Self {
            divisions: Divisions::new(divisions),
        }
    }

    /// Lowest supported density.
    pub fn coarse() -> Self {
        Self::with_divisions(Divisions::MIN)
    }

    /// Highest supported density.
    pub fn fine() -> Self {
        Self::with_divisions(Divisions::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_32() {
        assert_eq!(Divisions::default().get(), 32);
        assert_eq!(TessellationConfig::default().divisions.get(), 32);
    }

    #[test]
    fn test_clamped_to_range() {
        assert_eq!(Divisions::new(0).get(), 4);
        assert_eq!(Divisions::new(1000).get(), 254);
        assert_eq!(Divisions::new(17).get(), 17);
    }

    #[test]
    fn test_step_saturates() {
        assert_eq!(Divisions::new(32).increase().get(), 34);
        assert_eq!(Divisions::new(32).decrease().get(), 30);
        assert_eq!(Divisions::new(254).increase().get(), 254);
        assert_eq!(Divisions::new(4).decrease().get(), 4);
        assert_eq!(Divisions::new(5).decrease().get(), 4);
    }

    #[test]
    fn test_presets() {
        assert_eq!(TessellationConfig::coarse().divisions.get(), Divisions::MIN);
        assert_eq!(TessellationConfig::fine().divisions.get(), Divisions::MAX);
    }
}
