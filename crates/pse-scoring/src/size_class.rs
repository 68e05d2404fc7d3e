//! Size band classification
//!
//! Maps a raw-hour estimate onto one of five ordered bands using the
//! category's ascending thresholds.

use std::fmt;

use pse_model::CategoryBands;
use serde::{Deserialize, Serialize};

/// Ordered size labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    /// Extra small
    XS,
    /// Small
    S,
    /// Medium
    M,
    /// Large
    L,
    /// Extra large
    XL,
}

impl SizeClass {
    /// All labels in ascending order
    pub const ALL: [SizeClass; 5] = [Self::XS, Self::S, Self::M, Self::L, Self::XL];

    /// Position in the ascending order
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::XS => 0,
            Self::S => 1,
            Self::M => 2,
            Self::L => 3,
            Self::XL => 4,
        }
    }

    /// Label at a position, saturating at XL
    #[inline]
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Short label
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::XS => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::XL => "XL",
        }
    }

    /// Upper bound of this band
    #[inline]
    #[must_use]
    pub fn upper_bound(self, bands: &CategoryBands) -> f64 {
        bands.thresholds()[self.index()]
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the smallest band whose upper bound holds `base_hours`
///
/// Values above every threshold land in XL. With `adjust_cap` set, anything
/// above Medium is forced down to Medium.
#[must_use]
pub fn pick_size_class(base_hours: f64, bands: &CategoryBands, adjust_cap: bool) -> SizeClass {
    let index = bands
        .thresholds()
        .iter()
        .position(|upper| *upper >= base_hours)
        .unwrap_or(SizeClass::XL.index());

    let index = if adjust_cap {
        index.min(SizeClass::M.index())
    } else {
        index
    };
    SizeClass::from_index(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands() -> CategoryBands {
        CategoryBands::new(4.0, 8.0, 16.0, 32.0, 56.0)
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(pick_size_class(4.0, &bands(), false), SizeClass::XS);
        assert_eq!(pick_size_class(4.01, &bands(), false), SizeClass::S);
        assert_eq!(pick_size_class(16.0, &bands(), false), SizeClass::M);
        assert_eq!(pick_size_class(56.0, &bands(), false), SizeClass::XL);
    }

    #[test]
    fn above_all_bands_is_xl() {
        assert_eq!(pick_size_class(100.0, &bands(), false), SizeClass::XL);
    }

    #[test]
    fn zero_is_xs() {
        assert_eq!(pick_size_class(0.0, &bands(), false), SizeClass::XS);
    }

    #[test]
    fn adjust_cap_forces_medium() {
        assert_eq!(pick_size_class(20.0, &bands(), true), SizeClass::M);
        assert_eq!(pick_size_class(100.0, &bands(), true), SizeClass::M);
        // below the cap nothing changes
        assert_eq!(pick_size_class(5.0, &bands(), true), SizeClass::S);
    }

    #[test]
    fn labels_round_trip_index() {
        for class in SizeClass::ALL {
            assert_eq!(SizeClass::from_index(class.index()), class);
        }
        assert_eq!(SizeClass::from_index(99), SizeClass::XL);
        assert_eq!(SizeClass::L.to_string(), "L");
    }
}
