//! Size-based highlight classes for file names

use termcolor::{Color, ColorSpec};

use crate::settings::Thresholds;

use super::utils::megabytes;

/// Display category of a file, derived from its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightClass {
    /// Zero bytes, whatever the thresholds say.
    Empty,
    /// At or below the minor threshold.
    Minor,
    /// At or below the medium threshold.
    Medium,
    /// Strictly above the above-average threshold.
    AboveAverage,
    /// Strictly above the max threshold.
    Max,
}

impl HighlightClass {
    /// Place a file of `bytes` on the threshold ladder.
    ///
    /// The rungs are tried in a fixed order and the first hit wins. A size
    /// above `medium` that is not above `above_average` gets no class, and
    /// `Max` is only reachable when `max < above_average`. Thresholds are
    /// not required to be ascending.
    pub fn classify(bytes: u64, thresholds: &Thresholds) -> Option<Self> {
        if bytes == 0 {
            return Some(HighlightClass::Empty);
        }

        let mb = megabytes(bytes);
        if mb <= thresholds.minor as f64 {
            Some(HighlightClass::Minor)
        } else if mb <= thresholds.medium as f64 {
            Some(HighlightClass::Medium)
        } else if mb > thresholds.above_average as f64 {
            Some(HighlightClass::AboveAverage)
        } else if mb > thresholds.max as f64 {
            Some(HighlightClass::Max)
        } else {
            None
        }
    }

    pub fn color_spec(self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self {
            HighlightClass::Empty => spec.set_fg(Some(Color::White)),
            HighlightClass::Minor => spec.set_fg(Some(Color::Green)),
            HighlightClass::Medium => spec.set_fg(Some(Color::Yellow)),
            HighlightClass::AboveAverage => spec.set_fg(Some(Color::Red)).set_intense(true),
            HighlightClass::Max => spec.set_fg(Some(Color::Red)),
        };
        spec
    }
}
