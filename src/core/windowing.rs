use serde::{Deserialize, Serialize};

use crate::core::types::Fixation;

/// Inclusive window of trial-relative elapsed time, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    /// Builds a range; reversed bounds are swapped.
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    #[must_use]
    pub fn contains(self, elapsed: f64) -> bool {
        elapsed >= self.start && elapsed <= self.end
    }
}

/// `true` when no range is set or `elapsed` lies inside it.
#[must_use]
pub fn in_optional_range(range: Option<TimeRange>, elapsed: f64) -> bool {
    range.is_none_or(|range| range.contains(elapsed))
}

/// Tracker-clock milliseconds elapsed since the first fixation, per fixation.
#[must_use]
pub fn elapsed_millis(fixations: &[Fixation]) -> Vec<f64> {
    let Some(first) = fixations.first() else {
        return Vec::new();
    };
    let start = first.timestamp.tracker_ms;
    fixations
        .iter()
        .map(|fix| fix.timestamp.tracker_ms - start)
        .collect()
}
