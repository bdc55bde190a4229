use tracing::{debug, trace};

use crate::core::timestamp::ensure_ascending;
use crate::core::types::{Fixation, FixationSample, RawFixation, ScrollEvent};
use crate::error::GazeResult;

/// Normalizes raw tracker fixations.
///
/// Tracker-clock values must be non-decreasing in sample order.
pub fn normalize_fixations(raw: &[RawFixation]) -> GazeResult<Vec<FixationSample>> {
    let samples = raw
        .iter()
        .map(FixationSample::from_raw)
        .collect::<GazeResult<Vec<_>>>()?;
    ensure_ascending(&samples, |sample| sample.timestamp.tracker_ms)?;
    debug!(count = samples.len(), "normalized fixation samples");
    Ok(samples)
}

/// Produces one scroll-corrected fixation per sample.
///
/// Both inputs must be ascending by wall-clock timestamp; out-of-order input is
/// rejected rather than re-sorted. A scroll event applies to fixations strictly
/// after its own timestamp, so a fixation tied with a scroll still sees the
/// previous offset.
pub fn scroll_compensate(
    samples: &[FixationSample],
    scrolls: &[ScrollEvent],
) -> GazeResult<Vec<Fixation>> {
    ensure_ascending(samples, |sample| sample.timestamp.local)?;
    ensure_ascending(scrolls, |scroll| scroll.timestamp)?;

    let mut scroll_position = 0.0;
    let mut pending = scrolls.iter().peekable();
    let mut applied = 0_usize;

    let fixations = samples
        .iter()
        .map(|sample| {
            while let Some(scroll) = pending.next_if(|s| s.timestamp < sample.timestamp.local) {
                scroll_position = scroll.position;
                applied += 1;
                trace!(position = scroll_position, "scroll offset advanced");
            }

            Fixation {
                timestamp: sample.timestamp,
                x: sample.x,
                y: sample.y + scroll_position,
                duration: sample.duration,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        fixations = fixations.len(),
        scrolls = scrolls.len(),
        applied_scrolls = applied,
        "scroll-compensated fixations"
    );
    Ok(fixations)
}

/// Mean fixation duration in milliseconds, `0` when empty.
#[must_use]
pub fn average_duration(fixations: &[Fixation]) -> f64 {
    if fixations.is_empty() {
        return 0.0;
    }
    fixations.iter().map(|fix| fix.duration).sum::<f64>() / fixations.len() as f64
}
