use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::timestamp::ensure_ascending;
use crate::error::{GazeError, GazeResult};

/// Upper bound on the number of bins a single call may produce.
pub const MAX_TIME_BINS: usize = 10_000;

/// Time window with the reduced value of its items.
///
/// A sample lands in the first bin whose `end` it does not exceed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBin<V> {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    pub value: V,
}

/// Result of equal-width temporal binning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalBins<V> {
    pub bins: Vec<TimeBin<V>>,
    /// Width actually used, in the timestamp unit (milliseconds).
    pub bin_width_ms: f64,
}

impl<V> TemporalBins<V> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Bin width in seconds, as used for time-axis labels.
    #[must_use]
    pub fn item_duration_secs(&self) -> f64 {
        self.bin_width_ms / 1_000.0
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.bins.iter().map(|bin| &bin.value)
    }

    #[must_use]
    pub fn into_values(self) -> Vec<V> {
        self.bins.into_iter().map(|bin| bin.value).collect()
    }
}

/// Splits an ascending sequence into equal-width time bins and reduces each.
///
/// The bin count is `round(span / requested)` (at least one) and the width
/// actually used is `span / count + 1` millisecond, so the last sample never
/// lands on an upper edge and opens an empty trailing bin. Bins between
/// samples are closed with an empty slice, which the reducer must accept.
///
/// Fails on empty input, a non-positive width, descending timestamps, or a
/// width so small the span would need more than [`MAX_TIME_BINS`] bins.
pub fn bin_by_time<T, V, K, F>(
    items: &[T],
    timestamp_ms: K,
    requested_width_secs: f64,
    mut reduce: F,
) -> GazeResult<TemporalBins<V>>
where
    K: Fn(&T) -> f64,
    F: FnMut(&[T]) -> V,
{
    if items.is_empty() {
        return Err(GazeError::EmptyInput(
            "temporal binning requires at least one sample",
        ));
    }
    if !requested_width_secs.is_finite() || requested_width_secs <= 0.0 {
        return Err(GazeError::InvalidData(
            "requested bin width must be finite and > 0".to_owned(),
        ));
    }
    ensure_ascending(items, &timestamp_ms)?;

    let first = timestamp_ms(&items[0]);
    let last = timestamp_ms(&items[items.len() - 1]);
    if !first.is_finite() || !last.is_finite() {
        return Err(GazeError::InvalidData(
            "bin timestamps must be finite".to_owned(),
        ));
    }

    let span = last - first;
    let requested_ms = requested_width_secs * 1_000.0;
    let raw_count = (span / requested_ms).round();
    if raw_count > MAX_TIME_BINS as f64 {
        return Err(GazeError::InvalidData(format!(
            "bin width {requested_width_secs}s needs more than {MAX_TIME_BINS} bins for {span}ms"
        )));
    }
    let bin_count = (raw_count as usize).max(1);
    let bin_width_ms = span / bin_count as f64 + 1.0;

    let mut bins: Vec<TimeBin<V>> = Vec::new();
    let mut bin_start_index = 0;
    let edge = |index: usize| first + bin_width_ms * index as f64;

    for (index, item) in items.iter().enumerate() {
        let time = timestamp_ms(item);
        while time > edge(bins.len() + 1) {
            let slice = &items[bin_start_index..index];
            let bin_index = bins.len();
            trace!(bin_index, count = slice.len(), "close time bin");
            bins.push(TimeBin {
                start: edge(bin_index),
                end: edge(bin_index + 1),
                count: slice.len(),
                value: reduce(slice),
            });
            bin_start_index = index;
        }
    }

    let slice = &items[bin_start_index..];
    let bin_index = bins.len();
    bins.push(TimeBin {
        start: edge(bin_index),
        end: edge(bin_index + 1),
        count: slice.len(),
        value: reduce(slice),
    });

    debug!(
        items = items.len(),
        bins = bins.len(),
        requested_width_secs,
        bin_width_ms,
        "binned samples by time"
    );
    Ok(TemporalBins { bins, bin_width_ms })
}

/// Arithmetic mean of `value` over `items`, `0` for an empty bin.
pub fn mean_of<T>(items: &[T], value: impl Fn(&T) -> f64) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    items.iter().map(value).sum::<f64>() / items.len() as f64
}
