use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::directions::{Direction, DirectionConfig, classify_direction};
use crate::core::types::Saccade;
use crate::error::{GazeError, GazeResult};

/// Count of samples below `upper`; `upper == None` is the trailing "rest".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub upper: Option<f64>,
    pub count: usize,
}

/// Counts samples into ascending upper-bound ranges.
///
/// A sample goes into the first range whose bound it is strictly below;
/// samples at or above the last bound go into a trailing range with no upper
/// bound. The result always has `bounds.len() + 1` entries.
pub fn count_in_ranges<T>(
    items: &[T],
    value: impl Fn(&T) -> f64,
    bounds: &[f64],
) -> GazeResult<Vec<ValueRange>> {
    validate_bounds(bounds)?;

    let mut ranges: Vec<ValueRange> = bounds
        .iter()
        .map(|&upper| ValueRange {
            upper: Some(upper),
            count: 0,
        })
        .collect();
    ranges.push(ValueRange {
        upper: None,
        count: 0,
    });

    for item in items {
        let sample = value(item);
        let slot = bounds.partition_point(|&upper| sample >= upper);
        ranges[slot].count += 1;
    }

    Ok(ranges)
}

fn validate_bounds(bounds: &[f64]) -> GazeResult<()> {
    if bounds.iter().any(|bound| !bound.is_finite()) {
        return Err(GazeError::InvalidData(
            "range bounds must be finite".to_owned(),
        ));
    }
    if bounds.windows(2).any(|pair| pair[1] <= pair[0]) {
        return Err(GazeError::InvalidData(
            "range bounds must be strictly ascending".to_owned(),
        ));
    }
    Ok(())
}

/// Amplitude ranges split by direction cone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionRanges {
    pub forward: Vec<ValueRange>,
    pub backward: Vec<ValueRange>,
}

/// Counts forward and backward saccades into amplitude ranges.
///
/// Saccades in the `Other` cone are not counted.
pub fn amplitude_ranges(
    saccades: &[Saccade],
    bounds: &[f64],
    config: &DirectionConfig,
) -> GazeResult<DirectionRanges> {
    let (forward, backward): (Vec<Saccade>, Vec<Saccade>) = saccades
        .iter()
        .copied()
        .filter(|sacc| classify_direction(sacc.absolute_angle, config) != Direction::Other)
        .partition(|sacc| classify_direction(sacc.absolute_angle, config) == Direction::Forward);

    debug!(
        forward = forward.len(),
        backward = backward.len(),
        "split saccade amplitudes by direction"
    );

    Ok(DirectionRanges {
        forward: count_in_ranges(&forward, |sacc| sacc.amplitude, bounds)?,
        backward: count_in_ranges(&backward, |sacc| sacc.amplitude, bounds)?,
    })
}
