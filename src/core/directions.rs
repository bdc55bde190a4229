use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::temporal_bins::bin_by_time;
use crate::core::types::Saccade;
use crate::error::{GazeError, GazeResult};

/// Saccade direction cone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
    Other,
}

/// Cone thresholds and angular histogram layout, in degrees.
///
/// Forward is `(forward_lower, 360) ∪ [0, forward_upper)`, backward is the
/// open interval `(backward_lower, backward_upper)`. Angles on a threshold
/// fall into `Other`, except `0` which is forward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionConfig {
    pub forward_upper: f64,
    pub forward_lower: f64,
    pub backward_lower: f64,
    pub backward_upper: f64,
    /// Number of equal compass bins of the angular histogram.
    pub angle_bins: usize,
    /// Bins moved from the back to the front after reversing for display.
    pub display_rotation: usize,
}

impl Default for DirectionConfig {
    fn default() -> Self {
        Self {
            forward_upper: 45.0,
            forward_lower: 315.0,
            backward_lower: 135.0,
            backward_upper: 225.0,
            angle_bins: 8,
            display_rotation: 3,
        }
    }
}

impl DirectionConfig {
    pub fn validate(self) -> GazeResult<Self> {
        for (value, name) in [
            (self.forward_upper, "forward_upper"),
            (self.forward_lower, "forward_lower"),
            (self.backward_lower, "backward_lower"),
            (self.backward_upper, "backward_upper"),
        ] {
            if !value.is_finite() || !(0.0..=360.0).contains(&value) {
                return Err(GazeError::InvalidData(format!(
                    "direction threshold `{name}` must be finite and in [0, 360]"
                )));
            }
        }
        if self.backward_lower >= self.backward_upper {
            return Err(GazeError::InvalidData(
                "backward cone must satisfy backward_lower < backward_upper".to_owned(),
            ));
        }
        if self.angle_bins == 0 {
            return Err(GazeError::InvalidData(
                "angle_bins must be > 0".to_owned(),
            ));
        }
        if self.display_rotation > self.angle_bins {
            return Err(GazeError::InvalidData(
                "display_rotation must not exceed angle_bins".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn angle_bin_width(self) -> f64 {
        360.0 / self.angle_bins as f64
    }
}

/// Classifies an absolute saccade angle into a direction cone.
#[must_use]
pub fn classify_direction(absolute_angle: f64, config: &DirectionConfig) -> Direction {
    let angle = absolute_angle;
    if (angle > config.forward_lower && angle < 360.0)
        || (angle >= 0.0 && angle < config.forward_upper)
    {
        Direction::Forward
    } else if angle > config.backward_lower && angle < config.backward_upper {
        Direction::Backward
    } else {
        Direction::Other
    }
}

/// Direction counts per time bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionSeries {
    pub forward: Vec<usize>,
    pub backward: Vec<usize>,
    pub other: Vec<usize>,
    /// Bin width in seconds.
    pub item_duration: f64,
}

impl DirectionSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// Counts forward/backward/other saccades in equal-width time bins.
pub fn direction_series(
    saccades: &[Saccade],
    requested_width_secs: f64,
    config: &DirectionConfig,
) -> GazeResult<DirectionSeries> {
    let bins = bin_by_time(
        saccades,
        |sacc| sacc.timestamp.tracker_ms,
        requested_width_secs,
        |slice| {
            let mut counts = [0_usize; 3];
            for sacc in slice {
                let slot = match classify_direction(sacc.absolute_angle, config) {
                    Direction::Forward => 0,
                    Direction::Backward => 1,
                    Direction::Other => 2,
                };
                counts[slot] += 1;
            }
            counts
        },
    )?;

    let item_duration = bins.item_duration_secs();
    let counts = bins.into_values();
    Ok(DirectionSeries {
        forward: counts.iter().map(|c| c[0]).collect(),
        backward: counts.iter().map(|c| c[1]).collect(),
        other: counts.iter().map(|c| c[2]).collect(),
        item_duration,
    })
}

/// One compass bin centered on `angle`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleBin {
    pub angle: f64,
    pub count: usize,
}

impl AngleBin {
    #[must_use]
    pub fn label(self) -> String {
        format!("{}\u{b0}", self.angle)
    }
}

/// N-way compass histogram in ascending angle order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleHistogram {
    pub bin_width: f64,
    pub bins: Vec<AngleBin>,
    display_rotation: usize,
}

impl AngleHistogram {
    /// Bins reordered for a radar plot: reversed so angles grow
    /// counter-clockwise, then the last `display_rotation` bins moved to the
    /// front so 0 degrees sits on the right. Counts are untouched.
    #[must_use]
    pub fn display_order(&self) -> Vec<AngleBin> {
        let mut ordered = self.bins.clone();
        ordered.reverse();
        let rotation = self.display_rotation.min(ordered.len());
        ordered.rotate_right(rotation);
        ordered
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Counts keyed by bin angle, in ascending angle order.
    #[must_use]
    pub fn to_angle_map(&self) -> IndexMap<OrderedFloat<f64>, f64> {
        self.bins
            .iter()
            .map(|bin| (OrderedFloat(bin.angle), bin.count as f64))
            .collect()
    }
}

/// Buckets saccades by absolute angle into `config.angle_bins` compass bins.
///
/// The bin index is `round(angle / width) mod N`, so each bin is centered on
/// its label. Non-finite angles are skipped.
pub fn angle_histogram(
    saccades: &[Saccade],
    config: &DirectionConfig,
) -> GazeResult<AngleHistogram> {
    let config = config.validate()?;
    let bin_width = config.angle_bin_width();
    let bin_total = config.angle_bins as i64;

    let mut bins: Vec<AngleBin> = (0..config.angle_bins)
        .map(|index| AngleBin {
            angle: index as f64 * bin_width,
            count: 0,
        })
        .collect();

    let mut skipped = 0_usize;
    for sacc in saccades {
        if !sacc.absolute_angle.is_finite() {
            skipped += 1;
            continue;
        }
        let index = ((sacc.absolute_angle / bin_width).round() as i64).rem_euclid(bin_total);
        bins[index as usize].count += 1;
    }

    if skipped > 0 {
        warn!(skipped, "skipped saccades with non-finite angle");
    }
    debug!(
        saccades = saccades.len(),
        bins = bins.len(),
        "built angular histogram"
    );

    Ok(AngleHistogram {
        bin_width,
        bins,
        display_rotation: config.display_rotation,
    })
}

#[cfg(test)]
mod tests {
    use super::{AngleBin, AngleHistogram};

    #[test]
    fn display_order_reverses_then_rotates() {
        let histogram = AngleHistogram {
            bin_width: 45.0,
            bins: (0..8)
                .map(|i| AngleBin {
                    angle: f64::from(i) * 45.0,
                    count: i as usize,
                })
                .collect(),
            display_rotation: 3,
        };

        let angles: Vec<f64> = histogram
            .display_order()
            .iter()
            .map(|bin| bin.angle)
            .collect();
        assert_eq!(
            angles,
            vec![90.0, 45.0, 0.0, 315.0, 270.0, 225.0, 180.0, 135.0]
        );
    }
}
