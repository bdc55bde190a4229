use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::primitives::normalize_angle;
use crate::core::types::{FixationSample, Saccade};

/// How saccade features are obtained from fixation samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaccadeStrategy {
    /// Copy the tracker's amplitude and direction fields verbatim.
    #[default]
    TrackerSupplied,
    /// Recompute from consecutive fixation positions.
    ///
    /// Amplitude is the pixel distance to the previous fixation; the first
    /// sample keeps its tracker fields.
    FromPositions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaccadeConfig {
    #[serde(default)]
    pub strategy: SaccadeStrategy,
}

/// Derives one saccade per fixation sample.
#[must_use]
pub fn extract_saccades(samples: &[FixationSample], strategy: SaccadeStrategy) -> Vec<Saccade> {
    let saccades = match strategy {
        SaccadeStrategy::TrackerSupplied => samples.iter().map(tracker_saccade).collect(),
        SaccadeStrategy::FromPositions => saccades_from_positions(samples),
    };
    debug!(count = samples.len(), ?strategy, "extracted saccades");
    saccades
}

fn tracker_saccade(sample: &FixationSample) -> Saccade {
    Saccade {
        timestamp: sample.timestamp,
        amplitude: sample.saccadic_amplitude,
        absolute_angle: sample.absolute_saccadic_direction,
        relative_angle: sample.relative_saccadic_direction,
    }
}

fn saccades_from_positions(samples: &[FixationSample]) -> Vec<Saccade> {
    let mut saccades = Vec::with_capacity(samples.len());
    let mut previous: Option<&FixationSample> = None;
    let mut previous_angle = 0.0;

    for sample in samples {
        let saccade = match previous {
            Some(prev) => {
                let dx = sample.x - prev.x;
                let dy = sample.y - prev.y;
                // screen y grows downwards; flip so 90 degrees points up
                let absolute_angle = normalize_angle((-dy).atan2(dx).to_degrees());
                let relative_angle = normalize_angle(absolute_angle - previous_angle);
                previous_angle = absolute_angle;
                Saccade {
                    timestamp: sample.timestamp,
                    amplitude: dx.hypot(dy),
                    absolute_angle,
                    relative_angle,
                }
            }
            None => tracker_saccade(sample),
        };
        saccades.push(saccade);
        previous = Some(sample);
    }

    saccades
}

/// Mean saccade amplitude, `0` when empty.
#[must_use]
pub fn average_amplitude(saccades: &[Saccade]) -> f64 {
    if saccades.is_empty() {
        return 0.0;
    }
    saccades.iter().map(|sacc| sacc.amplitude).sum::<f64>() / saccades.len() as f64
}
