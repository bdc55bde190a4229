use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::timestamp::{GazeTimestamp, RawGazeTimestamp, RawTime, rebase_millis};
use crate::error::{GazeError, GazeResult};

/// Pixel size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rectangle in recorded-page (source) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Rectangle of the recorded page content.
pub type ContentArea = Bounds;

/// Tracker fixation sample as recorded, saccade fields included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFixation {
    pub timestamp: RawGazeTimestamp,
    pub x: f64,
    pub y: f64,
    pub duration: f64,
    #[serde(default)]
    pub saccadic_amplitude: f64,
    #[serde(default)]
    pub absolute_saccadic_direction: f64,
    #[serde(default)]
    pub relative_saccadic_direction: f64,
}

/// Tracker fixation sample with a normalized timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixationSample {
    pub timestamp: GazeTimestamp,
    pub x: f64,
    pub y: f64,
    pub duration: f64,
    pub saccadic_amplitude: f64,
    pub absolute_saccadic_direction: f64,
    pub relative_saccadic_direction: f64,
}

impl FixationSample {
    pub fn from_raw(raw: &RawFixation) -> GazeResult<Self> {
        Ok(Self {
            timestamp: raw.timestamp.normalize()?,
            x: raw.x,
            y: raw.y,
            duration: raw.duration,
            saccadic_amplitude: raw.saccadic_amplitude,
            absolute_saccadic_direction: raw.absolute_saccadic_direction,
            relative_saccadic_direction: raw.relative_saccadic_direction,
        })
    }
}

/// Scroll-corrected fixation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fixation {
    pub timestamp: GazeTimestamp,
    pub x: f64,
    pub y: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Saccade {
    pub timestamp: GazeTimestamp,
    /// Degrees of visual angle.
    pub amplitude: f64,
    pub absolute_angle: f64,
    pub relative_angle: f64,
}

/// Vertical scroll offset in effect from `timestamp` until the next event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollEvent {
    pub timestamp: DateTime<Utc>,
    pub position: f64,
}

/// Trial metadata record as delivered by the data-access layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrialMeta {
    #[serde(default)]
    pub participant_code: String,
    pub start_time: RawTime,
    pub end_time: RawTime,
    /// Milliseconds; derived from start/end when absent or zero.
    #[serde(default)]
    pub duration: f64,
    pub content_area: ContentArea,
    #[serde(default)]
    pub window_width: f64,
    #[serde(default)]
    pub window_height: f64,
    #[serde(default)]
    pub doc_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialMeta {
    pub participant_code: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_ms: f64,
    pub content_area: ContentArea,
    pub window_width: f64,
    pub window_height: f64,
    pub doc_height: f64,
}

impl TrialMeta {
    pub fn from_raw(raw: &RawTrialMeta) -> GazeResult<Self> {
        let start_time = raw.start_time.to_datetime()?;
        let end_time = raw.end_time.to_datetime()?;
        if end_time < start_time {
            return Err(GazeError::InvalidData(
                "trial end time must not precede start time".to_owned(),
            ));
        }

        let duration_ms = if raw.duration.is_finite() && raw.duration > 0.0 {
            raw.duration
        } else {
            rebase_millis(end_time, start_time)
        };

        Ok(Self {
            participant_code: raw.participant_code.clone(),
            start_time,
            end_time,
            duration_ms,
            content_area: raw.content_area,
            window_width: raw.window_width,
            window_height: raw.window_height,
            doc_height: raw.doc_height,
        })
    }
}
