use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_millis, millis_to_datetime};
use crate::error::{GazeError, GazeResult};

/// Naive layouts accepted after RFC 3339 fails; interpreted as UTC.
const NAIVE_DATETIME_PATTERNS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Timestamp value as delivered by the data-access layer.
///
/// Numbers are epoch milliseconds (wall clock) or tracker milliseconds,
/// depending on the field that carries them. Text is either ISO-8601 or a
/// decimal number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTime {
    Millis(f64),
    Text(String),
}

impl RawTime {
    /// Normalizes to a wall-clock date/time.
    pub fn to_datetime(&self) -> GazeResult<DateTime<Utc>> {
        match self {
            Self::Millis(millis) => millis_to_datetime(*millis),
            Self::Text(text) => parse_datetime_text(text),
        }
    }

    /// Normalizes to milliseconds.
    ///
    /// Date text becomes epoch milliseconds, so the result is only comparable
    /// against values of the same clock.
    pub fn to_millis(&self) -> GazeResult<f64> {
        match self {
            Self::Millis(millis) if millis.is_finite() => Ok(*millis),
            Self::Millis(millis) => Err(GazeError::InvalidTimestamp {
                value: millis.to_string(),
            }),
            Self::Text(text) => {
                let trimmed = text.trim();
                match trimmed.parse::<f64>() {
                    Ok(value) if value.is_finite() => Ok(value),
                    _ => parse_datetime_text(trimmed).map(datetime_to_millis),
                }
            }
        }
    }
}

impl From<DateTime<Utc>> for RawTime {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Text(value.to_rfc3339())
    }
}

fn parse_datetime_text(text: &str) -> GazeResult<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for pattern in NAIVE_DATETIME_PATTERNS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Ok(naive.and_utc());
        }
    }
    Err(GazeError::InvalidTimestamp {
        value: text.to_owned(),
    })
}

/// Raw tracker timestamp record with both clocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGazeTimestamp {
    /// Monotonic tracker clock, milliseconds since recording start.
    #[serde(rename = "RecordingTimestamp", alias = "recording")]
    pub recording: RawTime,
    /// Wall clock of the recording machine.
    #[serde(rename = "LocalTimeStamp", alias = "local")]
    pub local: RawTime,
}

impl RawGazeTimestamp {
    pub fn normalize(&self) -> GazeResult<GazeTimestamp> {
        Ok(GazeTimestamp {
            tracker_ms: self.recording.to_millis()?,
            local: self.local.to_datetime()?,
        })
    }
}

/// Normalized tracker timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeTimestamp {
    pub tracker_ms: f64,
    pub local: DateTime<Utc>,
}

impl GazeTimestamp {
    #[must_use]
    pub fn new(tracker_ms: f64, local: DateTime<Utc>) -> Self {
        Self { tracker_ms, local }
    }
}

/// Milliseconds elapsed from `start` to `time`; negative before `start`.
#[must_use]
pub fn rebase_millis(time: DateTime<Utc>, start: DateTime<Utc>) -> f64 {
    datetime_to_millis(time) - datetime_to_millis(start)
}

/// Fails with the index of the first sample whose key decreases.
pub(crate) fn ensure_ascending<T, K, F>(items: &[T], key: F) -> GazeResult<()>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    for (index, pair) in items.windows(2).enumerate() {
        if key(&pair[1]) < key(&pair[0]) {
            return Err(GazeError::UnorderedTimestamps { index: index + 1 });
        }
    }
    Ok(())
}
