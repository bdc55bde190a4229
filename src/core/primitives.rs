use chrono::{DateTime, Utc};

use crate::error::{GazeError, GazeResult};

/// Epoch milliseconds including the sub-millisecond fraction.
#[must_use]
pub fn datetime_to_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp() as f64 * 1_000.0 + f64::from(time.timestamp_subsec_nanos()) / 1_000_000.0
}

pub fn millis_to_datetime(millis: f64) -> GazeResult<DateTime<Utc>> {
    let invalid = || GazeError::InvalidTimestamp {
        value: millis.to_string(),
    };
    if !millis.is_finite() {
        return Err(invalid());
    }

    let nanos = (millis * 1_000_000.0).round();
    if nanos > (i64::MAX as f64) || nanos < (i64::MIN as f64) {
        return Err(invalid());
    }
    let nanos = nanos as i64;
    let seconds = nanos.div_euclid(1_000_000_000);
    let subsec = nanos.rem_euclid(1_000_000_000) as u32;
    DateTime::<Utc>::from_timestamp(seconds, subsec).ok_or_else(invalid)
}

/// Degrees folded into `[0, 360)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let folded = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if folded >= 360.0 { 0.0 } else { folded }
}

#[cfg(test)]
mod tests {
    use super::{datetime_to_millis, millis_to_datetime, normalize_angle};

    #[test]
    fn millis_round_trip_keeps_fraction() {
        let time = millis_to_datetime(1_700_000_000_123.5).expect("valid millis");
        assert!((datetime_to_millis(time) - 1_700_000_000_123.5).abs() <= 1e-6);
    }

    #[test]
    fn negative_angles_fold_into_full_turn() {
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(-1e-18), 0.0);
    }
}
