use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Range bounds at or above this value label the catch-all range.
pub const REST_RANGE_THRESHOLD: f64 = 10_000.0;

/// Unit suffix of a magnitude range label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeUnit {
    Millis,
    Degrees,
}

impl RangeUnit {
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Millis => " ms",
            Self::Degrees => "\u{b0}",
        }
    }
}

/// Formats whole seconds as `MM:SS`, or `HH:MM:SS` once an hour is reached.
///
/// The input is rounded to the nearest second.
#[must_use]
pub fn sec_to_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "00:00".to_owned();
    }
    clock(seconds.round() as u64)
}

/// Formats milliseconds as `MM:SS[.fff]` with `precision` fractional digits
/// (clamped to `0..=3`, truncated, not rounded).
///
/// The fraction is a decimal part of the second, not the raw millisecond
/// remainder: `65_456 ms` at precision 1 is `01:05.4`, and `5 ms` at
/// precision 3 is `00:00.005`.
#[must_use]
pub fn ms_to_time(millis: f64, precision: u8) -> String {
    let precision = precision.min(3);
    let millis = if millis.is_finite() && millis > 0.0 {
        millis
    } else {
        0.0
    };

    let whole_seconds = (millis / 1_000.0).floor();
    let mut label = clock(whole_seconds as u64);
    if precision > 0 {
        let fraction = millis - whole_seconds * 1_000.0;
        let digits = (fraction / 10_f64.powi(3 - i32::from(precision))).floor() as u64;
        label.push_str(&format!(".{digits:0width$}", width = usize::from(precision)));
    }
    label
}

fn clock(total_seconds: u64) -> String {
    let seconds = total_seconds % 60;
    let minutes = (total_seconds / 60) % 60;
    let hours = total_seconds / 3_600;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[must_use]
pub fn angle_label(angle: f64) -> String {
    format!("{angle}\u{b0}")
}

/// `"< {upper}{unit}"`, or `"rest"` for the open-ended range.
#[must_use]
pub fn range_label(upper: Option<f64>, unit: RangeUnit) -> String {
    match upper {
        Some(upper) if upper < REST_RANGE_THRESHOLD => format!("< {upper}{}", unit.suffix()),
        _ => "rest".to_owned(),
    }
}

/// Label of the `index`-th tenth of a trial: `10%`, `20%`, ...
#[must_use]
pub fn percent_label(index: usize) -> String {
    format!("{}%", (index + 1) * 10)
}

/// `dd.mm.yyyy HH:MM:SS` in UTC.
#[must_use]
pub fn date_label(time: DateTime<Utc>) -> String {
    time.format("%d.%m.%Y %H:%M:%S").to_string()
}

/// Time labels closing each bin of a series: `sec_to_time((i + 1) * item_duration)`.
#[must_use]
pub fn bin_time_labels(len: usize, item_duration_secs: f64) -> Vec<String> {
    (1..=len)
        .map(|ordinal| sec_to_time(ordinal as f64 * item_duration_secs))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::clock;

    #[test]
    fn clock_switches_to_hours() {
        assert_eq!(clock(59), "00:59");
        assert_eq!(clock(3_599), "59:59");
        assert_eq!(clock(3_600), "01:00:00");
    }
}
