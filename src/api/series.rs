//! Chart-ready series: labels plus colored datasets, independent of any
//! charting library.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{
    AngleHistogram, DirectionRanges, DirectionSeries, EventChannel, EventChannels, EventValue,
    References, ValueRange,
};
use crate::error::{GazeError, GazeResult};
use crate::render::Color;

use super::label_format::{RangeUnit, angle_label, bin_time_labels, percent_label, range_label};

/// How a chart lays out its datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    StackedBar,
    Radar,
    Scatter,
}

/// How a single dataset is drawn inside its chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Bar,
    Line,
    Area,
    Points,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    /// Seconds since trial start.
    pub x: f64,
    /// One-based lane of the channel.
    pub y: f64,
    pub name: String,
    pub value: EventValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetData {
    /// `NaN` marks a missing entry; it is written to JSON as `null`.
    #[serde(deserialize_with = "values_with_gaps")]
    Values(Vec<f64>),
    Points(Vec<ScatterPoint>),
}

fn values_with_gaps<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Option<f64>>::deserialize(deserializer)?;
    Ok(values.into_iter().map(|value| value.unwrap_or(f64::NAN)).collect())
}

impl DatasetData {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Values(values) => values.len(),
            Self::Points(points) => points.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn as_values(&self) -> Option<&[f64]> {
        match self {
            Self::Values(values) => Some(values),
            Self::Points(_) => None,
        }
    }

    #[must_use]
    pub fn as_points(&self) -> Option<&[ScatterPoint]> {
        match self {
            Self::Points(points) => Some(points),
            Self::Values(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub kind: SeriesKind,
    pub data: DatasetData,
    pub background: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Color>,
}

impl Dataset {
    fn values(label: &str, kind: SeriesKind, values: Vec<f64>, background: Color) -> Self {
        Self {
            label: label.to_owned(),
            kind,
            data: DatasetData::Values(values),
            background,
            border: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSeries {
    #[must_use]
    pub fn dataset(&self, label: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|dataset| dataset.label == label)
    }

    #[must_use]
    pub fn dataset_labels(&self) -> Vec<&str> {
        self.datasets
            .iter()
            .map(|dataset| dataset.label.as_str())
            .collect()
    }

    pub fn to_json_pretty(&self) -> GazeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GazeError::InvalidData(format!("failed to serialize chart series: {e}")))
    }
}

/// Dataset colors shared by every chart builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesPalette {
    pub primary: Color,
    pub primary_light: Color,
    pub success: Color,
    pub danger: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub reference_light: Color,
    pub reference_dark: Color,
}

impl Default for SeriesPalette {
    fn default() -> Self {
        Self {
            primary: Color::hsla(210.0, 0.9, 0.5, 0.7),
            primary_light: Color::hsla(210.0, 0.9, 0.5, 0.2),
            success: Color::hsla(120.0, 1.0, 0.5, 0.3),
            danger: Color::hsla(0.0, 1.0, 0.5, 0.3),
            accent: Color::hsla(30.0, 1.0, 0.5, 0.3),
            accent_alt: Color::hsla(130.0, 1.0, 0.5, 0.3),
            reference_light: Color::hsla(0.0, 0.0, 0.7, 0.3),
            reference_dark: Color::hsla(0.0, 0.0, 0.3, 0.3),
        }
    }
}

impl SeriesPalette {
    pub fn validate(self) -> GazeResult<Self> {
        for color in [
            self.primary,
            self.primary_light,
            self.success,
            self.danger,
            self.accent,
            self.accent_alt,
            self.reference_light,
            self.reference_dark,
        ] {
            color.validate()?;
        }
        Ok(self)
    }

    #[must_use]
    pub fn event_color(&self, channel: EventChannel) -> Color {
        match channel {
            EventChannel::Navigate | EventChannel::Scrolls | EventChannel::Instruction => {
                self.primary
            }
            EventChannel::Data | EventChannel::Drawing => self.success,
            EventChannel::Ui => self.danger,
            EventChannel::Clicks => self.primary_light,
            EventChannel::Sphere => self.accent,
            EventChannel::Cross => self.accent_alt,
        }
    }
}

/// Per-direction reference overlay; any missing direction is not drawn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backward: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<Vec<f64>>,
}

/// Correct and wrong clicks per tenth of the trial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hits {
    pub correct: Vec<f64>,
    pub wrong: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitsReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrong: Option<Vec<f64>>,
}

fn push_reference(
    datasets: &mut Vec<Dataset>,
    label: &str,
    kind: SeriesKind,
    values: Option<&Vec<f64>>,
    color: Color,
) {
    if let Some(values) = values {
        datasets.push(Dataset::values(label, kind, values.clone(), color));
    }
}

fn average_over_time(
    label: &str,
    values: &[f64],
    item_duration_secs: f64,
    reference: &References<Vec<f64>>,
    palette: &SeriesPalette,
) -> ChartSeries {
    let mut datasets = vec![Dataset::values(
        label,
        SeriesKind::Bar,
        values.to_vec(),
        palette.primary,
    )];
    push_reference(
        &mut datasets,
        "reference",
        SeriesKind::Bar,
        reference.means.as_ref(),
        palette.reference_light,
    );

    ChartSeries {
        kind: ChartKind::Bar,
        labels: bin_time_labels(values.len(), item_duration_secs),
        datasets,
    }
}

/// Average fixation duration per time bin, with the reference mean.
#[must_use]
pub fn fix_durations_time(
    values: &[f64],
    item_duration_secs: f64,
    reference: &References<Vec<f64>>,
    palette: &SeriesPalette,
) -> ChartSeries {
    average_over_time(
        "average duration, ms",
        values,
        item_duration_secs,
        reference,
        palette,
    )
}

/// Average saccade amplitude per time bin, with the reference mean.
#[must_use]
pub fn saccade_amplitude_time(
    values: &[f64],
    item_duration_secs: f64,
    reference: &References<Vec<f64>>,
    palette: &SeriesPalette,
) -> ChartSeries {
    average_over_time(
        "average amplitude, deg",
        values,
        item_duration_secs,
        reference,
        palette,
    )
}

fn counts(ranges: &[ValueRange]) -> Vec<f64> {
    ranges.iter().map(|range| range.count as f64).collect()
}

#[must_use]
pub fn fix_durations_range(
    ranges: &[ValueRange],
    reference: &References<Vec<f64>>,
    palette: &SeriesPalette,
) -> ChartSeries {
    let mut datasets = vec![Dataset::values(
        "fixations count",
        SeriesKind::Bar,
        counts(ranges),
        palette.primary,
    )];
    push_reference(
        &mut datasets,
        "reference",
        SeriesKind::Bar,
        reference.means.as_ref(),
        palette.reference_light,
    );

    ChartSeries {
        kind: ChartKind::Bar,
        labels: ranges
            .iter()
            .map(|range| range_label(range.upper, RangeUnit::Millis))
            .collect(),
        datasets,
    }
}

#[must_use]
pub fn saccade_amplitude_range(
    ranges: &DirectionRanges,
    reference: &DirectionReference,
    palette: &SeriesPalette,
) -> ChartSeries {
    let mut datasets = vec![
        Dataset::values(
            "forward",
            SeriesKind::Bar,
            counts(&ranges.forward),
            palette.success,
        ),
        Dataset::values(
            "backward",
            SeriesKind::Bar,
            counts(&ranges.backward),
            palette.danger,
        ),
    ];
    push_reference(
        &mut datasets,
        "mean forward",
        SeriesKind::Bar,
        reference.forward.as_ref(),
        palette.reference_light,
    );
    push_reference(
        &mut datasets,
        "mean backward",
        SeriesKind::Bar,
        reference.backward.as_ref(),
        palette.reference_dark,
    );

    ChartSeries {
        kind: ChartKind::Bar,
        labels: ranges
            .forward
            .iter()
            .map(|range| range_label(range.upper, RangeUnit::Degrees))
            .collect(),
        datasets,
    }
}

/// Stacked forward/backward/other counts per time bin; reference means are
/// drawn as lines over the bars.
#[must_use]
pub fn saccade_directions(
    series: &DirectionSeries,
    reference: &DirectionReference,
    palette: &SeriesPalette,
) -> ChartSeries {
    let to_f64 = |values: &[usize]| values.iter().map(|&v| v as f64).collect::<Vec<_>>();
    let mut datasets = vec![
        Dataset::values(
            "forward",
            SeriesKind::Bar,
            to_f64(&series.forward),
            palette.success,
        ),
        Dataset::values(
            "backward",
            SeriesKind::Bar,
            to_f64(&series.backward),
            palette.danger,
        ),
        Dataset::values(
            "other",
            SeriesKind::Bar,
            to_f64(&series.other),
            palette.primary,
        ),
    ];
    for (label, values) in [
        ("mean forward", reference.forward.as_ref()),
        ("mean backward", reference.backward.as_ref()),
        ("mean other", reference.other.as_ref()),
    ] {
        push_reference(
            &mut datasets,
            label,
            SeriesKind::Line,
            values,
            palette.reference_light,
        );
    }

    ChartSeries {
        kind: ChartKind::StackedBar,
        labels: bin_time_labels(series.len(), series.item_duration),
        datasets,
    }
}

/// Angular histogram in display order, 0° on the right and angles growing
/// counter-clockwise. Reference angles missing from the map become `NaN`
/// (a gap in the radar).
#[must_use]
pub fn saccade_direction_radar(
    histogram: &AngleHistogram,
    reference: &References<IndexMap<OrderedFloat<f64>, f64>>,
    palette: &SeriesPalette,
) -> ChartSeries {
    let ordered = histogram.display_order();

    let mut directions = Dataset::values(
        "directions",
        SeriesKind::Area,
        ordered.iter().map(|bin| bin.count as f64).collect(),
        palette.primary_light,
    );
    directions.border = Some(palette.primary);
    let mut datasets = vec![directions];

    if let Some(means) = &reference.means {
        let mut dataset = Dataset::values(
            "reference",
            SeriesKind::Area,
            ordered
                .iter()
                .map(|bin| {
                    means
                        .get(&OrderedFloat(bin.angle))
                        .copied()
                        .unwrap_or(f64::NAN)
                })
                .collect(),
            palette.reference_light,
        );
        dataset.border = Some(palette.reference_dark);
        datasets.push(dataset);
    }

    ChartSeries {
        kind: ChartKind::Radar,
        labels: ordered.iter().map(|bin| angle_label(bin.angle)).collect(),
        datasets,
    }
}

/// One scatter lane per non-empty event channel; lane `n` sits at `y = n`,
/// `x` is seconds since trial start. Labels name the lanes in order.
#[must_use]
pub fn user_events(channels: &EventChannels, palette: &SeriesPalette) -> ChartSeries {
    let mut labels = Vec::new();
    let mut datasets = Vec::new();

    for (lane, (channel, events)) in channels.non_empty().enumerate() {
        let y = (lane + 1) as f64;
        let points = events
            .iter()
            .map(|event| ScatterPoint {
                x: event.timestamp / 1_000.0,
                y,
                name: event.name.clone(),
                value: event.value.clone(),
            })
            .collect();

        labels.push(channel.key().to_owned());
        datasets.push(Dataset {
            label: channel.key().to_owned(),
            kind: SeriesKind::Points,
            data: DatasetData::Points(points),
            background: palette.event_color(channel),
            border: None,
        });
    }

    ChartSeries {
        kind: ChartKind::Scatter,
        labels,
        datasets,
    }
}

/// Correct/wrong clicks per tenth of the trial, labeled `10%` .. `100%`.
#[must_use]
pub fn hits(data: &Hits, reference: &HitsReference, palette: &SeriesPalette) -> ChartSeries {
    let mut datasets = vec![
        Dataset::values(
            "correct",
            SeriesKind::Bar,
            data.correct.clone(),
            palette.success,
        ),
        Dataset::values("wrong", SeriesKind::Bar, data.wrong.clone(), palette.danger),
    ];
    push_reference(
        &mut datasets,
        "mean correct",
        SeriesKind::Bar,
        reference.correct.as_ref(),
        palette.reference_light,
    );
    push_reference(
        &mut datasets,
        "mean wrong",
        SeriesKind::Bar,
        reference.wrong.as_ref(),
        palette.reference_dark,
    );

    ChartSeries {
        kind: ChartKind::Bar,
        labels: (0..data.correct.len()).map(percent_label).collect(),
        datasets,
    }
}
