use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::{
    AngleHistogram, DirectionRanges, DirectionSeries, EventChannels, Fixation, RawEvent,
    RawFixation, RawTrialMeta, ReferenceValue, ReferenceView, References, Saccade, TemporalBins,
    TrialMeta, ValueRange, Viewport, amplitude_ranges, angle_histogram, average_amplitude,
    average_duration, bin_by_time, count_in_ranges, direction_series, extract_saccades, mean_of,
    normalize_fixations, resolve_reference, resolve_series, scroll_compensate, scroll_events,
    split_event_channels,
};
use crate::error::{GazeError, GazeResult};
use crate::render::{DensitySurface, Heatmap, Painter, Renderer, Target};

use super::series::{self, ChartSeries, DirectionReference, Hits, HitsReference};
use super::VizConfig;

/// Raw bundle for one trial, as delivered by the data-access layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialInput {
    pub meta: RawTrialMeta,
    #[serde(default)]
    pub fixations: Vec<RawFixation>,
    #[serde(default)]
    pub events: Vec<RawEvent>,
    /// Population statistics keyed by view (`means`, `medians`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hits: Option<Hits>,
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl TrialInput {
    pub fn from_json_str(input: &str) -> GazeResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| GazeError::InvalidData(format!("failed to parse trial json: {e}")))
    }
}

/// Canonical records of one trial plus the series derived from them.
///
/// Built once per trial and configuration; change either by building a new
/// analysis.
#[derive(Debug, Clone)]
pub struct TrialAnalysis {
    config: VizConfig,
    meta: TrialMeta,
    fixations: Vec<Fixation>,
    saccades: Vec<Saccade>,
    events: EventChannels,
    reference: Option<Value>,
    hits: Option<Hits>,
    targets: Vec<Target>,
}

impl TrialAnalysis {
    pub fn new(input: &TrialInput, config: VizConfig) -> GazeResult<Self> {
        let config = config.validate()?;
        let meta = TrialMeta::from_raw(&input.meta)?;

        let samples = normalize_fixations(&input.fixations)?;
        let scrolls = scroll_events(&input.events)?;
        let fixations = scroll_compensate(&samples, &scrolls)?;
        let saccades = extract_saccades(&samples, config.saccades.strategy);
        let events = split_event_channels(&input.events, meta.start_time)?;

        debug!(
            participant = %meta.participant_code,
            fixations = fixations.len(),
            scrolls = scrolls.len(),
            events = events.total_len(),
            "built trial analysis"
        );

        Ok(Self {
            config,
            meta,
            fixations,
            saccades,
            events,
            reference: input.reference.clone(),
            hits: input.hits.clone(),
            targets: input.targets.clone(),
        })
    }

    pub fn from_json_str(input: &str, config: VizConfig) -> GazeResult<Self> {
        Self::new(&TrialInput::from_json_str(input)?, config)
    }

    #[must_use]
    pub fn config(&self) -> &VizConfig {
        &self.config
    }

    #[must_use]
    pub fn meta(&self) -> &TrialMeta {
        &self.meta
    }

    #[must_use]
    pub fn fixations(&self) -> &[Fixation] {
        &self.fixations
    }

    #[must_use]
    pub fn saccades(&self) -> &[Saccade] {
        &self.saccades
    }

    #[must_use]
    pub fn events(&self) -> &EventChannels {
        &self.events
    }

    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    #[must_use]
    pub fn hits(&self) -> Option<&Hits> {
        self.hits.as_ref()
    }

    #[must_use]
    pub fn average_fixation_duration(&self) -> f64 {
        average_duration(&self.fixations)
    }

    #[must_use]
    pub fn average_saccade_amplitude(&self) -> f64 {
        average_amplitude(&self.saccades)
    }

    /// Mean fixation duration per time bin.
    pub fn fixation_durations_over_time(&self) -> GazeResult<TemporalBins<f64>> {
        bin_by_time(
            &self.fixations,
            |fixation| fixation.timestamp.tracker_ms,
            self.config.binning.time_bin_secs,
            |bin| mean_of(bin, |fixation| fixation.duration),
        )
    }

    /// Mean saccade amplitude per time bin.
    pub fn saccade_amplitudes_over_time(&self) -> GazeResult<TemporalBins<f64>> {
        bin_by_time(
            &self.saccades,
            |saccade| saccade.timestamp.tracker_ms,
            self.config.binning.time_bin_secs,
            |bin| mean_of(bin, |saccade| saccade.amplitude),
        )
    }

    pub fn direction_series(&self) -> GazeResult<DirectionSeries> {
        direction_series(
            &self.saccades,
            self.config.binning.time_bin_secs,
            &self.config.directions,
        )
    }

    pub fn angle_histogram(&self) -> GazeResult<AngleHistogram> {
        angle_histogram(&self.saccades, &self.config.directions)
    }

    pub fn fixation_duration_ranges(&self) -> GazeResult<Vec<ValueRange>> {
        count_in_ranges(
            &self.fixations,
            |fixation| fixation.duration,
            &self.config.binning.duration_bounds,
        )
    }

    pub fn amplitude_ranges(&self) -> GazeResult<DirectionRanges> {
        amplitude_ranges(
            &self.saccades,
            &self.config.binning.amplitude_bounds,
            &self.config.directions,
        )
    }

    /// Resolves `path` against the reference statistics; no statistics means
    /// no views.
    pub fn reference(&self, path: &str) -> GazeResult<References<ReferenceValue>> {
        match &self.reference {
            Some(stats) => resolve_reference(stats, path),
            None => Ok(References::default()),
        }
    }

    pub fn reference_series(&self, path: &str) -> GazeResult<References<Vec<f64>>> {
        match &self.reference {
            Some(stats) => resolve_series(stats, path),
            None => Ok(References::default()),
        }
    }

    pub fn reference_angles(
        &self,
        path: &str,
    ) -> GazeResult<References<IndexMap<OrderedFloat<f64>, f64>>> {
        let resolved = self.reference(path)?;
        let mut angles = References::default();
        for (view, value) in resolved.iter() {
            let map = value.as_angles().ok_or_else(|| {
                GazeError::InvalidData(format!("reference `{path}` is not an angle map"))
            })?;
            match view {
                ReferenceView::Means => angles.means = Some(map.clone()),
                ReferenceView::Medians => angles.medians = Some(map.clone()),
                ReferenceView::UpperQuantile => angles.upper_quantile = Some(map.clone()),
                ReferenceView::LowerQuantile => angles.lower_quantile = Some(map.clone()),
            }
        }
        Ok(angles)
    }

    /// Mean `forward`/`backward`/`other` series under `path`.
    pub fn direction_reference(&self, path: &str) -> GazeResult<DirectionReference> {
        Ok(DirectionReference {
            forward: self.mean_series(&format!("{path}.forward"))?,
            backward: self.mean_series(&format!("{path}.backward"))?,
            other: self.mean_series(&format!("{path}.other"))?,
        })
    }

    /// Mean `correct`/`wrong` series under `path`.
    pub fn hits_reference(&self, path: &str) -> GazeResult<HitsReference> {
        Ok(HitsReference {
            correct: self.mean_series(&format!("{path}.correct"))?,
            wrong: self.mean_series(&format!("{path}.wrong"))?,
        })
    }

    fn mean_series(&self, path: &str) -> GazeResult<Option<Vec<f64>>> {
        Ok(self
            .reference_series(&format!("{}.{path}", ReferenceView::Means.key()))?
            .means)
    }

    fn series_reference(&self, path: Option<&str>) -> GazeResult<References<Vec<f64>>> {
        path.map_or_else(|| Ok(References::default()), |path| self.reference_series(path))
    }

    pub fn fix_durations_time_chart(&self, reference_path: Option<&str>) -> GazeResult<ChartSeries> {
        let bins = self.fixation_durations_over_time()?;
        let item_duration = bins.item_duration_secs();
        Ok(series::fix_durations_time(
            &bins.into_values(),
            item_duration,
            &self.series_reference(reference_path)?,
            &self.config.palette,
        ))
    }

    pub fn saccade_amplitude_time_chart(
        &self,
        reference_path: Option<&str>,
    ) -> GazeResult<ChartSeries> {
        let bins = self.saccade_amplitudes_over_time()?;
        let item_duration = bins.item_duration_secs();
        Ok(series::saccade_amplitude_time(
            &bins.into_values(),
            item_duration,
            &self.series_reference(reference_path)?,
            &self.config.palette,
        ))
    }

    pub fn fix_durations_range_chart(
        &self,
        reference_path: Option<&str>,
    ) -> GazeResult<ChartSeries> {
        Ok(series::fix_durations_range(
            &self.fixation_duration_ranges()?,
            &self.series_reference(reference_path)?,
            &self.config.palette,
        ))
    }

    pub fn saccade_amplitude_range_chart(
        &self,
        reference_path: Option<&str>,
    ) -> GazeResult<ChartSeries> {
        let reference = match reference_path {
            Some(path) => self.direction_reference(path)?,
            None => DirectionReference::default(),
        };
        Ok(series::saccade_amplitude_range(
            &self.amplitude_ranges()?,
            &reference,
            &self.config.palette,
        ))
    }

    pub fn saccade_directions_chart(
        &self,
        reference_path: Option<&str>,
    ) -> GazeResult<ChartSeries> {
        let reference = match reference_path {
            Some(path) => self.direction_reference(path)?,
            None => DirectionReference::default(),
        };
        Ok(series::saccade_directions(
            &self.direction_series()?,
            &reference,
            &self.config.palette,
        ))
    }

    pub fn saccade_direction_radar_chart(
        &self,
        reference_path: Option<&str>,
    ) -> GazeResult<ChartSeries> {
        let reference = match reference_path {
            Some(path) => self.reference_angles(path)?,
            None => References::default(),
        };
        Ok(series::saccade_direction_radar(
            &self.angle_histogram()?,
            &reference,
            &self.config.palette,
        ))
    }

    #[must_use]
    pub fn user_events_chart(&self) -> ChartSeries {
        series::user_events(&self.events, &self.config.palette)
    }

    /// `None` when the trial carries no hit counts.
    pub fn hits_chart(&self, reference_path: Option<&str>) -> GazeResult<Option<ChartSeries>> {
        let Some(hits) = &self.hits else {
            return Ok(None);
        };
        let reference = match reference_path {
            Some(path) => self.hits_reference(path)?,
            None => HitsReference::default(),
        };
        Ok(Some(series::hits(hits, &reference, &self.config.palette)))
    }

    /// Overlay painter over this trial's content area, using the configured
    /// margin.
    pub fn painter<R: Renderer>(&self, renderer: R, canvas: Viewport) -> GazeResult<Painter<R>> {
        Painter::new(
            renderer,
            canvas,
            self.meta.content_area,
            self.config.painter.area_margin,
        )
    }

    /// Draws this trial's targets and fixation plot with the configured
    /// styles.
    pub fn paint<R: Renderer>(&self, painter: &mut Painter<R>) -> GazeResult<()> {
        painter.draw_targets(&self.targets, &self.config.painter.targets)?;
        painter.draw_fix_plot(&self.fixations, &self.config.painter.fix_plot)
    }

    pub fn heatmap<S: DensitySurface>(&self, surface: S) -> GazeResult<Heatmap<S>> {
        Heatmap::new(
            surface,
            self.meta.content_area,
            self.config.heatmap.area_margin,
        )
    }

    /// Draws this trial's fixations with the configured heatmap options.
    pub fn draw_heatmap<S: DensitySurface>(&self, heatmap: &mut Heatmap<S>) -> GazeResult<()> {
        heatmap.draw(&self.fixations, &self.config.heatmap.options)
    }
}
