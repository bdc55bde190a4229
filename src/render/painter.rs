use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::mapper::CoordinateMapper;
use crate::core::windowing::{TimeRange, elapsed_millis, in_optional_range};
use crate::core::{Bounds, ContentArea, Fixation, Point, Viewport};
use crate::error::{GazeError, GazeResult};
use crate::render::{CirclePrimitive, Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer};

/// Highest hue used by the elapsed-time colorization; violet, not wrapped back
/// to red.
pub const MAX_PROGRESS_HUE: f64 = 300.0;

/// Smallest fixation circle / heatmap kernel radius, in pixels.
pub const MIN_FIXATION_RADIUS: f64 = 2.0;

/// Interactive element of the recorded page and its click outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub bounds: Bounds,
    #[serde(default)]
    pub is_clicked: bool,
    #[serde(default)]
    pub is_correct_click: bool,
}

impl Target {
    #[must_use]
    pub fn new(bounds: Bounds, is_clicked: bool, is_correct_click: bool) -> Self {
        Self {
            bounds,
            is_clicked,
            is_correct_click,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetStyle {
    pub stroke_color: Color,
    pub stroke_width: f64,
    /// `None` leaves unclicked targets unfilled.
    #[serde(default)]
    pub unclicked_fill: Option<Color>,
    pub correct_fill: Color,
    pub wrong_fill: Color,
}

impl Default for TargetStyle {
    fn default() -> Self {
        Self {
            stroke_color: Color::rgb(0.4, 0.4, 0.4),
            stroke_width: 1.0,
            unclicked_fill: None,
            correct_fill: Color::rgb(136.0 / 255.0, 204.0 / 255.0, 1.0),
            wrong_fill: Color::rgb(1.0, 204.0 / 255.0, 136.0 / 255.0),
        }
    }
}

impl TargetStyle {
    pub fn validate(self) -> GazeResult<Self> {
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(GazeError::InvalidData(
                "target stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.stroke_color.validate()?;
        self.correct_fill.validate()?;
        self.wrong_fill.validate()?;
        if let Some(fill) = self.unclicked_fill {
            fill.validate()?;
        }
        Ok(self)
    }

    #[must_use]
    pub fn fill_for(&self, target: &Target) -> Option<Color> {
        match (target.is_clicked, target.is_correct_click) {
            (false, _) => self.unclicked_fill,
            (true, true) => Some(self.correct_fill),
            (true, false) => Some(self.wrong_fill),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixPlotOptions {
    pub pixels_per_second: f64,
    /// Shift the fixation hue from red to violet as the trial progresses.
    pub colorize: bool,
    pub show_saccades: bool,
    pub time_range: Option<TimeRange>,
    pub fixation_color: Color,
    pub saccade_color: Color,
    pub saccade_width: f64,
}

impl Default for FixPlotOptions {
    fn default() -> Self {
        Self {
            pixels_per_second: 20.0,
            colorize: true,
            show_saccades: true,
            time_range: None,
            fixation_color: Color::hsla(0.0, 1.0, 0.5, 0.5),
            saccade_color: Color::rgba(0.0, 0.0, 0.0, 0.5),
            saccade_width: 1.0,
        }
    }
}

impl FixPlotOptions {
    pub fn validate(self) -> GazeResult<Self> {
        if !self.pixels_per_second.is_finite() || self.pixels_per_second < 0.0 {
            return Err(GazeError::InvalidData(
                "pixels_per_second must be finite and >= 0".to_owned(),
            ));
        }
        if !self.saccade_width.is_finite() || self.saccade_width <= 0.0 {
            return Err(GazeError::InvalidData(
                "saccade width must be finite and > 0".to_owned(),
            ));
        }
        self.fixation_color.validate()?;
        self.saccade_color.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.time_range = Some(range);
        self
    }
}

/// Painter defaults carried by the crate configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PainterConfig {
    /// Padding around the content area, in source pixels.
    pub area_margin: f64,
    pub targets: TargetStyle,
    pub fix_plot: FixPlotOptions,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            area_margin: 0.0,
            targets: TargetStyle::default(),
            fix_plot: FixPlotOptions::default(),
        }
    }
}

impl PainterConfig {
    pub fn validate(self) -> GazeResult<Self> {
        if !self.area_margin.is_finite() || self.area_margin < 0.0 {
            return Err(GazeError::InvalidData(
                "painter area margin must be finite and >= 0".to_owned(),
            ));
        }
        self.targets.validate()?;
        self.fix_plot.validate()?;
        Ok(self)
    }
}

/// Circle radius in pixels for a fixation of `duration_ms`.
#[must_use]
pub fn fixation_radius(duration_ms: f64, pixels_per_second: f64) -> f64 {
    (duration_ms * pixels_per_second / 1_000.0).max(MIN_FIXATION_RADIUS)
}

/// Hue for a fixation `elapsed` ms into a plot lasting `total` ms.
///
/// Returns `None` for a zero-length plot.
#[must_use]
pub fn progress_hue(elapsed: f64, total: f64) -> Option<f64> {
    if total <= 0.0 || !total.is_finite() {
        return None;
    }
    Some((elapsed / total * MAX_PROGRESS_HUE).round().min(MAX_PROGRESS_HUE))
}

/// Overlay surface drawing targets and fixation plots.
///
/// Draw calls accumulate into one `RenderFrame`; the whole frame is handed to
/// the renderer after every call. `reset` clears it.
#[derive(Debug)]
pub struct Painter<R: Renderer> {
    renderer: R,
    mapper: CoordinateMapper,
    frame: RenderFrame,
}

impl<R: Renderer> Painter<R> {
    pub fn new(renderer: R, canvas: Viewport, area: ContentArea, margin: f64) -> GazeResult<Self> {
        let mapper = CoordinateMapper::new(canvas, area, margin)?;
        Ok(Self {
            renderer,
            mapper,
            frame: RenderFrame::new(canvas),
        })
    }

    /// Re-derives the mapping for a new content area and clears the frame.
    pub fn reset(&mut self, area: ContentArea) -> GazeResult<()> {
        self.mapper.reset(area)?;
        self.frame.clear();
        debug!(
            left = area.left,
            top = area.top,
            width = area.width,
            height = area.height,
            "painter reset"
        );
        Ok(())
    }

    /// Adopts a new canvas size; already accumulated primitives are kept.
    pub fn resize(&mut self, canvas: Viewport) -> GazeResult<()> {
        self.mapper.resize(canvas)?;
        self.frame.viewport = canvas;
        Ok(())
    }

    pub fn draw_targets(&mut self, targets: &[Target], style: &TargetStyle) -> GazeResult<()> {
        let style = style.validate()?;
        let mut batch = RenderFrame::new(self.frame.viewport);

        for target in targets {
            let bounds = self.mapper.calc_bounds(target.bounds);
            let mut rect = RectPrimitive::new(bounds.left, bounds.top, bounds.width, bounds.height)
                .with_stroke(style.stroke_color, style.stroke_width);
            if let Some(fill) = style.fill_for(target) {
                rect = rect.with_fill(fill);
            }
            batch.rects.push(rect);
        }

        self.commit(batch)?;
        debug!(count = targets.len(), "drew targets");
        Ok(())
    }

    /// Draws one circle per fixation and, optionally, saccade segments between
    /// consecutive drawn fixations. Fixations whose elapsed time falls outside
    /// `options.time_range` are skipped.
    pub fn draw_fix_plot(
        &mut self,
        fixations: &[Fixation],
        options: &FixPlotOptions,
    ) -> GazeResult<()> {
        let options = options.validate()?;
        let elapsed = elapsed_millis(fixations);
        let total = elapsed.last().copied().unwrap_or(0.0);

        let mut batch = RenderFrame::new(self.frame.viewport);
        let mut previous: Option<Point> = None;

        for (fixation, elapsed) in fixations.iter().zip(elapsed) {
            if !in_optional_range(options.time_range, elapsed) {
                continue;
            }

            let center = self.mapper.calc_point(fixation.x, fixation.y);
            if !center.x.is_finite() || !center.y.is_finite() {
                return Err(GazeError::InvalidData(
                    "fixation position must be finite".to_owned(),
                ));
            }

            if let (true, Some(from)) = (options.show_saccades, previous) {
                batch.lines.push(LinePrimitive::new(
                    from.x,
                    from.y,
                    center.x,
                    center.y,
                    options.saccade_width,
                    options.saccade_color,
                ));
            }

            let fill = match progress_hue(elapsed, total) {
                Some(hue) if options.colorize => {
                    Color::hsla(hue, 1.0, 0.5, options.fixation_color.alpha)
                }
                _ => options.fixation_color,
            };
            let radius = fixation_radius(fixation.duration, options.pixels_per_second);
            trace!(elapsed, radius, "fixation circle");
            batch
                .circles
                .push(CirclePrimitive::new(center.x, center.y, radius, fill));

            previous = Some(center);
        }

        let drawn = batch.circles.len();
        self.commit(batch)?;
        debug!(
            fixations = fixations.len(),
            drawn,
            total_ms = total,
            "drew fixation plot"
        );
        Ok(())
    }

    /// Appends a validated batch and renders the whole frame. On failure the
    /// frame is left as it was before the call.
    fn commit(&mut self, batch: RenderFrame) -> GazeResult<()> {
        batch.validate()?;
        let (rects, lines, circles) = (
            self.frame.rects.len(),
            self.frame.lines.len(),
            self.frame.circles.len(),
        );
        self.frame.append(batch);

        let rendered = self.renderer.render(&self.frame);
        if rendered.is_err() {
            self.frame.rects.truncate(rects);
            self.frame.lines.truncate(lines);
            self.frame.circles.truncate(circles);
        }
        rendered
    }

    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    #[must_use]
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
