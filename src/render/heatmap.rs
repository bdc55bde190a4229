//! Kernel-density heatmap of fixations.
//!
//! `Heatmap` owns the coordinate mapping and feeds weighted kernels into a
//! [`DensitySurface`]. [`DensityBuffer`] is the built-in CPU surface: it
//! accumulates a smoothstep radial falloff per point into a grid and colorizes
//! it through a blue, cyan, green, yellow, red gradient.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::mapper::{CoordinateMapper, DEFAULT_AREA_MARGIN};
use crate::core::windowing::{TimeRange, elapsed_millis, in_optional_range};
use crate::core::{ContentArea, Fixation, Viewport};
use crate::error::{GazeError, GazeResult};
use crate::render::painter::fixation_radius;

/// Accumulation buffer behind a heatmap.
///
/// Points queued with `add_point` become visible in the density only after
/// `update`; `display` publishes the current density.
pub trait DensitySurface {
    fn size(&self) -> Viewport;

    /// Resizes the surface; accumulated density is dropped.
    fn resize(&mut self, size: Viewport) -> GazeResult<()>;

    /// Drops accumulated density and queued points.
    fn clear(&mut self);

    fn add_point(&mut self, x: f64, y: f64, radius: f64, weight: f64);

    fn update(&mut self);

    fn display(&mut self) -> GazeResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingPoint {
    x: f64,
    y: f64,
    radius: f64,
    weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DensityBuffer {
    size: Viewport,
    cells: Vec<f32>,
    pending: Vec<PendingPoint>,
    pixels: Vec<u8>,
    display_count: usize,
}

impl DensityBuffer {
    pub fn new(size: Viewport) -> GazeResult<Self> {
        let mut buffer = Self {
            size,
            cells: Vec::new(),
            pending: Vec::new(),
            pixels: Vec::new(),
            display_count: 0,
        };
        buffer.resize(size)?;
        Ok(buffer)
    }

    #[must_use]
    pub fn value_at(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.cells.get(self.index(x, y)).copied()
    }

    #[must_use]
    pub fn max_density(&self) -> f32 {
        self.cells.iter().copied().fold(0.0_f32, f32::max)
    }

    #[must_use]
    pub fn total_density(&self) -> f64 {
        self.cells.iter().map(|&cell| f64::from(cell)).sum()
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn display_count(&self) -> usize {
        self.display_count
    }

    /// Last displayed RGBA8 image, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Colorizes the current density into row-major RGBA8.
    ///
    /// Density is clamped to `0..=1`; alpha follows density so empty cells
    /// stay transparent.
    #[must_use]
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.cells
            .iter()
            .flat_map(|&cell| gradient_rgba8(f64::from(cell)))
            .collect()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.size.width as usize + x as usize
    }

    fn splat(&mut self, point: PendingPoint) {
        let finite = [point.x, point.y, point.radius, point.weight]
            .iter()
            .all(|value| value.is_finite());
        if !finite || point.radius <= 0.0 || point.weight == 0.0 {
            return;
        }

        let width = f64::from(self.size.width);
        let height = f64::from(self.size.height);
        let min_x = (point.x - point.radius).floor().max(0.0);
        let max_x = (point.x + point.radius).ceil().min(width);
        let min_y = (point.y - point.radius).floor().max(0.0);
        let max_y = (point.y + point.radius).ceil().min(height);
        if min_x >= max_x || min_y >= max_y {
            return;
        }

        for row in min_y as u32..max_y as u32 {
            for col in min_x as u32..max_x as u32 {
                let dx = f64::from(col) + 0.5 - point.x;
                let dy = f64::from(row) + 0.5 - point.y;
                let falloff = 1.0 - dx.hypot(dy) / point.radius;
                if falloff <= 0.0 {
                    continue;
                }
                let index = self.index(col, row);
                self.cells[index] += (smoothstep(falloff) * point.weight) as f32;
            }
        }
    }
}

impl DensitySurface for DensityBuffer {
    fn size(&self) -> Viewport {
        self.size
    }

    fn resize(&mut self, size: Viewport) -> GazeResult<()> {
        if !size.is_valid() {
            return Err(GazeError::InvalidViewport {
                width: size.width,
                height: size.height,
            });
        }
        self.size = size;
        self.cells = vec![0.0; size.width as usize * size.height as usize];
        self.pending.clear();
        self.pixels.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.cells.fill(0.0);
        self.pending.clear();
    }

    fn add_point(&mut self, x: f64, y: f64, radius: f64, weight: f64) {
        self.pending.push(PendingPoint {
            x,
            y,
            radius,
            weight,
        });
    }

    fn update(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for point in &pending {
            self.splat(*point);
        }
        trace!(points = pending.len(), "density buffer updated");
    }

    fn display(&mut self) -> GazeResult<()> {
        self.pixels = self.to_rgba8();
        self.display_count += 1;
        Ok(())
    }
}

fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Gradient stops at 0, 0.25, 0.5, 0.75 and 1.
const GRADIENT: [[f64; 3]; 5] = [
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
];

fn gradient_rgba8(density: f64) -> [u8; 4] {
    let value = if density.is_finite() {
        density.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let scaled = value * (GRADIENT.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(GRADIENT.len() - 2);
    let t = scaled - lower as f64;
    let (from, to) = (GRADIENT[lower], GRADIENT[lower + 1]);
    let channel = |i: usize| ((from[i] + (to[i] - from[i]) * t) * 255.0).round() as u8;
    [channel(0), channel(1), channel(2), (value * 255.0).round() as u8]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapOptions {
    pub pixels_per_second: f64,
    /// Kernel weight in thousandths.
    pub intensity: f64,
    pub time_range: Option<TimeRange>,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            pixels_per_second: 50.0,
            intensity: 200.0,
            time_range: None,
        }
    }
}

impl HeatmapOptions {
    pub fn validate(self) -> GazeResult<Self> {
        if !self.pixels_per_second.is_finite() || self.pixels_per_second < 0.0 {
            return Err(GazeError::InvalidData(
                "pixels_per_second must be finite and >= 0".to_owned(),
            ));
        }
        if !self.intensity.is_finite() || self.intensity < 0.0 {
            return Err(GazeError::InvalidData(
                "heatmap intensity must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.time_range = Some(range);
        self
    }

    #[must_use]
    pub fn kernel_weight(self) -> f64 {
        self.intensity / 1_000.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Padding around the content area, in source pixels.
    pub area_margin: f64,
    pub options: HeatmapOptions,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            area_margin: DEFAULT_AREA_MARGIN,
            options: HeatmapOptions::default(),
        }
    }
}

impl HeatmapConfig {
    pub fn validate(self) -> GazeResult<Self> {
        if !self.area_margin.is_finite() || self.area_margin < 0.0 {
            return Err(GazeError::InvalidData(
                "heatmap area margin must be finite and >= 0".to_owned(),
            ));
        }
        self.options.validate()?;
        Ok(self)
    }
}

#[derive(Debug)]
pub struct Heatmap<S: DensitySurface> {
    surface: S,
    mapper: CoordinateMapper,
}

impl<S: DensitySurface> Heatmap<S> {
    pub fn new(surface: S, area: ContentArea, margin: f64) -> GazeResult<Self> {
        let mapper = CoordinateMapper::new(surface.size(), area, margin)?;
        Ok(Self { surface, mapper })
    }

    /// Re-derives scale and offset for a new content area and clears the
    /// accumulated density. The surface size is untouched.
    pub fn reset(&mut self, area: ContentArea) -> GazeResult<()> {
        self.mapper.reset(area)?;
        self.surface.clear();
        debug!(
            width = area.width,
            height = area.height,
            "heatmap reset"
        );
        Ok(())
    }

    /// Resizes the surface and the mapping together.
    pub fn resize(&mut self, size: Viewport) -> GazeResult<()> {
        self.mapper.resize(size)?;
        self.surface.resize(size)
    }

    /// Adds one kernel per fixation inside `options.time_range`, then updates
    /// and displays the surface.
    ///
    /// Kernels are checked before any reaches the surface: a non-finite
    /// position or radius fails the call and leaves the density untouched.
    pub fn draw(&mut self, fixations: &[Fixation], options: &HeatmapOptions) -> GazeResult<()> {
        let options = options.validate()?;
        self.adjust_size()?;

        let weight = options.kernel_weight();
        let mut kernels = Vec::with_capacity(fixations.len());
        for (fixation, elapsed) in fixations.iter().zip(elapsed_millis(fixations)) {
            if !in_optional_range(options.time_range, elapsed) {
                continue;
            }
            let point = self.mapper.calc_point(fixation.x, fixation.y);
            let radius = fixation_radius(fixation.duration, options.pixels_per_second);
            if !point.x.is_finite() || !point.y.is_finite() || !radius.is_finite() {
                return Err(GazeError::InvalidData(
                    "heatmap kernel position and radius must be finite".to_owned(),
                ));
            }
            kernels.push((point, radius));
        }

        let added = kernels.len();
        for (point, radius) in kernels {
            self.surface.add_point(point.x, point.y, radius, weight);
        }

        self.surface.update();
        self.surface.display()?;
        debug!(fixations = fixations.len(), added, weight, "drew heatmap");
        Ok(())
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Follows a surface that was resized behind the heatmap's back.
    fn adjust_size(&mut self) -> GazeResult<()> {
        let size = self.surface.size();
        if size != self.mapper.canvas() {
            self.mapper.resize(size)?;
        }
        Ok(())
    }
}
