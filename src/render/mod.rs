mod frame;
pub mod heatmap;
mod null_renderer;
pub mod painter;
mod primitives;

pub use frame::RenderFrame;
pub use heatmap::{DensityBuffer, DensitySurface, Heatmap, HeatmapConfig, HeatmapOptions};
pub use null_renderer::NullRenderer;
pub use painter::{FixPlotOptions, Painter, PainterConfig, Target, TargetStyle};
pub use primitives::{CirclePrimitive, Color, LinePrimitive, RectPrimitive};

use crate::error::GazeResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` so drawing code stays
/// isolated from gaze-data transforms.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> GazeResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
