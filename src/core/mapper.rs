use crate::core::types::{Bounds, ContentArea, Point, Viewport};
use crate::error::{GazeError, GazeResult};

/// Padding added around the content area by the heatmap surface, in source
/// pixels (half on each side).
pub const DEFAULT_AREA_MARGIN: f64 = 100.0;

/// Affine map from content-area coordinates to canvas pixels.
///
/// The padded area (`area + margin` on each axis) fills the canvas exactly:
/// `scale = canvas / (size + margin)`, `offset = origin - margin / 2`,
/// `pixel = (raw - offset) * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    canvas: Viewport,
    area: ContentArea,
    margin: f64,
    scale_x: f64,
    scale_y: f64,
    offset_x: f64,
    offset_y: f64,
}

impl CoordinateMapper {
    pub fn new(canvas: Viewport, area: ContentArea, margin: f64) -> GazeResult<Self> {
        if !margin.is_finite() || margin < 0.0 {
            return Err(GazeError::InvalidData(
                "area margin must be finite and >= 0".to_owned(),
            ));
        }

        let mut mapper = Self {
            canvas,
            area,
            margin,
            scale_x: 1.0,
            scale_y: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        mapper.derive()?;
        Ok(mapper)
    }

    /// Re-derives scale and offset for a new content area.
    ///
    /// The mapper is left untouched when the area is rejected.
    pub fn reset(&mut self, area: ContentArea) -> GazeResult<()> {
        let mut next = *self;
        next.area = area;
        next.derive()?;
        *self = next;
        Ok(())
    }

    /// Re-derives scale for a new canvas size, keeping the content area.
    pub fn resize(&mut self, canvas: Viewport) -> GazeResult<()> {
        let mut next = *self;
        next.canvas = canvas;
        next.derive()?;
        *self = next;
        Ok(())
    }

    fn derive(&mut self) -> GazeResult<()> {
        if !self.canvas.is_valid() {
            return Err(GazeError::InvalidViewport {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }

        let padded_width = self.area.width + self.margin;
        let padded_height = self.area.height + self.margin;
        if !padded_width.is_finite()
            || !padded_height.is_finite()
            || padded_width <= 0.0
            || padded_height <= 0.0
        {
            return Err(GazeError::InvalidData(
                "padded content area must be finite and > 0".to_owned(),
            ));
        }
        if !self.area.left.is_finite() || !self.area.top.is_finite() {
            return Err(GazeError::InvalidData(
                "content area origin must be finite".to_owned(),
            ));
        }

        self.scale_x = f64::from(self.canvas.width) / padded_width;
        self.scale_y = f64::from(self.canvas.height) / padded_height;
        self.offset_x = self.area.left - self.margin / 2.0;
        self.offset_y = self.area.top - self.margin / 2.0;
        Ok(())
    }

    #[must_use]
    pub fn calc_point(&self, x: f64, y: f64) -> Point {
        Point::new(
            (x - self.offset_x) * self.scale_x,
            (y - self.offset_y) * self.scale_y,
        )
    }

    /// Inverse of `calc_point`.
    #[must_use]
    pub fn invert_point(&self, pixel: Point) -> Point {
        Point::new(
            pixel.x / self.scale_x + self.offset_x,
            pixel.y / self.scale_y + self.offset_y,
        )
    }

    /// Maps a source rectangle to pixel space.
    #[must_use]
    pub fn calc_bounds(&self, bounds: Bounds) -> Bounds {
        let origin = self.calc_point(bounds.left, bounds.top);
        Bounds::new(
            origin.x,
            origin.y,
            bounds.width * self.scale_x,
            bounds.height * self.scale_y,
        )
    }

    #[must_use]
    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    #[must_use]
    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    #[must_use]
    pub fn canvas(&self) -> Viewport {
        self.canvas
    }

    #[must_use]
    pub fn area(&self) -> ContentArea {
        self.area
    }

    #[must_use]
    pub fn margin(&self) -> f64 {
        self.margin
    }
}
