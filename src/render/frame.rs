use crate::core::Viewport;
use crate::error::{GazeError, GazeResult};
use crate::render::{CirclePrimitive, LinePrimitive, RectPrimitive};

/// Backend-agnostic scene accumulated by one drawing surface.
///
/// Backends replay rects first, then lines, then circles.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub circles: Vec<CirclePrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            rects: Vec::new(),
            lines: Vec::new(),
            circles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_circle(mut self, circle: CirclePrimitive) -> Self {
        self.circles.push(circle);
        self
    }

    pub fn validate(&self) -> GazeResult<()> {
        if !self.viewport.is_valid() {
            return Err(GazeError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty() && self.circles.is_empty()
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.lines.len() + self.rects.len() + self.circles.len()
    }

    /// Moves every primitive of `other` to the end of this frame.
    pub fn append(&mut self, other: RenderFrame) {
        self.rects.extend(other.rects);
        self.lines.extend(other.lines);
        self.circles.extend(other.circles);
    }

    /// Drops every primitive, keeping the viewport.
    pub fn clear(&mut self) {
        self.rects.clear();
        self.lines.clear();
        self.circles.clear();
    }
}
