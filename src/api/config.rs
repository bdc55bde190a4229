use serde::{Deserialize, Serialize};

use crate::core::{DirectionConfig, SaccadeConfig};
use crate::error::{GazeError, GazeResult};
use crate::render::{HeatmapConfig, PainterConfig};

use super::SeriesPalette;

/// Bin widths and range bounds of the statistical series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinningConfig {
    /// Requested width of one time bin, in seconds.
    pub time_bin_secs: f64,
    /// Ascending upper bounds of the fixation duration ranges, in ms.
    pub duration_bounds: Vec<f64>,
    /// Ascending upper bounds of the saccade amplitude ranges, in degrees.
    pub amplitude_bounds: Vec<f64>,
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self {
            time_bin_secs: 10.0,
            duration_bounds: vec![
                100.0, 200.0, 300.0, 400.0, 500.0, 750.0, 1_000.0, 1_500.0, 2_000.0,
            ],
            amplitude_bounds: vec![1.0, 2.0, 3.0, 4.0, 5.0, 7.5, 10.0, 15.0, 20.0],
        }
    }
}

impl BinningConfig {
    pub fn validate(self) -> GazeResult<Self> {
        if !self.time_bin_secs.is_finite() || self.time_bin_secs <= 0.0 {
            return Err(GazeError::InvalidData(
                "time_bin_secs must be finite and > 0".to_owned(),
            ));
        }
        validate_bounds("duration_bounds", &self.duration_bounds)?;
        validate_bounds("amplitude_bounds", &self.amplitude_bounds)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_time_bin_secs(mut self, time_bin_secs: f64) -> Self {
        self.time_bin_secs = time_bin_secs;
        self
    }
}

fn validate_bounds(name: &str, bounds: &[f64]) -> GazeResult<()> {
    if bounds.iter().any(|bound| !bound.is_finite()) {
        return Err(GazeError::InvalidData(format!(
            "`{name}` must contain finite values"
        )));
    }
    if bounds.windows(2).any(|pair| pair[1] <= pair[0]) {
        return Err(GazeError::InvalidData(format!(
            "`{name}` must be strictly ascending"
        )));
    }
    Ok(())
}

/// Full analysis and rendering configuration.
///
/// Every section is defaulted, so `{}` is a valid config document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub binning: BinningConfig,
    pub directions: DirectionConfig,
    pub saccades: SaccadeConfig,
    pub painter: PainterConfig,
    pub heatmap: HeatmapConfig,
    pub palette: SeriesPalette,
}

impl VizConfig {
    pub fn validate(self) -> GazeResult<Self> {
        let binning = self.binning.validate()?;
        self.directions.validate()?;
        self.painter.validate()?;
        self.heatmap.validate()?;
        self.palette.validate()?;
        Ok(Self { binning, ..self })
    }

    #[must_use]
    pub fn with_binning(mut self, binning: BinningConfig) -> Self {
        self.binning = binning;
        self
    }

    #[must_use]
    pub fn with_directions(mut self, directions: DirectionConfig) -> Self {
        self.directions = directions;
        self
    }

    #[must_use]
    pub fn with_saccades(mut self, saccades: SaccadeConfig) -> Self {
        self.saccades = saccades;
        self
    }

    #[must_use]
    pub fn with_painter(mut self, painter: PainterConfig) -> Self {
        self.painter = painter;
        self
    }

    #[must_use]
    pub fn with_heatmap(mut self, heatmap: HeatmapConfig) -> Self {
        self.heatmap = heatmap;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: SeriesPalette) -> Self {
        self.palette = palette;
        self
    }
}
