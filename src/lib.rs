//! gazeviz: eye-tracking trial analysis and rendering.
//!
//! Raw tracker fixations and web-log events go in; scroll-compensated
//! fixations, binned gaze statistics, chart-ready series and pixel-space
//! overlay/heatmap frames come out. The crate performs no I/O: callers hand
//! it already-fetched trial data.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{TrialAnalysis, TrialInput, VizConfig};
pub use error::{GazeError, GazeResult};
