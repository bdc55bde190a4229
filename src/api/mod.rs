mod config;
mod json_contract;
pub mod label_format;
pub mod series;
mod trial;

pub use config::{BinningConfig, VizConfig};
pub use json_contract::{VIZ_CONFIG_JSON_SCHEMA_V1, VizConfigJsonContractV1};
pub use label_format::{
    RangeUnit, angle_label, date_label, ms_to_time, percent_label, range_label, sec_to_time,
};
pub use series::{
    ChartKind, ChartSeries, Dataset, DatasetData, DirectionReference, Hits, HitsReference,
    ScatterPoint, SeriesKind, SeriesPalette,
};
pub use trial::{TrialAnalysis, TrialInput};
