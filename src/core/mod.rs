pub mod directions;
pub mod events;
pub mod fixations;
pub mod mapper;
pub mod primitives;
pub mod reference;
pub mod saccades;
pub mod temporal_bins;
pub mod timestamp;
pub mod types;
pub mod value_ranges;
pub mod windowing;

pub use directions::{
    AngleBin, AngleHistogram, Direction, DirectionConfig, DirectionSeries, angle_histogram,
    classify_direction, direction_series,
};
pub use events::{
    EventChannel, EventChannels, EventValue, RawEvent, TimedEvent, scroll_events,
    split_event_channels,
};
pub use fixations::{average_duration, normalize_fixations, scroll_compensate};
pub use mapper::{CoordinateMapper, DEFAULT_AREA_MARGIN};
pub use reference::{
    ReferenceValue, ReferenceView, References, resolve_reference, resolve_series,
};
pub use saccades::{SaccadeConfig, SaccadeStrategy, average_amplitude, extract_saccades};
pub use temporal_bins::{MAX_TIME_BINS, TemporalBins, TimeBin, bin_by_time, mean_of};
pub use timestamp::{GazeTimestamp, RawGazeTimestamp, RawTime, rebase_millis};
pub use types::{
    Bounds, ContentArea, Fixation, FixationSample, Point, RawFixation, RawTrialMeta, Saccade,
    ScrollEvent, TrialMeta, Viewport,
};
pub use value_ranges::{DirectionRanges, ValueRange, amplitude_ranges, count_in_ranges};
pub use windowing::{TimeRange, elapsed_millis};
