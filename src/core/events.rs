use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::timestamp::{RawTime, ensure_ascending, rebase_millis};
use crate::core::types::ScrollEvent;
use crate::error::GazeResult;

/// Value attached to a timed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl EventValue {
    #[must_use]
    pub fn empty() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for EventValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(true) => f.write_str("on"),
            Self::Flag(false) => f.write_str("off"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// One entry of the web-log event stream, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RawEvent {
    #[serde(rename = "veroNavigation")]
    Navigation { timestamp: RawTime, target: String },
    #[serde(rename = "veroNavigationData")]
    DataChange {
        timestamp: RawTime,
        variable: String,
        value: EventValue,
    },
    #[serde(rename = "uiAdjustment")]
    UiAdjustment {
        timestamp: RawTime,
        target: String,
        enable: bool,
    },
    #[serde(rename = "clicked")]
    Clicked { timestamp: RawTime, index: i64 },
    #[serde(rename = "scroll")]
    Scroll { timestamp: RawTime, position: f64 },
    #[serde(rename = "drawing")]
    Drawing {
        timestamp: RawTime,
        #[serde(default)]
        shape: Option<String>,
        #[serde(default)]
        value: Option<EventValue>,
    },
    #[serde(rename = "instruction")]
    Instruction {
        timestamp: RawTime,
        #[serde(default)]
        text: String,
    },
    #[serde(other)]
    Unknown,
}

impl RawEvent {
    #[must_use]
    pub fn timestamp(&self) -> Option<&RawTime> {
        match self {
            Self::Navigation { timestamp, .. }
            | Self::DataChange { timestamp, .. }
            | Self::UiAdjustment { timestamp, .. }
            | Self::Clicked { timestamp, .. }
            | Self::Scroll { timestamp, .. }
            | Self::Drawing { timestamp, .. }
            | Self::Instruction { timestamp, .. } => Some(timestamp),
            Self::Unknown => None,
        }
    }
}

/// Event with a trial-relative timestamp in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub timestamp: f64,
    pub name: String,
    pub value: EventValue,
}

impl TimedEvent {
    #[must_use]
    pub fn new(timestamp: f64, name: impl Into<String>, value: EventValue) -> Self {
        Self {
            timestamp,
            name: name.into(),
            value,
        }
    }
}

/// Typed channel of the event stream, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventChannel {
    Navigate,
    Data,
    Ui,
    Clicks,
    Scrolls,
    Instruction,
    Drawing,
    Sphere,
    Cross,
}

impl EventChannel {
    pub const ALL: [Self; 9] = [
        Self::Navigate,
        Self::Data,
        Self::Ui,
        Self::Clicks,
        Self::Scrolls,
        Self::Instruction,
        Self::Drawing,
        Self::Sphere,
        Self::Cross,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Navigate => "navigate",
            Self::Data => "data",
            Self::Ui => "ui",
            Self::Clicks => "clicks",
            Self::Scrolls => "scrolls",
            Self::Instruction => "instruction",
            Self::Drawing => "drawing",
            Self::Sphere => "sphere",
            Self::Cross => "cross",
        }
    }
}

/// Event stream split by channel; every channel is present, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventChannels {
    channels: IndexMap<EventChannel, Vec<TimedEvent>>,
}

impl Default for EventChannels {
    fn default() -> Self {
        Self {
            channels: EventChannel::ALL
                .into_iter()
                .map(|channel| (channel, Vec::new()))
                .collect(),
        }
    }
}

impl EventChannels {
    #[must_use]
    pub fn get(&self, channel: EventChannel) -> &[TimedEvent] {
        self.channels
            .get(&channel)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EventChannel, &[TimedEvent])> {
        self.channels
            .iter()
            .map(|(channel, events)| (*channel, events.as_slice()))
    }

    /// Channels that carry at least one event, in display order.
    pub fn non_empty(&self) -> impl Iterator<Item = (EventChannel, &[TimedEvent])> {
        self.iter().filter(|(_, events)| !events.is_empty())
    }

    #[must_use]
    pub fn total_len(&self) -> usize {
        self.channels.values().map(Vec::len).sum()
    }

    fn push(&mut self, channel: EventChannel, event: TimedEvent) {
        self.channels.entry(channel).or_default().push(event);
    }
}

/// Splits the event log into typed channels with timestamps rebased to
/// milliseconds since `start_time`. Unrecognized event types are dropped.
pub fn split_event_channels(
    events: &[RawEvent],
    start_time: DateTime<Utc>,
) -> GazeResult<EventChannels> {
    let mut channels = EventChannels::default();
    let mut dropped = 0_usize;

    for event in events {
        let (raw_time, channel, name, value) = match event {
            RawEvent::Navigation { timestamp, target } => (
                timestamp,
                EventChannel::Navigate,
                target.clone(),
                EventValue::empty(),
            ),
            RawEvent::DataChange {
                timestamp,
                variable,
                value,
            } => (timestamp, EventChannel::Data, variable.clone(), value.clone()),
            RawEvent::UiAdjustment {
                timestamp,
                target,
                enable,
            } => (
                timestamp,
                EventChannel::Ui,
                target.clone(),
                EventValue::Flag(*enable),
            ),
            RawEvent::Clicked { timestamp, index } => (
                timestamp,
                EventChannel::Clicks,
                "click".to_owned(),
                EventValue::Number(*index as f64),
            ),
            RawEvent::Scroll {
                timestamp,
                position,
            } => (
                timestamp,
                EventChannel::Scrolls,
                "scroll".to_owned(),
                EventValue::Number(*position),
            ),
            RawEvent::Drawing {
                timestamp,
                shape,
                value,
            } => {
                let channel = match shape.as_deref() {
                    Some("sphere") => EventChannel::Sphere,
                    Some("cross") => EventChannel::Cross,
                    _ => EventChannel::Drawing,
                };
                (
                    timestamp,
                    channel,
                    shape.clone().unwrap_or_else(|| "drawing".to_owned()),
                    value.clone().unwrap_or_else(EventValue::empty),
                )
            }
            RawEvent::Instruction { timestamp, text } => (
                timestamp,
                EventChannel::Instruction,
                "instruction".to_owned(),
                EventValue::Text(text.clone()),
            ),
            RawEvent::Unknown => {
                dropped += 1;
                continue;
            }
        };

        let timestamp = rebase_millis(raw_time.to_datetime()?, start_time);
        channels.push(channel, TimedEvent::new(timestamp, name, value));
    }

    debug!(
        events = events.len(),
        routed = channels.total_len(),
        dropped,
        "split event channels"
    );
    Ok(channels)
}

/// Extracts scroll positions with wall-clock timestamps, for fixation
/// compensation. The log must be ascending.
pub fn scroll_events(events: &[RawEvent]) -> GazeResult<Vec<ScrollEvent>> {
    let scrolls = events
        .iter()
        .filter_map(|event| match event {
            RawEvent::Scroll {
                timestamp,
                position,
            } => Some(timestamp.to_datetime().map(|timestamp| ScrollEvent {
                timestamp,
                position: *position,
            })),
            _ => None,
        })
        .collect::<GazeResult<Vec<_>>>()?;
    ensure_ascending(&scrolls, |scroll| scroll.timestamp)?;
    Ok(scrolls)
}
