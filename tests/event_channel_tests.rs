use chrono::{DateTime, Utc};
use gazeviz::core::{EventChannel, EventValue, RawEvent, split_event_channels};

fn start() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2021-03-04T10:00:00Z")
        .expect("valid start")
        .with_timezone(&Utc)
}

fn parse_events(json: &str) -> Vec<RawEvent> {
    serde_json::from_str(json).expect("event log")
}

#[test]
fn type_tags_select_event_variants() {
    let events = parse_events(
        r#"[
            {"type": "veroNavigation", "timestamp": "2021-03-04T10:00:01Z", "target": "menu"},
            {"type": "veroNavigationData", "timestamp": "2021-03-04T10:00:02Z", "variable": "zoom", "value": 2},
            {"type": "uiAdjustment", "timestamp": "2021-03-04T10:00:03Z", "target": "legend", "enable": false},
            {"type": "clicked", "timestamp": "2021-03-04T10:00:04Z", "index": 3},
            {"type": "scroll", "timestamp": "2021-03-04T10:00:05Z", "position": 120.5},
            {"type": "mouseWheel", "timestamp": "2021-03-04T10:00:06Z"}
        ]"#,
    );

    assert_eq!(events.len(), 6);
    assert!(matches!(&events[0], RawEvent::Navigation { target, .. } if target == "menu"));
    assert!(matches!(
        &events[1],
        RawEvent::DataChange { value: EventValue::Number(v), .. } if *v == 2.0
    ));
    assert!(matches!(&events[2], RawEvent::UiAdjustment { enable: false, .. }));
    assert!(matches!(&events[3], RawEvent::Clicked { index: 3, .. }));
    assert!(matches!(&events[4], RawEvent::Scroll { position, .. } if *position == 120.5));
    assert_eq!(events[5], RawEvent::Unknown);
    assert!(events[5].timestamp().is_none());
}

#[test]
fn channels_are_rebased_and_routed() {
    let events = parse_events(
        r#"[
            {"type": "veroNavigation", "timestamp": "2021-03-04T10:00:01Z", "target": "menu"},
            {"type": "clicked", "timestamp": "2021-03-04T10:00:01.250Z", "index": 0},
            {"type": "uiAdjustment", "timestamp": "2021-03-04T10:00:02Z", "target": "legend", "enable": true},
            {"type": "drawing", "timestamp": "2021-03-04T10:00:03Z", "shape": "sphere"},
            {"type": "drawing", "timestamp": "2021-03-04T10:00:04Z", "shape": "cross", "value": "x"},
            {"type": "drawing", "timestamp": "2021-03-04T10:00:05Z"},
            {"type": "instruction", "timestamp": "2021-03-04T10:00:06Z", "text": "find the peak"},
            {"type": "hover", "timestamp": "2021-03-04T10:00:07Z"}
        ]"#,
    );
    let channels = split_event_channels(&events, start()).expect("channels");

    assert_eq!(channels.total_len(), 7);

    let navigate = channels.get(EventChannel::Navigate);
    assert_eq!(navigate.len(), 1);
    assert_eq!(navigate[0].timestamp, 1_000.0);
    assert_eq!(navigate[0].name, "menu");
    assert_eq!(navigate[0].value, EventValue::empty());

    let clicks = channels.get(EventChannel::Clicks);
    assert_eq!(clicks[0].timestamp, 1_250.0);
    assert_eq!(clicks[0].value, EventValue::Number(0.0));

    let ui = channels.get(EventChannel::Ui);
    assert_eq!(ui[0].value, EventValue::Flag(true));
    assert_eq!(ui[0].value.to_string(), "on");

    assert_eq!(channels.get(EventChannel::Sphere).len(), 1);
    assert_eq!(channels.get(EventChannel::Cross)[0].value.to_string(), "x");
    assert_eq!(channels.get(EventChannel::Drawing)[0].name, "drawing");
    assert_eq!(
        channels.get(EventChannel::Instruction)[0].value,
        EventValue::Text("find the peak".to_owned())
    );
    assert!(channels.get(EventChannel::Scrolls).is_empty());
}

#[test]
fn every_channel_is_listed_in_display_order() {
    let channels = split_event_channels(&[], start()).expect("channels");

    let order: Vec<EventChannel> = channels.iter().map(|(channel, _)| channel).collect();
    assert_eq!(order, EventChannel::ALL.to_vec());
    assert_eq!(channels.non_empty().count(), 0);
}

#[test]
fn non_empty_channels_keep_display_order() {
    let events = parse_events(
        r#"[
            {"type": "scroll", "timestamp": "2021-03-04T10:00:01Z", "position": 10},
            {"type": "veroNavigation", "timestamp": "2021-03-04T10:00:02Z", "target": "a"}
        ]"#,
    );
    let channels = split_event_channels(&events, start()).expect("channels");

    let keys: Vec<&str> = channels
        .non_empty()
        .map(|(channel, _)| channel.key())
        .collect();
    assert_eq!(keys, vec!["navigate", "scrolls"]);
}

#[test]
fn bad_event_timestamp_is_an_error() {
    let events = parse_events(
        r#"[{"type": "clicked", "timestamp": "yesterday", "index": 1}]"#,
    );
    assert!(split_event_channels(&events, start()).is_err());
}
