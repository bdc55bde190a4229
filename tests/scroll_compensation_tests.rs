use chrono::{DateTime, Utc};
use gazeviz::GazeError;
use gazeviz::core::{
    FixationSample, GazeTimestamp, RawEvent, RawTime, ScrollEvent, average_duration,
    scroll_compensate, scroll_events,
};

fn at(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_600_000_000_000 + ms).expect("valid time")
}

fn sample(ms: i64, y: f64) -> FixationSample {
    FixationSample {
        timestamp: GazeTimestamp::new(ms as f64, at(ms)),
        x: 10.0,
        y,
        duration: 200.0,
        saccadic_amplitude: 0.0,
        absolute_saccadic_direction: 0.0,
        relative_saccadic_direction: 0.0,
    }
}

fn scroll(ms: i64, position: f64) -> ScrollEvent {
    ScrollEvent {
        timestamp: at(ms),
        position,
    }
}

#[test]
fn no_scrolls_leaves_positions_untouched() {
    let samples = vec![sample(0, 5.0), sample(100, 6.0)];
    let fixations = scroll_compensate(&samples, &[]).expect("compensate");
    assert_eq!(fixations.len(), 2);
    assert_eq!(fixations[0].y, 5.0);
    assert_eq!(fixations[1].y, 6.0);
}

#[test]
fn single_scroll_applies_strictly_after_its_timestamp() {
    let samples = vec![sample(0, 10.0), sample(500, 10.0), sample(501, 10.0), sample(900, 10.0)];
    let fixations = scroll_compensate(&samples, &[scroll(500, 300.0)]).expect("compensate");

    let ys: Vec<f64> = fixations.iter().map(|fix| fix.y).collect();
    // a fixation tied with the scroll still sees the previous offset
    assert_eq!(ys, vec![10.0, 10.0, 310.0, 310.0]);
}

#[test]
fn later_scrolls_supersede_earlier_ones() {
    let samples = vec![sample(0, 0.0), sample(150, 0.0), sample(250, 0.0), sample(350, 0.0)];
    let scrolls = vec![scroll(100, 50.0), scroll(200, 20.0), scroll(210, 80.0)];
    let fixations = scroll_compensate(&samples, &scrolls).expect("compensate");

    let ys: Vec<f64> = fixations.iter().map(|fix| fix.y).collect();
    assert_eq!(ys, vec![0.0, 50.0, 80.0, 80.0]);
}

#[test]
fn output_keeps_one_fixation_per_sample() {
    let samples: Vec<FixationSample> = (0..50).map(|i| sample(i * 40, i as f64)).collect();
    let scrolls: Vec<ScrollEvent> = (0..7).map(|i| scroll(i * 300 + 5, i as f64 * 10.0)).collect();
    let fixations = scroll_compensate(&samples, &scrolls).expect("compensate");

    assert_eq!(fixations.len(), samples.len());
    for (fix, raw) in fixations.iter().zip(&samples) {
        assert_eq!(fix.timestamp, raw.timestamp);
        assert_eq!(fix.duration, raw.duration);
        assert!(fix.y >= raw.y);
    }
}

#[test]
fn unordered_fixations_fail_fast() {
    let samples = vec![sample(100, 0.0), sample(50, 0.0)];
    assert!(matches!(
        scroll_compensate(&samples, &[]),
        Err(GazeError::UnorderedTimestamps { index: 1 })
    ));
}

#[test]
fn unordered_scrolls_fail_fast() {
    let samples = vec![sample(0, 0.0)];
    let scrolls = vec![scroll(10, 1.0), scroll(20, 2.0), scroll(15, 3.0)];
    assert!(matches!(
        scroll_compensate(&samples, &scrolls),
        Err(GazeError::UnorderedTimestamps { index: 2 })
    ));
}

#[test]
fn scroll_events_are_extracted_from_the_event_log() {
    let events = vec![
        RawEvent::Clicked {
            timestamp: RawTime::Text("2020-09-13T12:26:40.100Z".to_owned()),
            index: 3,
        },
        RawEvent::Scroll {
            timestamp: RawTime::Text("2020-09-13T12:26:40.200Z".to_owned()),
            position: 120.0,
        },
        RawEvent::Unknown,
        RawEvent::Scroll {
            timestamp: RawTime::Millis(1_600_000_000_300.0),
            position: 240.0,
        },
    ];
    let scrolls = scroll_events(&events).expect("scrolls");
    assert_eq!(scrolls.len(), 2);
    assert_eq!(scrolls[0].position, 120.0);
    assert_eq!(scrolls[1].timestamp, at(300));
}

#[test]
fn average_duration_divides_by_sample_count() {
    let samples = vec![sample(0, 0.0), sample(10, 0.0)];
    let mut fixations = scroll_compensate(&samples, &[]).expect("compensate");
    fixations[1].duration = 400.0;
    assert_eq!(average_duration(&fixations), 300.0);
    assert_eq!(average_duration(&[]), 0.0);
}
