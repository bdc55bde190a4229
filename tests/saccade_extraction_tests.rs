use approx::assert_relative_eq;
use chrono::DateTime;
use gazeviz::core::{
    FixationSample, GazeTimestamp, SaccadeConfig, SaccadeStrategy, average_amplitude,
    extract_saccades,
};

fn sample(ms: f64, x: f64, y: f64, amplitude: f64, absolute: f64, relative: f64) -> FixationSample {
    FixationSample {
        timestamp: GazeTimestamp::new(
            ms,
            DateTime::from_timestamp_millis(ms as i64).expect("valid time"),
        ),
        x,
        y,
        duration: 100.0,
        saccadic_amplitude: amplitude,
        absolute_saccadic_direction: absolute,
        relative_saccadic_direction: relative,
    }
}

#[test]
fn tracker_fields_are_copied_verbatim() {
    let samples = vec![
        sample(0.0, 0.0, 0.0, 1.5, 10.0, 350.0),
        sample(100.0, 50.0, 0.0, 2.5, 190.0, 180.0),
    ];
    let saccades = extract_saccades(&samples, SaccadeStrategy::TrackerSupplied);

    assert_eq!(saccades.len(), 2);
    assert_eq!(saccades[1].timestamp, samples[1].timestamp);
    assert_eq!(saccades[1].amplitude, 2.5);
    assert_eq!(saccades[1].absolute_angle, 190.0);
    assert_eq!(saccades[1].relative_angle, 180.0);
}

#[test]
fn default_strategy_is_tracker_supplied() {
    assert_eq!(
        SaccadeConfig::default().strategy,
        SaccadeStrategy::TrackerSupplied
    );
}

#[test]
fn positions_strategy_recomputes_geometry() {
    let samples = vec![
        sample(0.0, 0.0, 0.0, 9.0, 9.0, 9.0),
        // right
        sample(100.0, 30.0, 0.0, 0.0, 0.0, 0.0),
        // straight up on screen (y decreases)
        sample(200.0, 30.0, -40.0, 0.0, 0.0, 0.0),
        // left
        sample(300.0, 0.0, -40.0, 0.0, 0.0, 0.0),
    ];
    let saccades = extract_saccades(&samples, SaccadeStrategy::FromPositions);

    assert_eq!(saccades[0].amplitude, 9.0);
    assert_eq!(saccades[0].absolute_angle, 9.0);

    assert_relative_eq!(saccades[1].amplitude, 30.0);
    assert_relative_eq!(saccades[1].absolute_angle, 0.0);

    assert_relative_eq!(saccades[2].amplitude, 40.0);
    assert_relative_eq!(saccades[2].absolute_angle, 90.0);
    assert_relative_eq!(saccades[2].relative_angle, 90.0);

    assert_relative_eq!(saccades[3].absolute_angle, 180.0);
    assert_relative_eq!(saccades[3].relative_angle, 90.0);
}

#[test]
fn recomputed_angles_stay_in_compass_range() {
    let samples = vec![
        sample(0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
        sample(100.0, 10.0, 10.0, 0.0, 0.0, 0.0),
        sample(200.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    ];
    for saccade in extract_saccades(&samples, SaccadeStrategy::FromPositions) {
        assert!((0.0..360.0).contains(&saccade.absolute_angle));
        assert!((0.0..360.0).contains(&saccade.relative_angle));
    }
}

#[test]
fn average_amplitude_of_empty_is_zero() {
    assert_eq!(average_amplitude(&[]), 0.0);

    let samples = vec![
        sample(0.0, 0.0, 0.0, 1.0, 0.0, 0.0),
        sample(1.0, 0.0, 0.0, 2.0, 0.0, 0.0),
        sample(2.0, 0.0, 0.0, 6.0, 0.0, 0.0),
    ];
    let saccades = extract_saccades(&samples, SaccadeStrategy::TrackerSupplied);
    assert_relative_eq!(average_amplitude(&saccades), 3.0);
}
