use chrono::DateTime;
use gazeviz::core::{
    DirectionConfig, GazeTimestamp, Saccade, amplitude_ranges, count_in_ranges,
};

fn saccade(amplitude: f64, angle: f64) -> Saccade {
    Saccade {
        timestamp: GazeTimestamp::new(
            0.0,
            DateTime::from_timestamp_millis(0).expect("valid time"),
        ),
        amplitude,
        absolute_angle: angle,
        relative_angle: 0.0,
    }
}

#[test]
fn samples_go_into_the_first_bound_they_are_below() {
    let durations = [50.0, 100.0, 150.0, 199.9, 200.0, 450.0];
    let ranges = count_in_ranges(&durations, |d| *d, &[100.0, 200.0, 300.0]).expect("ranges");

    assert_eq!(ranges.len(), 4);
    let counts: Vec<usize> = ranges.iter().map(|range| range.count).collect();
    assert_eq!(counts, vec![1, 3, 1, 1]);
    assert_eq!(ranges[0].upper, Some(100.0));
    assert_eq!(ranges[3].upper, None);
}

#[test]
fn range_counts_add_up() {
    let values: Vec<f64> = (0..500).map(|v| f64::from(v) * 7.3).collect();
    let bounds = [100.0, 200.0, 300.0, 400.0, 500.0, 750.0, 1_000.0, 1_500.0, 2_000.0];
    let ranges = count_in_ranges(&values, |v| *v, &bounds).expect("ranges");

    assert_eq!(ranges.len(), bounds.len() + 1);
    assert_eq!(
        ranges.iter().map(|range| range.count).sum::<usize>(),
        values.len()
    );
}

#[test]
fn empty_bounds_collect_everything_in_rest() {
    let ranges = count_in_ranges(&[1.0, 2.0], |v| *v, &[]).expect("ranges");
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].count, 2);
    assert_eq!(ranges[0].upper, None);
}

#[test]
fn unsorted_bounds_are_rejected() {
    assert!(count_in_ranges(&[1.0], |v| *v, &[200.0, 100.0]).is_err());
    assert!(count_in_ranges(&[1.0], |v| *v, &[100.0, 100.0]).is_err());
    assert!(count_in_ranges(&[1.0], |v| *v, &[f64::NAN]).is_err());
}

#[test]
fn amplitude_ranges_split_by_cone_and_skip_other() {
    let saccades = vec![
        saccade(0.5, 10.0),
        saccade(3.5, 350.0),
        saccade(25.0, 0.0),
        saccade(1.5, 180.0),
        saccade(1.5, 90.0),
        saccade(8.0, 270.0),
    ];
    let ranges = amplitude_ranges(&saccades, &[1.0, 2.0, 4.0], &DirectionConfig::default())
        .expect("ranges");

    let forward: Vec<usize> = ranges.forward.iter().map(|range| range.count).collect();
    let backward: Vec<usize> = ranges.backward.iter().map(|range| range.count).collect();
    assert_eq!(forward, vec![1, 0, 1, 1]);
    assert_eq!(backward, vec![0, 1, 0, 0]);
}
