use gazeviz::api::{BinningConfig, VIZ_CONFIG_JSON_SCHEMA_V1};
use gazeviz::core::{SaccadeStrategy, TimeRange};
use gazeviz::render::Color;
use gazeviz::{GazeError, VizConfig};

#[test]
fn empty_document_is_the_default_config() {
    let config = VizConfig::from_json_str("{}").expect("config");
    assert_eq!(config, VizConfig::default());
}

#[test]
fn defaults_match_documented_values() {
    let config = VizConfig::default();

    assert_eq!(config.binning.time_bin_secs, 10.0);
    assert_eq!(config.binning.duration_bounds.len(), 9);
    assert_eq!(config.binning.amplitude_bounds[5], 7.5);
    assert_eq!(config.directions.angle_bins, 8);
    assert_eq!(config.saccades.strategy, SaccadeStrategy::TrackerSupplied);
    assert_eq!(config.painter.area_margin, 0.0);
    assert_eq!(config.painter.fix_plot.pixels_per_second, 20.0);
    assert_eq!(config.heatmap.area_margin, 100.0);
    assert_eq!(config.heatmap.options.intensity, 200.0);
}

#[test]
fn contract_round_trips() {
    let config = VizConfig::default()
        .with_binning(BinningConfig::default().with_time_bin_secs(20.0));
    let json = config.to_json_contract_v1_pretty().expect("contract");

    assert!(json.contains(&format!("\"schema_version\": {VIZ_CONFIG_JSON_SCHEMA_V1}")));
    let parsed = VizConfig::from_json_str(&json).expect("parse contract");
    assert_eq!(parsed.binning, config.binning);
    assert_eq!(parsed.directions, config.directions);
    assert_eq!(parsed.heatmap, config.heatmap);
    // colors travel as CSS text, so they survive at byte precision
    assert_eq!(
        parsed.palette.primary.to_rgba8(),
        config.palette.primary.to_rgba8()
    );
    assert_eq!(
        parsed.painter.targets.correct_fill.to_rgba8(),
        config.painter.targets.correct_fill.to_rgba8()
    );
}

#[test]
fn plain_document_round_trips() {
    let mut config = VizConfig::default();
    config.painter.fix_plot = config
        .painter
        .fix_plot
        .with_time_range(TimeRange::new(2_000.0, 1_000.0));
    config.saccades.strategy = SaccadeStrategy::FromPositions;

    let json = config.to_json_pretty().expect("json");
    assert!(json.contains("\"from_positions\""));

    let parsed = VizConfig::from_json_str(&json).expect("parse");
    assert_eq!(
        parsed.painter.fix_plot.time_range,
        Some(TimeRange::new(1_000.0, 2_000.0))
    );
    assert_eq!(parsed.saccades.strategy, SaccadeStrategy::FromPositions);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = VizConfig::from_json_str(
        r##"{
            "binning": {"time_bin_secs": 5},
            "painter": {"targets": {"correct_fill": "#00ff00"}},
            "heatmap": {"options": {"intensity": 350}}
        }"##,
    )
    .expect("config");

    assert_eq!(config.binning.time_bin_secs, 5.0);
    assert_eq!(config.binning.duration_bounds[0], 100.0);
    assert_eq!(
        config.painter.targets.correct_fill,
        Color::rgb(0.0, 1.0, 0.0)
    );
    assert_eq!(config.heatmap.options.intensity, 350.0);
    assert_eq!(config.heatmap.options.pixels_per_second, 50.0);
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let err = VizConfig::from_json_str(r#"{"schema_version": 2, "config": {}}"#)
        .expect_err("version 2");
    assert!(matches!(err, GazeError::InvalidData(message) if message.contains("version")));
}

#[test]
fn invalid_values_fail_validation() {
    assert!(VizConfig::from_json_str(r#"{"binning": {"time_bin_secs": -1}}"#).is_err());
    assert!(
        VizConfig::from_json_str(r#"{"binning": {"duration_bounds": [200, 100]}}"#).is_err()
    );
    assert!(
        VizConfig::from_json_str(r#"{"directions": {"angle_bins": 0}}"#).is_err()
    );
    assert!(
        VizConfig::from_json_str(r#"{"palette": {"primary": "not a color"}}"#).is_err()
    );
    assert!(VizConfig::from_json_str("[").is_err());
}
