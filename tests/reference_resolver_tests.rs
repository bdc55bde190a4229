use gazeviz::core::{ReferenceView, resolve_reference, resolve_series};
use ordered_float::OrderedFloat;
use serde_json::json;

#[test]
fn path_is_resolved_against_every_present_view() {
    let stats = json!({
        "means": {"fixations": {"durations": [200.0, 210.0]}},
        "medians": {"fixations": {"durations": [190.0, 195.0]}},
        "upperQuantile": {"fixations": {}}
    });
    let references = resolve_series(&stats, "fixations.durations").expect("references");

    assert_eq!(references.means, Some(vec![200.0, 210.0]));
    assert_eq!(references.medians, Some(vec![190.0, 195.0]));
    assert_eq!(references.upper_quantile, None);
    assert_eq!(references.lower_quantile, None);

    let views: Vec<ReferenceView> = references.iter().map(|(view, _)| view).collect();
    assert_eq!(views, vec![ReferenceView::Means, ReferenceView::Medians]);
}

#[test]
fn view_qualified_path_resolves_one_view() {
    let stats = json!({
        "means": {"forward": [1, 2, 3]},
        "medians": {"forward": [4, 5, 6]}
    });
    let references = resolve_series(&stats, "means.forward").expect("references");

    assert_eq!(references.means, Some(vec![1.0, 2.0, 3.0]));
    assert!(references.medians.is_none());
}

#[test]
fn angle_maps_are_keyed_by_degrees() {
    let stats = json!({
        "means": {"directions": {"0": 4.5, "45": 1.0, "315": 2.0}}
    });
    let references = resolve_reference(&stats, "directions").expect("references");
    let angles = references
        .means
        .as_ref()
        .and_then(|value| value.as_angles())
        .expect("angle map");

    assert_eq!(angles.get(&OrderedFloat(0.0)), Some(&4.5));
    assert_eq!(angles.get(&OrderedFloat(315.0)), Some(&2.0));
    assert_eq!(angles.len(), 3);
}

#[test]
fn missing_path_gives_empty_references() {
    let stats = json!({"means": {"other": [1]}});
    let references = resolve_reference(&stats, "saccades.amplitudes").expect("references");
    assert!(references.is_empty());
}

#[test]
fn malformed_leaves_and_paths_are_errors() {
    let stats = json!({"means": {"durations": "slow", "angles": {"north": 1}}});

    assert!(resolve_reference(&stats, "durations").is_err());
    assert!(resolve_reference(&stats, "angles").is_err());
    assert!(resolve_reference(&stats, " . ").is_err());
}

#[test]
fn angle_map_is_not_a_series() {
    let stats = json!({"means": {"directions": {"0": 1.0}}});
    assert!(resolve_series(&stats, "directions").is_err());
}

#[test]
fn references_serialize_present_views_only() {
    let stats = json!({"lowerQuantile": {"hits": [0.5]}});
    let references = resolve_series(&stats, "hits").expect("references");

    let encoded = serde_json::to_value(&references).expect("json");
    assert_eq!(encoded, json!({"lowerQuantile": [0.5]}));
}
