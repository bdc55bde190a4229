use approx::assert_relative_eq;
use gazeviz::GazeError;
use gazeviz::core::{Bounds, CoordinateMapper, DEFAULT_AREA_MARGIN, Point, Viewport};

fn area() -> Bounds {
    Bounds::new(100.0, 50.0, 900.0, 700.0)
}

#[test]
fn padded_area_fills_the_canvas() {
    let mapper = CoordinateMapper::new(Viewport::new(500, 400), area(), DEFAULT_AREA_MARGIN)
        .expect("mapper");

    assert_eq!(mapper.scale(), (0.5, 0.5));
    assert_eq!(mapper.offset(), (50.0, 0.0));

    let top_left = mapper.calc_point(50.0, 0.0);
    assert_eq!(top_left, Point::new(0.0, 0.0));

    let bottom_right = mapper.calc_point(1_050.0, 800.0);
    assert_relative_eq!(bottom_right.x, 500.0);
    assert_relative_eq!(bottom_right.y, 400.0);

    let origin = mapper.calc_point(100.0, 50.0);
    assert_relative_eq!(origin.x, 25.0);
    assert_relative_eq!(origin.y, 25.0);
}

#[test]
fn zero_margin_maps_area_origin_to_canvas_origin() {
    let mapper = CoordinateMapper::new(Viewport::new(900, 350), area(), 0.0).expect("mapper");

    assert_eq!(mapper.calc_point(100.0, 50.0), Point::new(0.0, 0.0));
    assert_eq!(mapper.scale(), (1.0, 0.5));
}

#[test]
fn bounds_are_scaled_from_their_origin() {
    let mapper = CoordinateMapper::new(Viewport::new(500, 400), area(), DEFAULT_AREA_MARGIN)
        .expect("mapper");
    let mapped = mapper.calc_bounds(Bounds::new(150.0, 100.0, 200.0, 40.0));

    assert_eq!(mapped, Bounds::new(50.0, 50.0, 100.0, 20.0));
}

#[test]
fn reset_rederives_scale_and_offset() {
    let mut mapper = CoordinateMapper::new(Viewport::new(500, 400), area(), DEFAULT_AREA_MARGIN)
        .expect("mapper");
    mapper
        .reset(Bounds::new(0.0, 0.0, 400.0, 300.0))
        .expect("reset");

    assert_eq!(mapper.scale(), (1.0, 1.0));
    assert_eq!(mapper.offset(), (-50.0, -50.0));
    assert_eq!(mapper.area(), Bounds::new(0.0, 0.0, 400.0, 300.0));
}

#[test]
fn rejected_reset_leaves_mapper_untouched() {
    let mut mapper = CoordinateMapper::new(Viewport::new(500, 400), area(), DEFAULT_AREA_MARGIN)
        .expect("mapper");
    let before = mapper;

    assert!(
        mapper
            .reset(Bounds::new(0.0, 0.0, f64::NAN, 10.0))
            .is_err()
    );
    assert_eq!(mapper, before);
}

#[test]
fn resize_keeps_the_area() {
    let mut mapper = CoordinateMapper::new(Viewport::new(500, 400), area(), DEFAULT_AREA_MARGIN)
        .expect("mapper");
    mapper.resize(Viewport::new(1_000, 800)).expect("resize");

    assert_eq!(mapper.scale(), (1.0, 1.0));
    assert_eq!(mapper.offset(), (50.0, 0.0));
    assert_eq!(mapper.canvas(), Viewport::new(1_000, 800));
}

#[test]
fn invalid_inputs_are_rejected() {
    assert!(matches!(
        CoordinateMapper::new(Viewport::new(0, 400), area(), 0.0),
        Err(GazeError::InvalidViewport {
            width: 0,
            height: 400
        })
    ));
    assert!(CoordinateMapper::new(Viewport::new(10, 10), area(), -1.0).is_err());
    assert!(
        CoordinateMapper::new(Viewport::new(10, 10), Bounds::new(0.0, 0.0, 0.0, 0.0), 0.0)
            .is_err()
    );
}
