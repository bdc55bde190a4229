use gazeviz::GazeError;
use gazeviz::core::Viewport;
use gazeviz::render::{
    CirclePrimitive, Color, LinePrimitive, NullRenderer, RectPrimitive, RenderFrame, Renderer,
};

#[test]
fn null_renderer_counts_primitives() {
    let frame = RenderFrame::new(Viewport::new(100, 100))
        .with_rect(RectPrimitive::new(0.0, 0.0, 10.0, 10.0).with_fill(Color::rgb(1.0, 0.0, 0.0)))
        .with_line(LinePrimitive::new(0.0, 0.0, 5.0, 5.0, 1.0, Color::rgb(0.0, 0.0, 0.0)))
        .with_circle(CirclePrimitive::new(50.0, 50.0, 4.0, Color::rgba(0.0, 0.0, 1.0, 0.5)))
        .with_circle(CirclePrimitive::new(20.0, 20.0, 2.0, Color::rgba(0.0, 0.0, 1.0, 0.5)));

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render");

    assert_eq!(renderer.render_count, 1);
    assert_eq!(renderer.last_rect_count, 1);
    assert_eq!(renderer.last_line_count, 1);
    assert_eq!(renderer.last_circle_count, 2);
    assert_eq!(frame.primitive_count(), 4);
}

#[test]
fn invalid_viewport_is_rejected() {
    let frame = RenderFrame::new(Viewport::new(0, 10));
    let mut renderer = NullRenderer::default();

    assert!(matches!(
        renderer.render(&frame),
        Err(GazeError::InvalidViewport { width: 0, height: 10 })
    ));
    assert_eq!(renderer.render_count, 0);
}

#[test]
fn invalid_geometry_is_rejected() {
    let black = Color::rgb(0.0, 0.0, 0.0);
    let frames = [
        RenderFrame::new(Viewport::new(10, 10))
            .with_circle(CirclePrimitive::new(1.0, 1.0, 0.0, black)),
        RenderFrame::new(Viewport::new(10, 10))
            .with_line(LinePrimitive::new(0.0, f64::NAN, 1.0, 1.0, 1.0, black)),
        RenderFrame::new(Viewport::new(10, 10))
            .with_rect(RectPrimitive::new(0.0, 0.0, -1.0, 1.0)),
        RenderFrame::new(Viewport::new(10, 10))
            .with_rect(RectPrimitive::new(0.0, 0.0, 1.0, 1.0).with_stroke(black, 0.0)),
        RenderFrame::new(Viewport::new(10, 10))
            .with_circle(CirclePrimitive::new(1.0, 1.0, 1.0, Color::rgba(2.0, 0.0, 0.0, 1.0))),
    ];

    for frame in &frames {
        assert!(frame.validate().is_err());
    }
}

#[test]
fn clear_keeps_viewport() {
    let mut frame = RenderFrame::new(Viewport::new(30, 20))
        .with_rect(RectPrimitive::new(0.0, 0.0, 1.0, 1.0));
    assert!(!frame.is_empty());

    frame.clear();
    assert!(frame.is_empty());
    assert_eq!(frame.viewport, Viewport::new(30, 20));
}

#[test]
fn css_colors_parse_and_print() {
    let parsed = Color::parse_css("rgba(255, 128, 0, 0.5)").expect("rgba");
    assert_eq!(parsed.to_rgba8(), [255, 128, 0, 128]);

    let hsl = Color::parse_css("hsl(120, 100%, 50%)").expect("hsl");
    assert_eq!(hsl.to_rgba8(), [0, 255, 0, 255]);

    let short = Color::parse_css("#fc8").expect("hex");
    assert_eq!(short.to_rgba8(), [255, 204, 136, 255]);

    assert!(Color::parse_css("hsl(120, 100, 50)").is_err());
    assert!(Color::parse_css("teal").is_err());

    let encoded = serde_json::to_string(&Color::rgba(1.0, 0.0, 0.0, 0.5)).expect("json");
    let decoded: Color = serde_json::from_str(&encoded).expect("color");
    assert_eq!(decoded.to_rgba8(), [255, 0, 0, 128]);
}
