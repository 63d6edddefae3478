//! End-to-end scenarios: scene -> accumulator -> presentation

// Tests are allowed to use unwrap for cleaner error messages
#![allow(clippy::unwrap_used)]

use splat_core::prelude::*;

fn renderer(power: u32, smoothing: f32) -> Renderer {
    Renderer::new(Resolution::from_power(power).unwrap()).with_params(SplatParams {
        smoothing,
        ..SplatParams::default()
    })
}

#[test]
fn two_circles_merge_without_seam() {
    let scene = Scene::new(vec![
        Primitive::circle(Vec2::new(-0.3, 0.0), 0.3),
        Primitive::circle(Vec2::new(0.3, 0.0), 0.3),
    ]);
    let r = renderer(6, 0.05);

    // Each circle alone reports exactly 0 at the midpoint; merged is inside
    let (d, _) = r.sample(&scene, Vec2::ZERO);
    assert!(d < 0.0, "midpoint distance {d}");

    // The merged blob is connected along the x axis
    for i in -50..=50 {
        let x = i as f32 * 0.01;
        let (d, _) = r.sample(&scene, Vec2::new(x, 0.0));
        assert!(d <= 0.0, "gap at x={x}: {d}");
    }
}

#[test]
fn difference_hollows_the_center() {
    let scene = Scene::new(vec![
        Primitive::circle(Vec2::ZERO, 0.5),
        Primitive::circle(Vec2::ZERO, 0.2).with_mode(BlendMode::Difference),
    ]);
    let r = renderer(6, 0.04);

    let (center, _) = r.sample(&scene, Vec2::ZERO);
    assert!(center > 0.0, "origin should be outside, got {center}");

    let (ring, _) = r.sample(&scene, Vec2::new(0.35, 0.0));
    assert!(ring < 0.0, "ring should be inside, got {ring}");
}

#[test]
fn empty_scene_presents_background_everywhere() {
    let background = Rgba::new(0.25, 0.5, 0.75, 1.0);
    let r = renderer(5, 0.04).with_presentation(Presentation {
        background,
        ..Presentation::default()
    });

    let presented = r.present(&Scene::default());
    assert_eq!(presented.dimensions(), (32, 32));
    assert!(presented.iter().all(|&c| c == background));

    let image = r.render(&Scene::default()).unwrap();
    let expected = background.to_rgba8();
    assert!(image.pixels().all(|p| p.0 == expected));
}

#[test]
fn union_never_pushes_pixels_outward() {
    let params = SplatParams::default();
    let scene = Scene::seeded_row(8, 11);
    let mut state = AccumulatorState::new(Resolution::from_power(5).unwrap(), CLEAR_DISTANCE);

    for primitive in &scene.primitives {
        let next = state.splat(primitive, &params);
        for (before, after) in state.distance().iter().zip(next.distance().iter()) {
            assert!(*after <= *before + 1e-6, "{after} > {before}");
        }
        state = next;
    }
}

#[test]
fn ping_pong_matches_repeated_pure_splats() {
    let params = SplatParams::default();
    let scene = Scene::seeded_row(5, 2);
    let res = Resolution::from_power(4).unwrap();

    let folded = scene
        .primitives
        .iter()
        .fold(AccumulatorState::new(res, CLEAR_DISTANCE), |s, p| s.splat(p, &params));
    let ping_pong = accumulate(AccumulatorState::new(res, CLEAR_DISTANCE), &scene.primitives, &params);

    assert_eq!(folded, ping_pong);
}

#[test]
fn splat_into_reuses_buffers() {
    let params = SplatParams::default();
    let res = Resolution::from_power(4).unwrap();
    let prev = AccumulatorState::new(res, CLEAR_DISTANCE);
    let mut next = AccumulatorState::new(res, CLEAR_DISTANCE);
    let circle = Primitive::circle(Vec2::ZERO, 0.4);

    prev.splat_into(&mut next, &circle, &params).unwrap();
    assert_eq!(next, prev.splat(&circle, &params));
}

#[test]
fn mismatched_buffers_are_rejected() {
    let distance = Field::new(16, 16, CLEAR_DISTANCE);
    let color = Field::new(32, 32, Rgba::TRANSPARENT);
    let err = AccumulatorState::from_parts(distance, color).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { .. }));
    assert!(err.to_string().contains("Dimension mismatch"));
}

#[test]
fn accumulated_fill_shows_first_circle_color() {
    let scene = Scene::new(vec![
        Primitive::circle(Vec2::new(-0.5, 0.0), 0.4).with_color([1.0, 0.0, 0.0]),
        Primitive::circle(Vec2::new(0.5, 0.0), 0.4).with_color([0.0, 0.0, 1.0]),
    ]);
    let r = renderer(5, 0.04)
        .with_presentation(Presentation::default().with_fill_mode(FillMode::Accumulated));
    let image = r.render(&scene).unwrap();

    // Row 16 from the top sits just below y = 0
    let left = image.get_pixel(8, 16).0;
    let right = image.get_pixel(24, 16).0;
    assert_eq!(left, [255, 0, 0, 255]);
    assert!(right[2] > right[0], "right pixel {right:?}");
}
