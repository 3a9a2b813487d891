//! End-to-end drift scenarios through the public API.

use bubbledrift::params::landing_bubbles;
use bubbledrift::{
    BubbleField, DriftParams, EntitySpec, FrameLoop, InstanceBuffer, NoiseEngine, SceneConfig,
    StyleSink,
};
use noise::NoiseFn;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn single_bubble_ten_ticks() {
    let mut rng = StdRng::seed_from_u64(2019);
    let mut field = BubbleField::with_rng(
        &[EntitySpec::new(100.0, 50.0)],
        DriftParams::default(),
        NoiseEngine::new(0.0),
        &mut rng,
    );
    let mut sink = StyleSink::new(1);
    FrameLoop::run_frames(&mut field, &mut sink, 10).unwrap();

    let bubble = &field.bubbles()[0];
    assert!((bubble.base().x - (100.0 - 10.0 * 0.3)).abs() < 1e-9);

    let reference = NoiseEngine::new(0.0);
    let phase = bubble.phase();
    let offset = bubble.perturbed() - bubble.base();
    assert!((offset.x - 5.0 * reference.simplex2(phase.x, 0.0)).abs() < 1e-9);
    assert!((offset.y - 5.0 * reference.simplex2(phase.y, 0.0)).abs() < 1e-9);
}

#[test]
fn same_seed_same_animation() {
    let run = || {
        let mut rng = StdRng::seed_from_u64(77);
        let mut field = BubbleField::with_rng(
            &landing_bubbles(),
            DriftParams::default(),
            NoiseEngine::new(4321.0),
            &mut rng,
        );
        let mut sink = InstanceBuffer::new();
        FrameLoop::run_frames(&mut field, &mut sink, 120).unwrap();
        sink.as_bytes().to_vec()
    };
    assert_eq!(run(), run());
}

#[test]
fn every_bubble_eventually_wraps() {
    // Fast drift so the full 3000px cycle happens quickly
    let params = DriftParams {
        scroll_speed: 50.0,
        ..Default::default()
    };
    let mut field = BubbleField::new(&landing_bubbles(), params, NoiseEngine::new(1.0));
    let start_y: Vec<f64> = field.bubbles().iter().map(|b| b.base().y).collect();
    let mut wrapped = vec![false; field.len()];

    for _ in 0..70 {
        let before: Vec<f64> = field.bubbles().iter().map(|b| b.base().x).collect();
        field.step();
        for (bubble, prev) in field.bubbles().iter().zip(before) {
            let x = bubble.base().x;
            assert!(x >= params.wrap_threshold && x <= params.canvas_width + 100.0);
            if x > prev {
                assert_eq!(x, params.canvas_width);
                wrapped[bubble.index()] = true;
            }
        }
    }
    assert!(wrapped.iter().all(|w| *w));

    // y never drifts
    let end_y: Vec<f64> = field.bubbles().iter().map(|b| b.base().y).collect();
    assert_eq!(start_y, end_y);
    assert_eq!(field.len(), 33);
}

#[test]
fn scene_file_drives_field() {
    let scene = SceneConfig::from_json(
        r#"{
            "seed": 42,
            "params": { "noise_amount": 0 },
            "bubbles": [ { "s": 0.6, "x": 1134, "y": 45 }, { "x": 75, "y": 103 } ]
        }"#,
    )
    .unwrap();
    let mut field = BubbleField::from_scene(&scene);
    let mut sink = StyleSink::new(field.len());
    field.update(&mut sink).unwrap();

    assert_eq!(sink.style(0), Some("translate(1133.7px, 45px) scale(0.6)"));
    assert_eq!(sink.style(1), Some("translate(74.7px, 103px) scale(1)"));
}

#[test]
fn engine_composes_with_noise_crate() {
    let engine = NoiseEngine::new(9.0);
    let value = NoiseFn::<f64, 2>::get(&engine, [1.5, 2.5]);
    assert_eq!(value, engine.simplex2(1.5, 2.5));
    assert_eq!(
        NoiseFn::<f64, 3>::get(&engine.perlin(), [0.25, 0.5, 0.75]),
        engine.perlin3(0.25, 0.5, 0.75)
    );
}
