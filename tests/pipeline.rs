//! End-to-end pipeline properties: frame partitioning, layout laws,
//! boundaries, and the decoupling of rendering from estimation.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use estimar::prelude::*;

fn engine(frames: usize) -> SampleMeanEngine {
    SampleMeanEngine::with_frames(frames).expect("valid engine")
}

#[test]
fn frame_sequence_has_exactly_n_elements() {
    for n in [1, 2, 7, 50, 333] {
        let mut rng = SampleRng::new(42);
        let (sequence, _) = engine(n)
            .frames(default_integrand, &mut rng)
            .expect("frames");
        assert_eq!(sequence.iter().count(), n, "n = {n}");
    }
}

#[test]
fn frame_partition_is_monotone() {
    let mut rng = SampleRng::new(42);
    let (sequence, _) = engine(40)
        .frames(default_integrand, &mut rng)
        .expect("frames");

    for (k, frame) in sequence.iter().enumerate() {
        let step = k + 1;
        assert_eq!(frame.step, step);
        let settled: Vec<usize> = frame.settled.iter().map(|r| r.index).collect();
        let expected: Vec<usize> = (1..step).collect();
        assert_eq!(settled, expected, "settled set must be exactly 1..step-1");
        assert_eq!(frame.current.index, step);
    }
}

#[test]
fn adjusted_layout_is_permutation_of_even_slots() {
    let mut rng = SampleRng::new(42);
    let config = EstimarConfig::builder()
        .frames(101)
        .layout(LayoutMode::Adjusted)
        .build();
    let (sequence, _) = SampleMeanEngine::new(config)
        .expect("engine")
        .frames(default_integrand, &mut rng)
        .expect("frames");

    let mut centers: Vec<f64> = sequence.iter().map(|f| f.current.center).collect();
    centers.sort_by(|a, b| a.partial_cmp(b).unwrap());

    for (k, c) in centers.iter().enumerate() {
        let anchor = k as f64 / 100.0;
        assert!(
            (c - anchor).abs() < 1e-12,
            "slot {k}: {c} is not anchor {anchor}"
        );
    }
}

#[test]
fn exact_layout_is_identity() {
    let mut rng = SampleRng::new(42);
    let config = EstimarConfig::builder()
        .frames(64)
        .layout(LayoutMode::Exact)
        .build();
    let (sequence, result) = SampleMeanEngine::new(config)
        .expect("engine")
        .frames(default_integrand, &mut rng)
        .expect("frames");

    let centers: Vec<f64> = sequence.iter().map(|f| f.current.center).collect();
    assert_eq!(centers, result.x);
}

#[test]
fn single_sample_scenario() {
    let mut rng = SampleRng::new(42);
    let mut renderer = CollectRenderer::new();

    let result = engine(1)
        .animate(default_integrand, &mut rng, &mut renderer)
        .expect("animate");

    let frames = renderer.frames();
    assert_eq!(frames.len(), 1);
    assert!(frames[0].settled.is_empty());
    assert_eq!(frames[0].current.index, 1);
    assert!((result.estimate - result.y[0]).abs() < f64::EPSILON);
    // Half-width is 0.5 / n
    assert!((frames[0].current.half_width - 0.5).abs() < f64::EPSILON);
}

#[test]
fn zero_samples_rejected_before_sampling() {
    let result = SampleMeanEngine::with_frames(0);
    assert!(matches!(result, Err(EstimarError::InvalidArgument { .. })));
}

#[test]
fn negative_heights_invert_vertical_extent() {
    // x³ - 0.125 is negative below x = 0.5
    let mut rng = SampleRng::new(42);
    let (sequence, _) = engine(100)
        .frames(|x| x.powi(3) - 0.125, &mut rng)
        .expect("frames");

    let mut saw_negative = false;
    for frame in &sequence {
        for rect in frame.rectangles() {
            let (y0, y1) = rect.y_extent();
            assert!(y0 <= y1, "extent must be ordered");
            if rect.height < 0.0 {
                saw_negative = true;
                assert!((y0 - rect.height).abs() < f64::EPSILON);
                assert!(y1.abs() < f64::EPSILON);
            }
        }
    }
    assert!(saw_negative, "integrand should produce negative samples");
}

#[test]
fn estimate_unaffected_by_partial_frame_consumption() {
    let config = EstimarConfig::builder().frames(60).seed(11).build();
    let engine = SampleMeanEngine::new(config).expect("engine");

    // Consume only the first three frames, as an interrupted animation would
    let mut rng1 = SampleRng::new(11);
    let (sequence, interrupted) = engine
        .frames(default_integrand, &mut rng1)
        .expect("frames");
    let consumed: Vec<FrameDescriptor> = sequence.iter().take(3).collect();
    assert_eq!(consumed.len(), 3);

    // A full run from the same seed produces the same result
    let mut rng2 = SampleRng::new(11);
    let complete = engine.run(default_integrand, &mut rng2).expect("run");

    assert_eq!(interrupted.x, complete.x);
    assert_eq!(interrupted.y, complete.y);
    assert!((interrupted.estimate - complete.estimate).abs() < f64::EPSILON);
}

#[test]
fn rendering_failure_emits_no_further_frames() {
    struct CountingFailer {
        rendered: usize,
        fail_at: usize,
    }

    impl FrameRenderer for CountingFailer {
        fn render_frame(
            &mut self,
            _frame: &FrameDescriptor,
            _style: &RectangleStyle,
        ) -> EstResult<()> {
            self.rendered += 1;
            if self.rendered == self.fail_at {
                return Err(EstimarError::rendering("simulated device loss"));
            }
            Ok(())
        }

        fn pause(&mut self) -> EstResult<()> {
            Ok(())
        }
    }

    let mut rng = SampleRng::new(42);
    let mut renderer = CountingFailer {
        rendered: 0,
        fail_at: 5,
    };

    let result = engine(20).animate(default_integrand, &mut rng, &mut renderer);

    assert!(matches!(result, Err(EstimarError::Rendering { .. })));
    assert_eq!(renderer.rendered, 5, "the call aborts at the failing frame");
}

#[test]
fn style_forwarded_untouched_to_renderer() {
    struct StyleProbe {
        seen: Option<RectangleStyle>,
    }

    impl FrameRenderer for StyleProbe {
        fn render_frame(
            &mut self,
            _frame: &FrameDescriptor,
            style: &RectangleStyle,
        ) -> EstResult<()> {
            self.seen = Some(style.clone());
            Ok(())
        }

        fn pause(&mut self) -> EstResult<()> {
            Ok(())
        }
    }

    let mut style = RectangleStyle {
        settled: "blue".to_string(),
        current: "red".to_string(),
        extra: indexmap::IndexMap::new(),
    };
    style.extra.insert("density".to_string(), "20".to_string());
    style.extra.insert("angle".to_string(), "45".to_string());

    let config = EstimarConfig::builder()
        .frames(3)
        .style(style.clone())
        .build();
    let mut rng = SampleRng::new(42);
    let mut probe = StyleProbe { seen: None };

    estimate_sample_mean(default_integrand, &config, &mut rng, &mut probe).expect("estimate");

    let seen = probe.seen.expect("style must be forwarded");
    assert_eq!(seen, style, "pass-through options must arrive verbatim");
}

#[test]
fn json_export_round_trips_frames() {
    let config = EstimarConfig::builder().frames(5).seed(3).build();
    let mut rng = SampleRng::new(config.seed());
    let mut renderer = JsonLinesRenderer::new(Vec::new());

    estimate_sample_mean(default_integrand, &config, &mut rng, &mut renderer).expect("estimate");

    let output = String::from_utf8(renderer.into_inner()).expect("utf8");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 5);

    for (k, line) in lines.iter().enumerate() {
        let value: serde_json::Value = serde_json::from_str(line).expect("valid json");
        assert_eq!(value["frame"]["step"], k + 1);
        assert_eq!(value["frame"]["n"], 5);
        assert_eq!(
            value["frame"]["settled"].as_array().map(Vec::len),
            Some(k),
            "frame {} settled count",
            k + 1
        );
    }
}
