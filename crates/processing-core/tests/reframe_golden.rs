use std::path::{Path, PathBuf};

use reframe_common::ReframeConfig;
use reframe_processing_core::{
    OverlayText, RectangleSource, ReframePipeline, ReplaySceneDetector, SceneDetector,
    TrackingLog,
};
use reframe_schedule_model::{FrameMap, FrameNumber};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-tracking")
}

fn load_fixture() -> (FrameMap, Vec<(FrameNumber, FrameNumber)>) {
    let dir = fixture_dir();
    let rectangles =
        std::fs::read_to_string(dir.join("rectangles.json")).expect("rectangles should be readable");
    let scenes = std::fs::read_to_string(dir.join("scenes.json")).expect("scenes should be readable");

    let frames = TrackingLog::from_json(&rectangles, 5.0)
        .expect("rectangles should parse")
        .produce_frame_to_rectangle_map()
        .expect("tracking log should replay");
    let boundaries = ReplaySceneDetector::from_json(&scenes)
        .expect("scenes should parse")
        .detect(Path::new("sample.mp4"), 30.0)
        .expect("scenes should replay");

    (frames, boundaries)
}

fn config(smooth_sigma: f64) -> ReframeConfig {
    ReframeConfig {
        ratio: 5.0,
        delta: 15.0,
        smooth_sigma,
        frame_width: 1920,
        frame_height: 1080,
        ..Default::default()
    }
}

#[test]
fn unsmoothed_fixture_script_matches_golden() {
    let (frames, boundaries) = load_fixture();
    let pipeline = ReframePipeline::new(config(0.0)).unwrap();
    let schedule = pipeline.run(&frames, &boundaries).unwrap();

    let expected = std::fs::read_to_string(fixture_dir().join("expected_sigma0.txt"))
        .expect("golden script should be readable");
    let rendered = schedule.filter_script(&OverlayText::default()).render();

    assert_eq!(schedule.scenes.len(), 2);
    assert_eq!(rendered.lines().count(), expected.lines().count());
    for (index, (got, want)) in rendered.lines().zip(expected.lines()).enumerate() {
        assert_eq!(got, want, "line {index} differs");
    }
    assert_eq!(rendered, expected);
}

#[test]
fn smoothed_fixture_covers_every_frame_once() {
    let (frames, boundaries) = load_fixture();
    let pipeline = ReframePipeline::new(config(5.0)).unwrap();
    let schedule = pipeline.run(&frames, &boundaries).unwrap();

    assert_eq!(schedule.steps.len(), 120);
    for (frame, step) in schedule.steps.iter().enumerate() {
        assert_eq!(step.frame_start, frame as FrameNumber);
        assert_eq!(step.frame_end, frame as FrameNumber);
    }

    let mut width_per_frame = vec![0i64; 120];
    for directive in &schedule.directives {
        assert!(
            directive.source_within(1920, 1080),
            "{directive} leaves the frame"
        );
        assert_eq!(directive.frame_start, directive.frame_end);
        width_per_frame[directive.frame_start as usize] += directive.width;
    }
    assert!(width_per_frame.iter().all(|&width| width == 608));
}

#[test]
fn fixture_with_overlays_appends_text_after_crop() {
    let (frames, boundaries) = load_fixture();
    let pipeline = ReframePipeline::new(config(5.0)).unwrap();
    let schedule = pipeline.run(&frames, &boundaries).unwrap();

    let overlay = OverlayText {
        title: Some("Final".to_string()),
        subtitle: Some("Highlights".to_string()),
        channel: None,
        font_file: None,
    };
    let rendered = schedule.filter_script(&overlay).render();
    let lines: Vec<_> = rendered.lines().collect();

    let crop = lines
        .iter()
        .position(|line| line.starts_with("crop="))
        .expect("script should crop");
    assert_eq!(lines[crop], "crop=608:1080:0:0,");
    assert_eq!(lines.len(), crop + 3);
    assert!(lines[crop + 1].contains("text='Final'"));
    assert!(lines[crop + 2].contains("text='Highlights'"));
    assert!(!lines[crop + 2].ends_with(','));
}
