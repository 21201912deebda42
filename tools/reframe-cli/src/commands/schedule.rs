//! Build a reframe schedule from recorded tracker output.

use std::path::{Path, PathBuf};

use reframe_common::ReframeConfig;
use reframe_processing_core::{
    OverlayText, RectangleSource, ReframePipeline, ReplaySceneDetector, SceneDetector,
    TrackerKind, TrackingLog,
};
use reframe_schedule_model::{serialize_tracking_log, FrameMap, FrameNumber};

use super::read_input;
use crate::OverlayArgs;

const DEBUG_CACHE: &str = "debug.json";

pub struct ScheduleArgs {
    pub config: ReframeConfig,
    pub rectangles: PathBuf,
    pub scenes: Option<PathBuf>,
    pub file: PathBuf,
    pub output: PathBuf,
    pub steps_json: Option<PathBuf>,
    pub tracker: String,
    pub debug: bool,
    pub overlay: OverlayArgs,
}

pub fn run(args: ScheduleArgs) -> anyhow::Result<()> {
    let tracker: TrackerKind = args.tracker.parse()?;
    println!("Reframing {} ({tracker} tracker)", args.file.display());

    let frames = load_rectangles(&args.rectangles, args.config.ratio, args.debug)?;
    println!("  Loaded {} tracked frames", frames.len());

    let boundaries = load_scenes(
        args.scenes.as_deref(),
        &args.file,
        args.config.scene_threshold,
    )?;
    if boundaries.is_empty() {
        println!("  No scene list, treating the clip as one scene");
    } else {
        println!("  Loaded {} scenes", boundaries.len());
    }

    let pipeline = ReframePipeline::new(args.config)?;
    let schedule = pipeline.run(&frames, &boundaries)?;

    if args.debug {
        for scene in &schedule.scenes {
            tracing::debug!("{scene}");
        }
    }

    let overlay = OverlayText::from(args.overlay);
    let script = schedule.filter_script(&overlay);
    std::fs::write(&args.output, script.render())
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", args.output.display()))?;

    if let Some(path) = &args.steps_json {
        std::fs::write(path, serde_json::to_string_pretty(&schedule.steps)?)?;
        println!("  Steps written to: {}", path.display());
    }

    println!(
        "  {} scenes, {} steps, {} directives",
        schedule.scenes.len(),
        schedule.steps.len(),
        schedule.directives.len()
    );
    println!(
        "  Window: {}x{}",
        schedule.window.width, schedule.window.height
    );
    println!("\nFilter script written to: {}", args.output.display());

    Ok(())
}

/// Load the rectangle map, going through the debug cache when enabled.
fn load_rectangles(path: &Path, ratio: f64, debug: bool) -> anyhow::Result<FrameMap> {
    let cache = Path::new(DEBUG_CACHE);
    if debug && cache.exists() {
        println!("  Using cached rectangles from {DEBUG_CACHE}");
        return Ok(TrackingLog::from_json(&read_input(cache)?, ratio)?
            .produce_frame_to_rectangle_map()?);
    }

    let frames = TrackingLog::from_json(&read_input(path)?, ratio)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {e}", path.display()))?
        .produce_frame_to_rectangle_map()?;

    if debug {
        std::fs::write(cache, serialize_tracking_log(&frames)?)?;
        tracing::debug!("Cached {} frames in {DEBUG_CACHE}", frames.len());
    }
    Ok(frames)
}

fn load_scenes(
    path: Option<&Path>,
    video: &Path,
    threshold: f64,
) -> anyhow::Result<Vec<(FrameNumber, FrameNumber)>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let detector = ReplaySceneDetector::from_json(&read_input(path)?)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {e}", path.display()))?;
    Ok(detector.detect(video, threshold)?)
}
