//! The reframe schedule pipeline.
//!
//! rectangles -> scenes -> centered scenes -> raw steps -> smoothed steps
//! -> directives. Scenes are processed independently and concatenated in
//! scene order, so one shot's motion never bleeds into the next.

use reframe_common::{CropWindow, ReframeConfig, ReframeError, ReframeResult};
use reframe_schedule_model::{CenteredScene, Directive, FrameMap, FrameNumber, Scene, Step};

use crate::directive_emit::DirectiveEmitter;
use crate::filter_script::{FilterScript, OverlayText};
use crate::motion_steps::MotionStepBuilder;
use crate::scene_segment::segment_scenes;
use crate::trajectory_smooth::TrajectorySmoother;

const RATIO_TOLERANCE: f64 = 1e-9;

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub scenes: Vec<CenteredScene>,
    /// Smoothed steps for all scenes, in frame order.
    pub steps: Vec<Step>,
    pub directives: Vec<Directive>,
    pub window: CropWindow,
}

impl Schedule {
    /// Render the directive stream followed by the final crop and overlays.
    pub fn filter_script(&self, overlay: &OverlayText) -> FilterScript {
        let mut script = FilterScript::new();
        script.push_directives(&self.directives);
        script.push_crop(self.window);
        script.push_overlays(overlay, self.window.width, self.window.height);
        script
    }
}

/// Configured reframe pipeline.
#[derive(Debug, Clone)]
pub struct ReframePipeline {
    config: ReframeConfig,
    builder: MotionStepBuilder,
    smoother: TrajectorySmoother,
    emitter: DirectiveEmitter,
}

impl ReframePipeline {
    /// Validate `config` and build the pipeline stages from it.
    pub fn new(config: ReframeConfig) -> ReframeResult<Self> {
        config.validate()?;
        Ok(Self {
            builder: MotionStepBuilder::new(config.delta),
            smoother: TrajectorySmoother::new(config.smooth_sigma),
            emitter: DirectiveEmitter::new(
                config.frame_width,
                config.frame_height,
                config.crop_window(),
            ),
            config,
        })
    }

    pub fn config(&self) -> &ReframeConfig {
        &self.config
    }

    /// Split the tracked frames into scenes and attach their centers.
    pub fn center_scenes(
        &self,
        rectangles: &FrameMap,
        boundaries: &[(FrameNumber, FrameNumber)],
    ) -> ReframeResult<Vec<CenteredScene>> {
        let last_frame = last_tracked_frame(rectangles)
            .ok_or_else(|| ReframeError::tracking("no tracked frames"))?;
        self.check_ratio(rectangles)?;
        let scenes = segment_scenes(boundaries, last_frame, self.config.scene_policy)?;

        Ok(scenes
            .into_iter()
            .map(|scene: Scene| CenteredScene::from_rectangles(scene, rectangles))
            .collect())
    }

    /// Every rectangle must scale back to source pixels by the configured ratio.
    fn check_ratio(&self, rectangles: &FrameMap) -> ReframeResult<()> {
        let expected = self.config.ratio;
        match rectangles
            .values()
            .flatten()
            .find(|rect| (rect.ratio() - expected).abs() > RATIO_TOLERANCE)
        {
            Some(rect) => Err(ReframeError::config(format!(
                "frame {}: rectangle ratio {} does not match configured ratio {expected}",
                rect.frame_number(),
                rect.ratio()
            ))),
            None => Ok(()),
        }
    }

    /// Raw per-scene steps.
    pub fn build_steps(&self, scenes: &[CenteredScene]) -> ReframeResult<Vec<Vec<Step>>> {
        scenes
            .iter()
            .map(|scene| {
                if scene.is_empty() {
                    tracing::warn!(
                        "Scene [{}, {}) has no tracked frames, skipping",
                        scene.scene.start,
                        scene.scene.end
                    );
                }
                self.builder.build(scene)
            })
            .collect()
    }

    /// Smooth each scene separately and concatenate.
    pub fn smooth_steps(&self, scene_steps: &[Vec<Step>]) -> Vec<Step> {
        scene_steps
            .iter()
            .flat_map(|steps| self.smoother.smooth(steps))
            .collect()
    }

    pub fn emit(&self, steps: &[Step]) -> Vec<Directive> {
        self.emitter.emit_all(steps)
    }

    /// Run the whole pipeline.
    pub fn run(
        &self,
        rectangles: &FrameMap,
        boundaries: &[(FrameNumber, FrameNumber)],
    ) -> ReframeResult<Schedule> {
        let scenes = self.center_scenes(rectangles, boundaries)?;
        let raw = self.build_steps(&scenes)?;
        let steps = self.smooth_steps(&raw);
        let directives = self.emit(&steps);

        tracing::info!(
            "Reframed {} scenes: {} steps, {} directives",
            scenes.len(),
            steps.len(),
            directives.len()
        );

        Ok(Schedule {
            scenes,
            steps,
            directives,
            window: self.config.crop_window(),
        })
    }
}

fn last_tracked_frame(rectangles: &FrameMap) -> Option<FrameNumber> {
    rectangles
        .iter()
        .map(|(&frame, rect)| rect.map_or(frame, |r| r.frame_number()))
        .max()
}
