//! Motion step building: jitter-threshold segmentation of a scene's centers.
//!
//! # Algorithm
//!
//! 1. **Anchor** on the first center's `x`.
//! 2. **Scan** centers in frame order. A center whose `x` stays within
//!    `delta` of the anchor is absorbed into the current hold.
//! 3. **Ramp** when a center moves further than `delta`: the pending hold is
//!    flushed at the anchor position, then `x` is interpolated linearly from
//!    the last held frame to the moving center's frame, which becomes the
//!    new anchor.
//! 4. **Tail**: frames after the last ramp hold the last seen `(x, y)`.
//!
//! Ramps carry `y = 0` and holds before the tail do too, so the window
//! only moves vertically once, where the tail begins. With the default
//! full-height window the emitter clamps `y` to the top row either way.
//!
//! The resulting steps cover every frame from the first to the last center
//! exactly once, and never jump: large motion always becomes a ramp.

use reframe_common::{ReframeError, ReframeResult};
use reframe_schedule_model::{Center, CenterSample, CenteredScene, FrameNumber, Step};

/// A run of frames with one kind of motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionSegment {
    /// Position held on `[start, end]`.
    Hold {
        start: FrameNumber,
        end: FrameNumber,
        x: f64,
        y: f64,
    },
    /// Linear motion reaching `to_x` at `end`. The ramp starts from `from_x`
    /// at frame `start - 1`, so its first step is already one increment in.
    Ramp {
        start: FrameNumber,
        end: FrameNumber,
        from_x: f64,
        to_x: f64,
    },
}

impl MotionSegment {
    pub fn start(&self) -> FrameNumber {
        match *self {
            MotionSegment::Hold { start, .. } | MotionSegment::Ramp { start, .. } => start,
        }
    }

    pub fn end(&self) -> FrameNumber {
        match *self {
            MotionSegment::Hold { end, .. } | MotionSegment::Ramp { end, .. } => end,
        }
    }

    pub fn is_ramp(&self) -> bool {
        matches!(self, MotionSegment::Ramp { .. })
    }

    /// Expand into one step per frame.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        (self.start()..=self.end()).map(move |frame| match *self {
            MotionSegment::Hold { x, y, .. } => Step::single(x, y, frame),
            MotionSegment::Ramp {
                start,
                end,
                from_x,
                to_x,
            } => {
                let origin = start - 1;
                let t = (frame - origin) as f64 / (end - origin) as f64;
                Step::single(from_x + (to_x - from_x) * t, 0.0, frame)
            }
        })
    }
}

/// Builds dense per-frame step lists from a scene's centers.
#[derive(Debug, Clone, Copy)]
pub struct MotionStepBuilder {
    delta: f64,
}

impl MotionStepBuilder {
    /// Create a builder with the given jitter threshold in pixels.
    pub fn new(delta: f64) -> Self {
        Self { delta }
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Segment a scene into holds and ramps.
    ///
    /// Fails with [`ReframeError::UpstreamGap`] if any center is lost.
    /// A scene without centers yields no segments.
    pub fn segments(&self, scene: &CenteredScene) -> ReframeResult<Vec<MotionSegment>> {
        let centers = tracked_centers(scene)?;
        let (Some(first), Some(last)) = (centers.first(), centers.last()) else {
            return Ok(Vec::new());
        };

        let mut segments = Vec::new();
        let mut anchor_x = first.x as f64;
        // First frame not yet covered by a segment.
        let mut pending = first.frame_number;
        // Last frame whose center stayed within the threshold.
        let mut held = first.frame_number;

        for center in &centers {
            let x = center.x as f64;
            let frame = center.frame_number;
            let changed = (x - anchor_x).abs() > self.delta;

            if changed && frame > held {
                if pending <= held {
                    segments.push(MotionSegment::Hold {
                        start: pending,
                        end: held,
                        x: anchor_x,
                        y: 0.0,
                    });
                }
                segments.push(MotionSegment::Ramp {
                    start: held + 1,
                    end: frame,
                    from_x: anchor_x,
                    to_x: x,
                });
                pending = frame + 1;
                held = frame;
                anchor_x = x;
            } else if frame > held {
                held = frame;
            }
        }

        if pending <= last.frame_number {
            segments.push(MotionSegment::Hold {
                start: pending,
                end: last.frame_number,
                x: last.x as f64,
                y: last.y as f64,
            });
        }

        Ok(segments)
    }

    /// Build the dense step list for a scene.
    pub fn build(&self, scene: &CenteredScene) -> ReframeResult<Vec<Step>> {
        let segments = self.segments(scene)?;
        let steps: Vec<Step> = segments.iter().flat_map(MotionSegment::steps).collect();

        tracing::debug!(
            "Scene [{}, {}): {} segments ({} ramps), {} steps",
            scene.scene.start,
            scene.scene.end,
            segments.len(),
            segments.iter().filter(|s| s.is_ramp()).count(),
            steps.len()
        );
        Ok(steps)
    }
}

fn tracked_centers(scene: &CenteredScene) -> ReframeResult<Vec<Center>> {
    scene
        .centers
        .iter()
        .map(|sample| match sample {
            CenterSample::Tracked(center) => Ok(*center),
            CenterSample::Lost { frame_number } => Err(ReframeError::upstream_gap(*frame_number)),
        })
        .collect()
}
