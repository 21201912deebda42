//! Reframe Processing Core: the reframe schedule generator.
//!
//! Converts per-frame subject positions into a smooth, scene-aware
//! horizontal reframe schedule:
//! - **Scene Segmentation:** Partition the clip at detected cuts
//! - **Motion Steps:** Jitter-threshold holds and linear ramps per scene
//! - **Trajectory Smoothing:** Gaussian pass over each scene's positions
//! - **Directive Emission:** Clamped, tiled crop-window directives
//!
//! This crate is pure computation with no I/O. Inputs and outputs are data.

pub mod capability;
pub mod directive_emit;
pub mod filter_script;
pub mod motion_steps;
pub mod pipeline;
pub mod scene_segment;
pub mod trajectory_smooth;

pub use capability::{
    track_frames, RectangleSource, ReplaySceneDetector, ReplayTracker, SceneDetector, Tracker,
    TrackerKind, TrackingLog, TrackingSession,
};
pub use directive_emit::DirectiveEmitter;
pub use filter_script::{FilterScript, OverlayText};
pub use motion_steps::MotionStepBuilder;
pub use pipeline::{ReframePipeline, Schedule};
pub use trajectory_smooth::TrajectorySmoother;
