//! Per-frame reframe positions.

use serde::{Deserialize, Serialize};

use crate::geometry::FrameNumber;

/// One frame's resolved reframe position in source-frame pixels.
///
/// `x` is kept fractional through step building and smoothing; the
/// directive emitter truncates it to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub x: f64,
    pub y: f64,
    pub frame_start: FrameNumber,
    pub frame_end: FrameNumber,
}

impl Step {
    pub fn new(x: f64, y: f64, frame_start: FrameNumber, frame_end: FrameNumber) -> Self {
        Self {
            x,
            y,
            frame_start,
            frame_end,
        }
    }

    /// A step active on exactly one frame.
    pub fn single(x: f64, y: f64, frame: FrameNumber) -> Self {
        Self::new(x, y, frame, frame)
    }

    /// Same step with a different horizontal position.
    pub fn with_x(self, x: f64) -> Self {
        Self { x, ..self }
    }
}
