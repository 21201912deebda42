//! Tracked rectangles and the center points derived from them.
//!
//! A [`Rectangle`] is what the tracker reports, in its resized working
//! space. A [`Center`] is its midpoint projected back into source-frame
//! pixels, truncated to whole pixels.

use serde::{Deserialize, Serialize};

/// Frame index within the source video.
pub type FrameNumber = u64;

/// An axis-aligned box as reported by a tracker: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A tracked rectangle in working space.
///
/// Invariant: `x1 <= x2`, `y1 <= y2`, `ratio > 0`. Enforced on construction
/// and on deserialization; there are no mutators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RectangleRecord")]
pub struct Rectangle {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
    frame_number: FrameNumber,
    ratio: f64,
}

/// Unvalidated wire form of [`Rectangle`].
#[derive(Debug, Deserialize)]
struct RectangleRecord {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
    frame_number: FrameNumber,
    ratio: f64,
}

impl TryFrom<RectangleRecord> for Rectangle {
    type Error = RectangleError;

    fn try_from(r: RectangleRecord) -> Result<Self, Self::Error> {
        Rectangle::new(r.x1, r.x2, r.y1, r.y2, r.frame_number, r.ratio)
    }
}

/// Reasons a rectangle can be rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RectangleError {
    #[error("frame {frame}: inverted {axis} bounds ({low} > {high})")]
    Inverted {
        frame: FrameNumber,
        axis: &'static str,
        low: f64,
        high: f64,
    },

    #[error("frame {frame}: ratio must be positive, got {ratio}")]
    NonPositiveRatio { frame: FrameNumber, ratio: f64 },

    #[error("frame {frame}: coordinates must be finite")]
    NonFinite { frame: FrameNumber },
}

impl Rectangle {
    /// Create a rectangle from its edges.
    pub fn new(
        x1: f64,
        x2: f64,
        y1: f64,
        y2: f64,
        frame_number: FrameNumber,
        ratio: f64,
    ) -> Result<Self, RectangleError> {
        let frame = frame_number;
        if ![x1, x2, y1, y2].iter().all(|v| v.is_finite()) {
            return Err(RectangleError::NonFinite { frame });
        }
        if ratio <= 0.0 || !ratio.is_finite() {
            return Err(RectangleError::NonPositiveRatio { frame, ratio });
        }
        if x1 > x2 {
            return Err(RectangleError::Inverted {
                frame,
                axis: "x",
                low: x1,
                high: x2,
            });
        }
        if y1 > y2 {
            return Err(RectangleError::Inverted {
                frame,
                axis: "y",
                low: y1,
                high: y2,
            });
        }
        Ok(Self {
            x1,
            x2,
            y1,
            y2,
            frame_number,
            ratio,
        })
    }

    /// Create a rectangle from a tracker box (`x, y, width, height`).
    pub fn from_box(
        bbox: BoundingBox,
        frame_number: FrameNumber,
        ratio: f64,
    ) -> Result<Self, RectangleError> {
        Self::new(
            bbox.x,
            bbox.x + bbox.width,
            bbox.y,
            bbox.y + bbox.height,
            frame_number,
            ratio,
        )
    }

    pub fn x1(&self) -> f64 {
        self.x1
    }

    pub fn x2(&self) -> f64 {
        self.x2
    }

    pub fn y1(&self) -> f64 {
        self.y1
    }

    pub fn y2(&self) -> f64 {
        self.y2
    }

    pub fn frame_number(&self) -> FrameNumber {
        self.frame_number
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Left edge in source pixels.
    pub fn source_x1(&self) -> f64 {
        self.x1 * self.ratio
    }

    /// Right edge in source pixels.
    pub fn source_x2(&self) -> f64 {
        self.x2 * self.ratio
    }

    /// Top edge in source pixels.
    pub fn source_y1(&self) -> f64 {
        self.y1 * self.ratio
    }

    /// Bottom edge in source pixels.
    pub fn source_y2(&self) -> f64 {
        self.y2 * self.ratio
    }

    /// Midpoint projected into source pixels.
    pub fn center(&self) -> Center {
        Center {
            x: ((self.source_x1() + self.source_x2()) / 2.0) as i64,
            y: ((self.source_y1() + self.source_y2()) / 2.0) as i64,
            frame_number: self.frame_number,
        }
    }
}

/// Midpoint of a tracked rectangle in source-frame pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Center {
    pub x: i64,
    pub y: i64,
    pub frame_number: FrameNumber,
}

impl Center {
    pub fn new(x: i64, y: i64, frame_number: FrameNumber) -> Self {
        Self { x, y, frame_number }
    }
}

impl std::fmt::Display for Center {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X: {}, Y: {}, Frame: {}", self.x, self.y, self.frame_number)
    }
}
