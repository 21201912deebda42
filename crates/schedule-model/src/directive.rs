//! Crop/pan directives for the downstream compositor.
//!
//! The compositor primitive is ffmpeg's `swaprect`, which exchanges two
//! equally sized rectangles of the frame. Every directive swaps a
//! destination band (where the output window is assembled, left-aligned at
//! the top of the frame) with the source band holding the subject.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::FrameNumber;

/// A single `swaprect` instruction active on `[frame_start, frame_end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub width: i64,
    pub height: i64,
    pub dst_x: i64,
    pub dst_y: i64,
    pub src_x: i64,
    pub src_y: i64,
    pub frame_start: FrameNumber,
    pub frame_end: FrameNumber,
}

impl Directive {
    /// Source band as `(x, y, width, height)`.
    pub fn source_rect(&self) -> (i64, i64, i64, i64) {
        (self.src_x, self.src_y, self.width, self.height)
    }

    /// Destination band as `(x, y, width, height)`.
    pub fn destination_rect(&self) -> (i64, i64, i64, i64) {
        (self.dst_x, self.dst_y, self.width, self.height)
    }

    /// Whether the source band lies inside a `frame_width x frame_height` frame.
    pub fn source_within(&self, frame_width: i64, frame_height: i64) -> bool {
        self.src_x >= 0
            && self.src_y >= 0
            && self.src_x + self.width <= frame_width
            && self.src_y + self.height <= frame_height
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "swaprect={}:{}:{}:{}:{}:{}:enable='between(n,{},{})'",
            self.width,
            self.height,
            self.dst_x,
            self.dst_y,
            self.src_x,
            self.src_y,
            self.frame_start,
            self.frame_end
        )
    }
}
