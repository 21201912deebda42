//! Directive emission: place the crop window for each step.
//!
//! The window is centered on the step and clamped into the frame. When its
//! left edge would land within one window-width of column 0, the window
//! cannot be swapped in one piece, so it is assembled from `x2`-wide tiles
//! instead.

use reframe_common::CropWindow;
use reframe_schedule_model::{Directive, Step};

/// Turns smoothed steps into compositor directives.
#[derive(Debug, Clone, Copy)]
pub struct DirectiveEmitter {
    frame_width: i64,
    frame_height: i64,
    width: i64,
    height: i64,
}

impl DirectiveEmitter {
    pub fn new(frame_width: u32, frame_height: u32, window: CropWindow) -> Self {
        Self {
            frame_width: frame_width as i64,
            frame_height: frame_height as i64,
            width: window.width as i64,
            height: window.height as i64,
        }
    }

    /// Directives for a single step, in output order.
    pub fn emit(&self, step: &Step) -> Vec<Directive> {
        let (width, height) = (self.width, self.height);
        let center_x = step.x as i64;
        let center_y = step.y as i64;

        let mut x2 = (center_x as f64 - width as f64 / 2.0) as i64;
        let mut y2 = (center_y as f64 - height as f64 / 2.0) as i64;

        if y2 < 0 {
            y2 = 0;
        }
        if y2 + height > self.frame_height {
            y2 = self.frame_height - height;
        }

        // Re-center rather than clamp to 0; a zero-width band cannot be tiled.
        if x2 <= 0 {
            x2 = (width / 2).max(1);
        }

        if x2 < width {
            return self.tiles(x2, y2, step);
        }

        if x2 + width > self.frame_width {
            x2 = self.frame_width - width;
        }

        vec![Directive {
            width,
            height,
            dst_x: 0,
            dst_y: 0,
            src_x: x2,
            src_y: y2,
            frame_start: step.frame_start,
            frame_end: step.frame_end,
        }]
    }

    /// Directives for every step, concatenated in step order.
    pub fn emit_all(&self, steps: &[Step]) -> Vec<Directive> {
        steps.iter().flat_map(|step| self.emit(step)).collect()
    }

    /// Assemble the window from `band`-wide tiles: tile `i` fills destination
    /// columns `[i * band, (i + 1) * band)` from the band to its right.
    ///
    /// Sources are pulled back inside the frame, which only matters when the
    /// window is wider than half the frame.
    fn tiles(&self, band: i64, y2: i64, step: &Step) -> Vec<Directive> {
        let full = self.width / band;
        let rest = self.width % band;

        let tile = |dst_x: i64, width: i64| Directive {
            width,
            height: self.height,
            dst_x,
            dst_y: 0,
            src_x: (dst_x + band).min(self.frame_width - width),
            src_y: y2,
            frame_start: step.frame_start,
            frame_end: step.frame_end,
        };

        let mut directives: Vec<Directive> = (0..full).map(|i| tile(i * band, band)).collect();
        if rest > 0 {
            directives.push(tile(full * band, rest));
        }
        directives
    }
}
