//! Filter script rendering.
//!
//! The output is an ffmpeg filter script: one filter per line, joined by
//! `",\n"`. Reframe directives come first, then the final crop to the
//! window, then optional text overlays.

use reframe_common::CropWindow;
use reframe_schedule_model::Directive;
use serde::{Deserialize, Serialize};

/// Default font for overlay text.
pub const DEFAULT_FONT_FILE: &str = "./AGENCYB.ttf";

/// Text drawn on top of the reframed video.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverlayText {
    /// Large line near the bottom edge.
    pub title: Option<String>,
    /// Smaller line just below the title.
    pub subtitle: Option<String>,
    /// Channel label near the top edge.
    pub channel: Option<String>,
    /// Font file passed to `drawtext`. `None` uses [`DEFAULT_FONT_FILE`].
    pub font_file: Option<String>,
}

impl OverlayText {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.subtitle.is_none() && self.channel.is_none()
    }

    fn font(&self) -> &str {
        self.font_file.as_deref().unwrap_or(DEFAULT_FONT_FILE)
    }
}

/// An ordered list of filters rendered as a script.
#[derive(Debug, Clone, Default)]
pub struct FilterScript {
    filters: Vec<String>,
}

impl FilterScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn push(&mut self, filter: impl Into<String>) {
        self.filters.push(filter.into());
    }

    pub fn push_directives(&mut self, directives: &[Directive]) {
        self.filters
            .extend(directives.iter().map(|directive| directive.to_string()));
    }

    /// Crop the assembled window out of the top-left corner.
    pub fn push_crop(&mut self, window: CropWindow) {
        self.push(format!("crop={}:{}:0:0", window.width, window.height));
    }

    /// Overlay lines laid out for a `width x height` output.
    pub fn push_overlays(&mut self, overlay: &OverlayText, width: u32, height: u32) {
        let font = overlay.font();
        if let Some(title) = &overlay.title {
            self.push(format!(
                "drawtext=fontfile={font}:text='{}':fontcolor=white:fontsize=(h/35):x=({width}-text_w)/2:y=({height}-text_h-{height}/30)",
                escape_text(title)
            ));
        }
        if let Some(subtitle) = &overlay.subtitle {
            self.push(format!(
                "drawtext=fontfile={font}:text='{}':fontcolor=white:fontsize=(h/55):x=({width}-text_w)/2:y=({height}+15-{height}/30)",
                escape_text(subtitle)
            ));
        }
        if let Some(channel) = &overlay.channel {
            self.push(format!(
                "drawtext=fontfile={font}:text='{}':fontcolor=white:fontsize=(h/55):x=({width}-text_w)/2:y=({height}/30)",
                escape_text(channel)
            ));
        }
    }

    pub fn render(&self) -> String {
        if self.filters.is_empty() {
            return String::new();
        }
        let mut out = self.filters.join(",\n");
        out.push('\n');
        out
    }
}

/// Close the quote, emit an escaped quote, and reopen it.
fn escape_text(text: &str) -> String {
    text.replace('\'', r"'\''")
}
