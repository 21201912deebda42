//! Write only the text overlay lines, without running the pipeline.

use std::path::PathBuf;

use reframe_processing_core::{FilterScript, OverlayText};

use crate::OverlayArgs;

pub fn run(output: PathBuf, width: u32, height: u32, overlay: OverlayArgs) -> anyhow::Result<()> {
    println!("Dry run: writing overlays for a {width}x{height} frame");

    // All three lines are written, blank when not given.
    let overlay = OverlayText {
        title: Some(overlay.title.unwrap_or_default()),
        subtitle: Some(overlay.subtitle.unwrap_or_default()),
        channel: Some(overlay.channel.unwrap_or_default()),
        font_file: overlay.font_file,
    };

    let mut script = FilterScript::new();
    script.push_overlays(&overlay, width, height);
    std::fs::write(&output, script.render())
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", output.display()))?;

    println!("Overlay script written to: {}", output.display());
    Ok(())
}
