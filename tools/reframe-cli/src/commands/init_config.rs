//! Write a default configuration file.

use std::path::PathBuf;

use reframe_common::ReframeConfig;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    let config = ReframeConfig::default();
    config
        .save(&path)
        .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;

    let window = config.crop_window();
    println!("Config written to: {}", path.display());
    println!("  Ratio: {}", config.ratio);
    println!("  Delta: {} px", config.delta);
    println!("  Smoothing sigma: {}", config.smooth_sigma);
    println!(
        "  Frame: {}x{} -> window {}x{}",
        config.frame_width, config.frame_height, window.width, window.height
    );
    Ok(())
}
