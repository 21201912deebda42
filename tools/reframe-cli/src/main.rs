//! Reframe CLI: turn tracker output into a portrait crop filter script.
//!
//! Usage:
//!   reframe schedule [OPTIONS]      Build the reframe schedule and filter script
//!   reframe overlay [OPTIONS]       Write only the text overlay lines (dry run)
//!   reframe init-config <PATH>      Write a default configuration file

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "reframe",
    about = "Reframe landscape footage into a tracked portrait crop",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (JSON). Missing files fall back to defaults.
    #[arg(short, long, global = true, default_value = "reframe.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Text drawn over the output.
#[derive(Args, Debug, Default)]
pub struct OverlayArgs {
    /// Title line near the bottom edge
    #[arg(long)]
    pub title: Option<String>,

    /// Subtitle line below the title
    #[arg(long)]
    pub subtitle: Option<String>,

    /// Channel label near the top edge
    #[arg(long)]
    pub channel: Option<String>,

    /// Font file used by the text overlays
    #[arg(long)]
    pub font_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the reframe schedule from recorded tracker output
    Schedule {
        /// Tracking log (JSON array of rectangles, `null` for lost frames)
        #[arg(short, long)]
        rectangles: PathBuf,

        /// Scene list (JSON array of [start, end] pairs). Omit for a single scene.
        #[arg(short, long)]
        scenes: Option<PathBuf>,

        /// Video the tracking was recorded from
        #[arg(short, long, default_value = "input.mp4")]
        file: PathBuf,

        /// Output filter script
        #[arg(short, long, default_value = "output.txt")]
        output: PathBuf,

        /// Also write the smoothed steps as JSON
        #[arg(long)]
        steps_json: Option<PathBuf>,

        /// Working-space to source scale factor. Fills in rectangles without a
        /// ratio; rectangles that carry one must agree with it.
        #[arg(long)]
        ratio: Option<f64>,

        /// Jitter threshold in source pixels
        #[arg(long)]
        delta: Option<f64>,

        /// Gaussian smoothing sigma (0 disables smoothing)
        #[arg(long)]
        smooth_sigma: Option<f64>,

        /// Content threshold for scene detection
        #[arg(long)]
        scene_threshold: Option<f64>,

        /// Source frame width
        #[arg(long)]
        frame_width: Option<u32>,

        /// Source frame height
        #[arg(long)]
        frame_height: Option<u32>,

        /// Tracker the log was recorded with: csrt|kcf|mil
        #[arg(long, default_value = "csrt")]
        tracker: String,

        /// Use the scene list as given instead of rejecting gaps and overlaps
        #[arg(long)]
        pass_through_scenes: bool,

        /// Cache rectangles in debug.json and dump per-scene centers
        #[arg(long)]
        debug: bool,

        #[command(flatten)]
        overlay: OverlayArgs,
    },

    /// Write only the overlay lines, sized to the full source frame
    Overlay {
        /// Output filter script
        #[arg(short, long, default_value = "output.txt")]
        output: PathBuf,

        /// Source frame width
        #[arg(long)]
        frame_width: Option<u32>,

        /// Source frame height
        #[arg(long)]
        frame_height: Option<u32>,

        #[command(flatten)]
        overlay: OverlayArgs,
    },

    /// Write a configuration file with default values
    InitConfig {
        /// Where to write the configuration
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = reframe_common::ReframeConfig::load(&cli.config)?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    reframe_common::logging::init_logging(&config.logging)?;

    match cli.command {
        Commands::Schedule {
            rectangles,
            scenes,
            file,
            output,
            steps_json,
            ratio,
            delta,
            smooth_sigma,
            scene_threshold,
            frame_width,
            frame_height,
            tracker,
            pass_through_scenes,
            debug,
            overlay,
        } => {
            if let Some(ratio) = ratio {
                config.ratio = ratio;
            }
            if let Some(delta) = delta {
                config.delta = delta;
            }
            if let Some(sigma) = smooth_sigma {
                config.smooth_sigma = sigma;
            }
            if let Some(threshold) = scene_threshold {
                config.scene_threshold = threshold;
            }
            if let Some(width) = frame_width {
                config.frame_width = width;
            }
            if let Some(height) = frame_height {
                config.frame_height = height;
            }
            if pass_through_scenes {
                config.scene_policy = reframe_common::ScenePolicy::PassThrough;
            }

            commands::schedule::run(commands::schedule::ScheduleArgs {
                config,
                rectangles,
                scenes,
                file,
                output,
                steps_json,
                tracker,
                debug,
                overlay,
            })
        }
        Commands::Overlay {
            output,
            frame_width,
            frame_height,
            overlay,
        } => commands::overlay::run(
            output,
            frame_width.unwrap_or(config.frame_width),
            frame_height.unwrap_or(config.frame_height),
            overlay,
        ),
        Commands::InitConfig { path } => commands::init_config::run(path),
    }
}
