//! Run configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReframeError, ReframeResult};

/// Configuration for one reframe run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReframeConfig {
    /// Scale factor mapping the tracker's working space back to source pixels.
    pub ratio: f64,

    /// Jitter threshold in source pixels. Motion at or below this is held.
    pub delta: f64,

    /// Standard deviation of the Gaussian kernel applied per scene.
    pub smooth_sigma: f64,

    /// Content threshold forwarded to the scene detector.
    pub scene_threshold: f64,

    /// Source frame width in pixels.
    pub frame_width: u32,

    /// Source frame height in pixels.
    pub frame_height: u32,

    /// Explicit crop window. Defaults to a 9:16 portrait window.
    pub window: Option<CropWindow>,

    /// How to treat scene lists that do not partition the clip.
    pub scene_policy: ScenePolicy,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Size of the output crop window in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropWindow {
    pub width: u32,
    pub height: u32,
}

impl CropWindow {
    /// The 9:16 portrait window for a source of the given height.
    pub fn portrait(frame_height: u32) -> Self {
        Self {
            width: (frame_height as f64 * 9.0 / 16.0) as u32 + 1,
            height: frame_height,
        }
    }
}

/// Policy applied to an externally detected scene list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenePolicy {
    /// Reject scene lists with gaps, overlaps, or empty ranges.
    #[default]
    Validate,
    /// Log problems and use the list unchanged.
    PassThrough,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "reframe=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for ReframeConfig {
    fn default() -> Self {
        Self {
            ratio: 5.0,
            delta: 15.0,
            smooth_sigma: 5.0,
            scene_threshold: 30.0,
            frame_width: 1920,
            frame_height: 1080,
            window: None,
            scene_policy: ScenePolicy::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ReframeConfig {
    /// Load config from a JSON file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> ReframeResult<Self> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config as pretty JSON.
    pub fn save(&self, path: &Path) -> ReframeResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// The crop window the directive emitter places on every frame.
    pub fn crop_window(&self) -> CropWindow {
        self.window
            .unwrap_or_else(|| CropWindow::portrait(self.frame_height))
    }

    /// Check the configuration before any processing starts.
    pub fn validate(&self) -> ReframeResult<()> {
        if self.ratio <= 0.0 || !self.ratio.is_finite() {
            return Err(ReframeError::config(format!(
                "ratio must be positive, got {}",
                self.ratio
            )));
        }
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(ReframeError::config(format!(
                "frame dimensions must be positive, got {}x{}",
                self.frame_width, self.frame_height
            )));
        }
        if self.delta < 0.0 || self.delta.is_nan() {
            return Err(ReframeError::config(format!(
                "delta must be non-negative, got {}",
                self.delta
            )));
        }
        if self.smooth_sigma < 0.0 || self.smooth_sigma.is_nan() {
            return Err(ReframeError::config(format!(
                "smooth sigma must be non-negative, got {}",
                self.smooth_sigma
            )));
        }

        let window = self.crop_window();
        if window.width == 0 || window.height == 0 {
            return Err(ReframeError::config("crop window must not be empty"));
        }
        if window.width > self.frame_width || window.height > self.frame_height {
            return Err(ReframeError::config(format!(
                "crop window {}x{} does not fit in {}x{} frame",
                window.width, window.height, self.frame_width, self.frame_height
            )));
        }
        Ok(())
    }
}
