//! Error types shared across Reframe crates.

use std::path::PathBuf;

/// Top-level error type for Reframe operations.
#[derive(Debug, thiserror::Error)]
pub enum ReframeError {
    /// A tracked scene is missing a center for a frame it covers.
    #[error("Upstream gap: no tracked position for frame {frame}")]
    UpstreamGap { frame: u64 },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Malformed scene list: {message}")]
    MalformedSceneList { message: String },

    #[error("Tracking error: {message}")]
    Tracking { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ReframeError.
pub type ReframeResult<T> = Result<T, ReframeError>;

impl ReframeError {
    pub fn upstream_gap(frame: u64) -> Self {
        Self::UpstreamGap { frame }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn malformed_scenes(msg: impl Into<String>) -> Self {
        Self::MalformedSceneList {
            message: msg.into(),
        }
    }

    pub fn tracking(msg: impl Into<String>) -> Self {
        Self::Tracking {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ReframeError::upstream_gap(42).to_string(),
            "Upstream gap: no tracked position for frame 42"
        );
        assert_eq!(
            ReframeError::config("ratio must be positive").to_string(),
            "Configuration error: ratio must be positive"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ReframeError = io.into();
        assert!(matches!(err, ReframeError::Io(_)));
    }
}
