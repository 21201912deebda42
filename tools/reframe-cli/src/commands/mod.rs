pub mod init_config;
pub mod overlay;
pub mod schedule;

use std::path::Path;

use reframe_common::ReframeError;
use reframe_processing_core::OverlayText;

use crate::OverlayArgs;

/// Read a required input file, reporting a missing file by name.
pub(crate) fn read_input(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        return Err(ReframeError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(std::fs::read_to_string(path)?)
}

impl From<OverlayArgs> for OverlayText {
    fn from(args: OverlayArgs) -> Self {
        OverlayText {
            title: args.title,
            subtitle: args.subtitle,
            channel: args.channel,
            font_file: args.font_file,
        }
    }
}
