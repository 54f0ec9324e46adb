pub mod png;
pub mod terminal;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Write the canvas to a PNG file
    #[default]
    Png,
    /// Print a half-block preview to the terminal
    Terminal,
}

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: std::path::PathBuf,
        source: image::ImageError,
    },
    #[error("canvas buffer does not match its {width}x{height} size")]
    BufferSize { width: usize, height: usize },
    #[error("terminal output failed: {0}")]
    Terminal(#[from] std::io::Error),
}
