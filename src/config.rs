use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::color::Rgba;
use crate::display::OutputMode;
use crate::geometry::Vertex;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub style: StyleConfig,
    pub output: OutputConfig,
}

/// Largest canvas side `validate` accepts, in pixels.
pub const MAX_CANVAS_SIZE: f64 = 16384.0;

/// Sizing constants for fitting the triangle onto the canvas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Side length of the square canvas, in pixels.
    pub canvas_size: f64,
    /// Empty margin kept on every side of the triangle.
    pub padding: f64,
    /// Upper bound on the fit scale so tiny triangles stay legible.
    pub max_scale: f64,
    /// How far angle labels sit from the centroid toward their vertex (0..1).
    pub label_pull: f64,
    /// Bounding-box extents at or below this count as degenerate.
    pub degenerate_epsilon: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_size: 800.0,
            padding: 100.0,
            max_scale: 3.0,
            label_pull: 0.7,
            degenerate_epsilon: 0.0,
        }
    }
}

impl LayoutConfig {
    /// Room left for the triangle once padding is taken off both sides.
    pub fn available_space(&self) -> f64 {
        self.canvas_size - 2.0 * self.padding
    }

    /// Canvas side length in whole pixels.
    pub fn canvas_pixels(&self) -> usize {
        self.canvas_size.round().max(1.0) as usize
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    pub background: Rgba,
    pub fill: Rgba,
    pub stroke: Rgba,
    pub stroke_width: f64,
    pub marker_radius: f64,
    pub marker_colors: MarkerColors,
    pub text_color: Rgba,
    pub font_size: f64,
    /// Vertical distance between a marker centre and its letter's baseline.
    pub label_offset: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background: Rgba::TRANSPARENT,
            fill: Rgba::new(0, 0, 255, 26),
            stroke: Rgba::opaque(0x2c, 0x3e, 0x50),
            stroke_width: 2.0,
            marker_radius: 8.0,
            marker_colors: MarkerColors::default(),
            text_color: Rgba::opaque(0x2c, 0x3e, 0x50),
            font_size: 16.0,
            label_offset: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarkerColors {
    pub a: Rgba,
    pub b: Rgba,
    pub c: Rgba,
}

impl Default for MarkerColors {
    fn default() -> Self {
        Self {
            a: Rgba::opaque(0xe7, 0x4c, 0x3c),
            b: Rgba::opaque(0x27, 0xae, 0x60),
            c: Rgba::opaque(0xf3, 0x9c, 0x12),
        }
    }
}

impl MarkerColors {
    pub fn get(&self, vertex: Vertex) -> Rgba {
        match vertex {
            Vertex::A => self.a,
            Vertex::B => self.b,
            Vertex::C => self.c,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub mode: OutputMode,
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::Png,
            path: PathBuf::from("triangle.png"),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/trisketch/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("trisketch").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists.
    /// Parse errors are logged and fall back to defaults.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Failed to parse config at {}: {}. Using defaults.", path.display(), e);
                None
            }
        }
    }

    /// Write the commented template to `path`, creating parent directories.
    pub fn write_template(path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, Self::generate_config_template()).map_err(write_err)
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        Self::write_template(&path)?;
        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r##"# trisketch configuration

[layout]
# Side length of the square canvas in pixels
canvas_size = 800.0
# Margin kept free on every side of the triangle
padding = 100.0
# Largest scale applied to small triangles
max_scale = 3.0
# Angle labels sit this fraction of the way from the centroid to their vertex
label_pull = 0.7
# Bounding boxes this thin or thinner are drawn at scale 1 (0 = exact zero only)
degenerate_epsilon = 0.0

[style]
# Colors are "#rrggbb" or "#rrggbbaa"
background = "#00000000"
fill = "#0000ff1a"
stroke = "#2c3e50"
stroke_width = 2.0
marker_radius = 8.0
text_color = "#2c3e50"
font_size = 16.0
# Distance from a marker centre up to its letter
label_offset = 15.0

[style.marker_colors]
a = "#e74c3c"
b = "#27ae60"
c = "#f39c12"

[output]
# Output mode: "png" or "terminal"
mode = "png"
path = "triangle.png"
"##
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) {
        if let Some(mode) = args.mode {
            self.output.mode = mode;
        }
        if let Some(ref path) = args.output {
            self.output.path = path.clone();
        }
        if let Some(size) = args.canvas_size {
            self.layout.canvas_size = size;
        }
        if let Some(padding) = args.padding {
            self.layout.padding = padding;
        }
        if let Some(max_scale) = args.max_scale {
            self.layout.max_scale = max_scale;
        }
        if let Some(pull) = args.label_pull {
            self.layout.label_pull = pull;
        }
    }

    /// Reject layouts that leave no room to draw.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        if !(layout.canvas_size >= 1.0 && layout.canvas_size <= MAX_CANVAS_SIZE) {
            return Err(ConfigError::Invalid(format!(
                "canvas_size must be between 1 and {}, got {}",
                MAX_CANVAS_SIZE, layout.canvas_size
            )));
        }
        if !(layout.padding.is_finite() && layout.padding >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "padding must be non-negative, got {}",
                layout.padding
            )));
        }
        if layout.available_space() <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "padding {} leaves no room on a {} canvas",
                layout.padding, layout.canvas_size
            )));
        }
        if !(layout.max_scale.is_finite() && layout.max_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_scale must be positive, got {}",
                layout.max_scale
            )));
        }
        if !layout.label_pull.is_finite() {
            return Err(ConfigError::Invalid("label_pull must be finite".to_string()));
        }
        if !(layout.degenerate_epsilon >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "degenerate_epsilon must be non-negative, got {}",
                layout.degenerate_epsilon
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn template_matches_defaults() {
        let parsed: Config = toml::from_str(&Config::generate_config_template()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let parsed: Config = toml::from_str("[layout]\npadding = 40.0\n").unwrap();
        assert_eq!(parsed.layout.padding, 40.0);
        assert_eq!(parsed.layout.canvas_size, 800.0);
        assert_eq!(parsed.style, StyleConfig::default());
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let result: Result<Config, _> = toml::from_str("[style]\nfill = \"blue\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_and_write_template_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Config::write_template(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn cli_overrides_config() {
        let args = crate::Args::parse_from([
            "trisketch",
            "--mode",
            "terminal",
            "--padding",
            "50",
            "--max-scale",
            "5",
            "--output",
            "out.png",
        ]);
        let mut config = Config::default();
        config.merge_args(&args);
        assert_eq!(config.output.mode, OutputMode::Terminal);
        assert_eq!(config.output.path, PathBuf::from("out.png"));
        assert_eq!(config.layout.padding, 50.0);
        assert_eq!(config.layout.max_scale, 5.0);
        assert_eq!(config.layout.canvas_size, 800.0);
    }

    #[test]
    fn validate_rejects_padding_that_fills_canvas() {
        let mut config = Config::default();
        config.layout.padding = 400.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn validate_rejects_non_positive_scale() {
        let mut config = Config::default();
        config.layout.max_scale = 0.0;
        assert!(config.validate().is_err());
        config.layout.max_scale = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_caps_canvas_size() {
        let mut config = Config::default();
        config.layout.canvas_size = MAX_CANVAS_SIZE;
        config.validate().unwrap();
        config.layout.canvas_size = 1e6;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("16384"), "{err}");
        config.layout.canvas_size = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
        assert_eq!(LayoutConfig::default().available_space(), 600.0);
        assert_eq!(LayoutConfig::default().canvas_pixels(), 800);
    }
}
