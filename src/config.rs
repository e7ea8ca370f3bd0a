use crate::model::{Color, Point};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Immutable overlay parameters, fixed for the lifetime of the window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlayConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    /// Initial top-left corner of the window in screen points.
    #[serde(default = "default_position")]
    pub position: Point,
    /// Whole-window opacity applied on top of the per-color alpha.
    #[serde(default = "default_window_opacity")]
    pub window_opacity: f32,
    #[serde(default = "default_background_color")]
    pub background_color: Color,
    #[serde(default = "default_line_color")]
    pub line_color: Color,
    #[serde(default = "default_line_width")]
    pub line_width: f32,
    /// Arm half-length growth in points per second.
    #[serde(default = "default_growth_rate")]
    pub growth_rate: f32,
    /// Angle between the two crosshair arms, in degrees.
    #[serde(default = "default_splay_angle")]
    pub splay_angle: f32,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub debug_logging: bool,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_width() -> f32 {
    800.0
}

fn default_height() -> f32 {
    600.0
}

fn default_position() -> Point {
    Point::new(300.0, 200.0)
}

fn default_window_opacity() -> f32 {
    0.4
}

fn default_background_color() -> Color {
    Color::rgba(225, 225, 225, 100)
}

fn default_line_color() -> Color {
    Color::rgba(225, 0, 0, 220)
}

fn default_line_width() -> f32 {
    4.0
}

fn default_growth_rate() -> f32 {
    270.0
}

fn default_splay_angle() -> f32 {
    30.0
}

fn default_poll_interval_ms() -> u64 {
    16
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            position: default_position(),
            window_opacity: default_window_opacity(),
            background_color: default_background_color(),
            line_color: default_line_color(),
            line_width: default_line_width(),
            growth_rate: default_growth_rate(),
            splay_angle: default_splay_angle(),
            poll_interval_ms: default_poll_interval_ms(),
            debug_logging: false,
            log_file: None,
        }
    }
}

impl OverlayConfig {
    /// Load the configuration from `path`. A missing or empty file yields the
    /// defaults; malformed JSON is an error.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("invalid overlay config in {}", path.display()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("failed to write {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            bail!(
                "window size must be positive, got {}x{}",
                self.width,
                self.height
            );
        }
        if !(0.0..=1.0).contains(&self.window_opacity) {
            bail!(
                "window_opacity must be within 0.0..=1.0, got {}",
                self.window_opacity
            );
        }
        if !self.growth_rate.is_finite() || self.growth_rate < 0.0 {
            bail!(
                "growth_rate must be a non-negative number, got {}",
                self.growth_rate
            );
        }
        if !self.splay_angle.is_finite() {
            bail!("splay_angle must be finite");
        }
        if !(self.line_width > 0.0) {
            bail!("line_width must be positive, got {}", self.line_width);
        }
        if self.poll_interval_ms == 0 {
            bail!("poll_interval_ms must be at least 1");
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
