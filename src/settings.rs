use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::overlay::OverlayConfig;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional log file path. If `None`, logs go to stderr only.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Seconds of inactivity before the overlay fades out.
    #[serde(default = "default_auto_hide_secs")]
    pub auto_hide_secs: f32,
    /// Width of the window in which a text-channel character is treated as
    /// an echo of the same keystroke already shown via the hook channel.
    #[serde(default = "default_dedup_window_ms")]
    pub dedup_window_ms: u64,
    /// How long the overlay keeps the always-on-top attribute after showing.
    #[serde(default = "default_topmost_release_ms")]
    pub topmost_release_ms: u64,
    /// Height of the overlay bar in points.
    #[serde(default = "default_overlay_height")]
    pub overlay_height: f32,
    /// Gap between the overlay bar and the bottom edge of the monitor.
    #[serde(default = "default_bottom_margin")]
    pub bottom_margin: f32,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Steady-state opacity of the visible overlay.
    #[serde(default = "default_target_opacity")]
    pub target_opacity: f32,
}

fn default_auto_hide_secs() -> f32 {
    10.0
}

fn default_dedup_window_ms() -> u64 {
    150
}

fn default_topmost_release_ms() -> u64 {
    350
}

fn default_overlay_height() -> f32 {
    60.0
}

fn default_bottom_margin() -> f32 {
    100.0
}

fn default_font_size() -> f32 {
    28.0
}

fn default_target_opacity() -> f32 {
    0.95
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            auto_hide_secs: default_auto_hide_secs(),
            dedup_window_ms: default_dedup_window_ms(),
            topmost_release_ms: default_topmost_release_ms(),
            overlay_height: default_overlay_height(),
            bottom_margin: default_bottom_margin(),
            font_size: default_font_size(),
            target_opacity: default_target_opacity(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Default settings location under the user config dir, falling back to
    /// a file in the working directory.
    pub fn default_path() -> PathBuf {
        dirs_next::config_dir()
            .map(|dir| dir.join("screenkey").join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("screenkey.json"))
    }

    pub fn dedup_window(&self) -> Duration {
        Duration::from_millis(self.dedup_window_ms)
    }

    pub fn overlay_config(&self) -> OverlayConfig {
        OverlayConfig {
            auto_hide: Duration::from_secs_f32(self.auto_hide_secs.max(0.0)),
            topmost_release: Duration::from_millis(self.topmost_release_ms),
            target_opacity: self.target_opacity,
            ..OverlayConfig::default()
        }
    }
}
