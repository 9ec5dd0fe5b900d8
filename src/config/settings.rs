use super::files::atomic_write;
use crate::domain::WeekStart;
use crate::error::ConfigError;
use crate::timeline::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Theme and calendar preferences stored in settings.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dark_theme: bool,
    /// Follow the terminal's own colours instead of the fixed palette
    pub dynamic_color: bool,
    pub week_start: WeekStart,
    /// Timeline zoom at startup, pixels per minute
    pub default_zoom: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_theme: true,
            dynamic_color: true,
            week_start: WeekStart::Monday,
            default_zoom: DEFAULT_ZOOM,
        }
    }
}

/// Load settings; a missing file yields the defaults
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let Some(content) = super::files::read_file(path)? else {
        info!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    };

    let mut settings: Settings =
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if !(MIN_ZOOM..=MAX_ZOOM).contains(&settings.default_zoom) {
        warn!(zoom = settings.default_zoom, "default zoom out of range, clamping");
        settings.default_zoom = if settings.default_zoom.is_nan() {
            DEFAULT_ZOOM
        } else {
            settings.default_zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        };
    }

    info!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Save settings to settings.json
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(settings).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, &json)?;
    info!(path = %path.display(), "saved settings");
    Ok(())
}
