//! Run settings
//!
//! Loaded from a JSON file named by `RAMP_DESCENT_SETTINGS`, falling back to
//! the built-in demo sweep. Missing fields take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::GRAVITY;
use crate::sim::{RollingBody, SimError, Track, validate_gravity};

/// Environment variable naming a settings file
pub const SETTINGS_ENV: &str = "RAMP_DESCENT_SETTINGS";
/// Environment variable that skips the window when set to `1`, `true` or `yes`
pub const HEADLESS_ENV: &str = "RAMP_DESCENT_HEADLESS";

/// Errors while loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Rolling body as written in the settings file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySettings {
    pub radius: f32,
    pub mass: f32,
    /// Omit for a solid cylinder
    pub inertia: Option<f32>,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            radius: 1.0,
            mass: 1.0,
            inertia: None,
        }
    }
}

/// Program settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Track sweep ===
    /// Number of tracks, deflections spread evenly over ±max_deflection
    pub track_count: usize,
    /// Largest deflection magnitude in the sweep
    pub max_deflection: f32,
    /// Track width and height in meters (arcs are square)
    pub track_size: f32,
    /// Samples per track
    pub resolution: usize,

    // === Physics ===
    pub body: BodySettings,
    /// Gravitational acceleration (m/s²)
    pub gravity: f32,

    // === Display ===
    /// Open the viewer window after printing times
    pub window: bool,
    /// Animate balls rolling in the viewer
    pub animate: bool,
    /// Restart the animation once every ball has settled
    pub loop_animation: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            track_count: 11,
            max_deflection: 0.3,
            track_size: 10.0,
            resolution: 20,

            body: BodySettings::default(),
            gravity: GRAVITY,

            window: true,
            animate: true,
            loop_animation: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str, origin: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|source| SettingsError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Load settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let display = path.display().to_string();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: display.clone(),
            source,
        })?;
        let settings = Self::from_json(&json, &display)?;
        log::info!("Loaded settings from {}", display);
        Ok(settings)
    }

    /// Load from the environment: the settings file if named, then the
    /// headless override
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::load`] with variables read through `lookup`
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let mut settings = match lookup(SETTINGS_ENV) {
            Some(path) => Self::load_from(Path::new(&path))?,
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        };
        settings.apply_headless(lookup(HEADLESS_ENV).as_deref());
        Ok(settings)
    }

    /// Turn the window off when `value` asks for headless mode
    pub fn apply_headless(&mut self, value: Option<&str>) {
        let Some(value) = value else {
            return;
        };
        if matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes") {
            log::info!("Headless mode, skipping the viewer");
            self.window = false;
        }
    }

    /// Validated rolling body
    pub fn rolling_body(&self) -> Result<RollingBody, SimError> {
        RollingBody::new(self.body.radius, self.body.mass, self.body.inertia)
    }

    /// Gravity, rejected unless positive and finite
    pub fn checked_gravity(&self) -> Result<f32, SimError> {
        validate_gravity(self.gravity)
    }

    /// Generate the configured track sweep
    pub fn build_tracks(&self) -> Result<Vec<Track>, SimError> {
        Track::sweep(
            self.track_count,
            self.max_deflection,
            self.track_size,
            self.resolution,
        )
    }
}
