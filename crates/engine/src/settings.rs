//! Runtime configuration.
//!
//! Settings come from an optional JSON file named by `ASCIISCAPE_CONFIG`,
//! then individual environment variables override single fields.

use std::env;
use std::fmt;
use std::fs;

use serde::{Deserialize, Serialize};

use crate::types::{COLLISION_HULL_THICKNESS, DEFAULT_FILL};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub canvas_width: u16,
    pub canvas_height: u16,
    /// Character written where nothing is drawn.
    pub fill: char,
    /// Frame the canvas with a row/column ruler.
    pub debug_mode: bool,
    pub speed: f64,
    pub max_elapsed_ms: f64,
    /// Frame cap; `0` disables it.
    pub max_fps: f64,
    pub collision_hull_thickness: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: 30,
            canvas_height: 30,
            fill: DEFAULT_FILL,
            debug_mode: false,
            speed: 0.005,
            max_elapsed_ms: 100.0,
            max_fps: 60.0,
            collision_hull_thickness: COLLISION_HULL_THICKNESS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    Io(String),
    Parse(String),
}

impl SettingsError {
    pub fn code(&self) -> &'static str {
        match self {
            SettingsError::Io(_) => "io",
            SettingsError::Parse(_) => "parse",
        }
    }

    pub fn message(&self) -> String {
        match self {
            SettingsError::Io(msg) => format!("cannot read settings: {}", msg),
            SettingsError::Parse(msg) => format!("invalid settings: {}", msg),
        }
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

impl std::error::Error for SettingsError {}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    pub fn from_json_file(path: &str) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|e| SettingsError::Io(format!("{}: {}", path, e)))?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Load the config file (if any) and apply environment overrides.
    ///
    /// A missing or broken config file is logged and ignored.
    pub fn from_env() -> Self {
        let base = match env::var("ASCIISCAPE_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_json_file(path.trim()).unwrap_or_else(|err| {
                log::warn!("{}; using defaults", err);
                Self::default()
            }),
            _ => Self::default(),
        };
        base.with_env_overrides()
    }

    fn with_env_overrides(self) -> Self {
        fn var<T: std::str::FromStr>(name: &str) -> Option<T> {
            env::var(name).ok().and_then(|s| s.trim().parse().ok())
        }

        Self {
            canvas_width: var("ASCIISCAPE_WIDTH").unwrap_or(self.canvas_width),
            canvas_height: var("ASCIISCAPE_HEIGHT").unwrap_or(self.canvas_height),
            fill: env::var("ASCIISCAPE_FILL")
                .ok()
                .and_then(|s| s.chars().next())
                .unwrap_or(self.fill),
            debug_mode: env::var("ASCIISCAPE_DEBUG")
                .ok()
                .map(|s| matches!(s.trim(), "1" | "true" | "yes" | "on"))
                .unwrap_or(self.debug_mode),
            speed: var("ASCIISCAPE_SPEED").unwrap_or(self.speed),
            max_elapsed_ms: self.max_elapsed_ms,
            max_fps: var("ASCIISCAPE_MAX_FPS").unwrap_or(self.max_fps),
            collision_hull_thickness: var("ASCIISCAPE_HULL").unwrap_or(self.collision_hull_thickness),
        }
    }
}
