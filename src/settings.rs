//! Host settings and preferences
//!
//! Read once at startup from a JSON file. Every field is optional in the
//! file; anything missing keeps its default.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "DRIFTER_SETTINGS";
/// Settings file looked up in the working directory when the variable is unset
pub const DEFAULT_SETTINGS_FILE: &str = "drifter.json";

/// How palette colors reach the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// 24-bit RGB
    #[default]
    Rgb,
    /// Nearest of the 16 ANSI colors, for terminals without truecolor
    Ansi,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Rgb => "rgb",
            ColorMode::Ansi => "ansi",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rgb" | "truecolor" => Some(ColorMode::Rgb),
            "ansi" | "16" => Some(ColorMode::Ansi),
            _ => None,
        }
    }
}

/// Host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Milliseconds between simulation ticks (16 is roughly 60 Hz)
    pub tick_ms: u64,
    /// Ticks a key counts as held after its last press or repeat, for
    /// terminals that never report key releases
    pub hold_grace_ticks: u32,

    // === Display ===
    /// Show the controls line at the top of the screen
    pub show_help: bool,
    pub color_mode: ColorMode,

    // === Session ===
    /// Fixed RNG seed; a random one is drawn when absent
    pub seed: Option<u64>,

    /// Game balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            hold_grace_ticks: 30,

            show_help: true,
            color_mode: ColorMode::Rgb,

            seed: None,

            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let settings: Settings = serde_json::from_str(json).context("invalid settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.tick_ms > 0, "tick_ms must be positive");
        anyhow::ensure!(self.hold_grace_ticks > 0, "hold_grace_ticks must be positive");
        self.tuning.validate().context("invalid tuning")
    }

    /// Path the settings are read from
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Load settings from [`Settings::path`]
    ///
    /// A missing file means defaults. A file that exists but does not parse
    /// or validate is an error.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let settings =
            Self::from_json(&json).with_context(|| format!("failed to load {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
