//! Game settings and preferences
//!
//! Read from a JSON file at startup; command-line flags override it.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::consts::FRAME_RATE;
use crate::sim::Variant;

/// Art style for the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Background picture, apple and crate sprites
    #[default]
    Apple,
    /// Flat white field, coloured paddle and block
    Block,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Apple => "apple",
            Theme::Block => "block",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "apple" => Some(Theme::Apple),
            "block" | "box" => Some(Theme::Block),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: Variant,
    pub theme: Theme,
    /// Fixed run seed; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Frame limiter rate (Hz)
    pub target_fps: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Arcade,
            theme: Theme::Apple,
            seed: None,
            target_fps: FRAME_RATE,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Default file name looked up in the working directory
    pub const FILE_NAME: &'static str = "catch_the_apple.json";

    /// Load settings from a JSON file
    ///
    /// A missing file is not an error and yields defaults. Unreadable or
    /// malformed files are.
    pub fn load(path: &Path) -> Result<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading settings {}", path.display()));
            }
        };

        let settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings.sanitized())
    }

    /// Clamp values into their usable ranges
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.target_fps = self.target_fps.clamp(1, 240);
        self
    }

    /// Effective sound effect gain (respects mute)
    pub fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music gain (respects mute)
    pub fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }
}
