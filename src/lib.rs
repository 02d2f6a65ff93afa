//! Catch the Apple - a single-screen falling-object arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collision, mode machine)
//! - `renderer`: Presentation contract and terminal front end
//! - `platform`: Frame clock and keyboard input
//! - `audio`: Sound cues and music loop
//! - `settings`: User preferences

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, Theme};
pub use sim::Variant;

/// Game configuration constants
pub mod consts {
    /// Target frame rate; all speeds below are in units per frame
    pub const FRAME_RATE: u32 = 60;
    /// Duration of one frame at the target rate (seconds)
    pub const FRAME_DT: f32 = 1.0 / FRAME_RATE as f32;

    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 600.0;
    pub const SCREEN_HEIGHT: f32 = 400.0;

    /// Player crate
    pub const PLAYER_SIZE: f32 = 60.0;
    pub const PLAYER_SPEED: f32 = 8.0;

    /// Falling apple/block
    pub const OBJECT_SIZE: f32 = 40.0;
    pub const START_FALL_SPEED: f32 = 4.0;
    /// Added to the fall speed on every catch
    pub const FALL_SPEED_STEP: f32 = 0.2;

    /// Round counters
    pub const START_LIVES: u8 = 3;
    pub const MAX_MISSES: u32 = 3;

    /// Start screen intro apple
    pub const INTRO_SIZE: f32 = 125.0;
    pub const INTRO_START_Y: f32 = -100.0;
    pub const INTRO_REST_Y: f32 = SCREEN_HEIGHT / 2.0 - 60.0;
    pub const INTRO_FALL_SPEED: f32 = 8.0;

    /// Start-to-game fade length (seconds)
    pub const FADE_DURATION: f32 = 1.0;
}
