//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`]; there is no
//! other persistent state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which flavour of the game is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Bare game loop: no title or game-over screens, no music
    Classic,
    /// Title screen, fade, game-over screen and music
    #[default]
    Arcade,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Arcade => "arcade",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "minimal" => Some(Variant::Classic),
            "arcade" => Some(Variant::Arcade),
            _ => None,
        }
    }
}

/// Current screen mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen; the intro apple drops to its resting height
    Start { intro_y: f32 },
    /// Fade to black between title and play (seconds elapsed)
    Transitioning { elapsed: f32 },
    /// Active gameplay
    Playing,
    /// Round ended on the third miss
    GameOver,
}

impl GameMode {
    /// Title screen with the intro apple above the visible area
    pub fn start() -> Self {
        GameMode::Start {
            intro_y: INTRO_START_Y,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Start { .. } => "start",
            GameMode::Transitioning { .. } => "transitioning",
            GameMode::Playing => "playing",
            GameMode::GameOver => "game over",
        }
    }

    /// Whether the title screen is ready to accept the advancing key press
    pub fn intro_resting(&self) -> bool {
        matches!(self, GameMode::Start { intro_y } if *intro_y >= INTRO_REST_Y)
    }

    /// Fade overlay opacity (0-255) while transitioning
    pub fn fade_alpha(&self) -> Option<u8> {
        match self {
            GameMode::Transitioning { elapsed } => {
                let t = (elapsed / FADE_DURATION).clamp(0.0, 1.0);
                Some((t * 255.0).round() as u8)
            }
            _ => None,
        }
    }
}

/// Logical sound cue names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Catch,
    Miss,
    GameOver,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Catch => "catch",
            SoundCue::Miss => "miss",
            SoundCue::GameOver => "gameOver",
        }
    }
}

/// Side effects requested by a tick; the caller performs them
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Fire-and-forget sound cue
    Sound(SoundCue),
    /// (Re)start the looping background track
    MusicStart,
    /// Stop the background track
    MusicStop,
    /// Mode switched this frame (new mode)
    ModeChanged(GameMode),
    /// Third miss landed
    RoundOver { score: u32 },
    /// Quit requested; tear everything down
    Quit,
}

/// An axis-aligned box: the player crate or the falling object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Entity {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size: Vec2::splat(size),
        }
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Counters for one play-through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub score: u32,
    /// Shown on the HUD; does not end the round by itself
    pub lives: u8,
    pub misses: u32,
    /// Units per frame
    pub fall_speed: f32,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            score: 0,
            lives: START_LIVES,
            misses: 0,
            fall_speed: START_FALL_SPEED,
        }
    }
}

impl RoundState {
    pub fn is_over(&self) -> bool {
        self.misses >= MAX_MISSES
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducible spawn positions
    pub seed: u64,
    pub variant: Variant,
    pub mode: GameMode,
    pub round: RoundState,
    pub player: Entity,
    pub falling: Entity,
    /// Frames advanced so far
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game with the given seed
    pub fn new(seed: u64, variant: Variant) -> Self {
        let mode = match variant {
            Variant::Classic => GameMode::Playing,
            Variant::Arcade => GameMode::start(),
        };
        let mut state = Self {
            seed,
            variant,
            mode,
            round: RoundState::default(),
            player: Self::fresh_player(),
            falling: Entity::new(Vec2::new(0.0, -OBJECT_SIZE), OBJECT_SIZE),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.respawn_falling();
        state
    }

    /// Player centred at the bottom edge
    fn fresh_player() -> Entity {
        Entity::new(
            Vec2::new(
                (SCREEN_WIDTH - PLAYER_SIZE) / 2.0,
                SCREEN_HEIGHT - PLAYER_SIZE,
            ),
            PLAYER_SIZE,
        )
    }

    /// Largest x the player may occupy
    pub fn player_max_x(&self) -> f32 {
        SCREEN_WIDTH - self.player.size.x
    }

    /// Put the falling object back above the screen at a random column
    pub fn respawn_falling(&mut self) {
        let max_x = (SCREEN_WIDTH - self.falling.size.x) as u32;
        let x = self.rng.random_range(0..=max_x);
        self.falling.pos = Vec2::new(x as f32, -self.falling.size.y);
    }

    /// Start a new round: fresh counters, centred player, new drop
    pub fn reset_round(&mut self) {
        self.round = RoundState::default();
        self.player = Self::fresh_player();
        self.respawn_falling();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_arcade_starts_on_title() {
        let state = GameState::new(7, Variant::Arcade);
        assert_eq!(state.mode, GameMode::start());
        assert_eq!(state.round, RoundState::default());
        assert_eq!(state.round.lives, 3);
        assert_eq!(state.round.fall_speed, 4.0);
    }

    #[test]
    fn test_new_classic_starts_playing() {
        let state = GameState::new(7, Variant::Classic);
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn test_spawn_position() {
        let state = GameState::new(42, Variant::Classic);
        assert_eq!(state.falling.pos.y, -40.0);
        assert!(state.falling.pos.x >= 0.0 && state.falling.pos.x <= 560.0);
        assert_eq!(state.player.pos, Vec2::new(270.0, 340.0));
    }

    #[test]
    fn test_respawn_stays_in_range() {
        let mut state = GameState::new(1, Variant::Classic);
        for _ in 0..1000 {
            state.respawn_falling();
            assert!(state.falling.pos.x >= 0.0);
            assert!(state.falling.pos.x <= SCREEN_WIDTH - OBJECT_SIZE);
            assert_eq!(state.falling.pos.x.fract(), 0.0);
        }
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = GameState::new(99999, Variant::Arcade);
        let mut b = GameState::new(99999, Variant::Arcade);
        for _ in 0..10 {
            a.respawn_falling();
            b.respawn_falling();
            assert_eq!(a.falling.pos, b.falling.pos);
        }
    }

    #[test]
    fn test_reset_round_recreates_counters() {
        let mut state = GameState::new(3, Variant::Arcade);
        state.round.score = 12;
        state.round.misses = 2;
        state.round.lives = 1;
        state.round.fall_speed = 6.4;
        state.player.pos.x = 0.0;
        state.reset_round();
        assert_eq!(state.round, RoundState::default());
        assert_eq!(state.player.pos.x, 270.0);
        assert_eq!(state.falling.pos.y, -40.0);
    }

    #[test]
    fn test_fade_alpha_ramps() {
        assert_eq!(GameMode::Transitioning { elapsed: 0.0 }.fade_alpha(), Some(0));
        assert_eq!(GameMode::Transitioning { elapsed: 0.5 }.fade_alpha(), Some(128));
        assert_eq!(GameMode::Transitioning { elapsed: 2.0 }.fade_alpha(), Some(255));
        assert_eq!(GameMode::Playing.fade_alpha(), None);
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!(Variant::from_str("Classic"), Some(Variant::Classic));
        assert_eq!(Variant::from_str("arcade"), Some(Variant::Arcade));
        assert_eq!(Variant::from_str("deluxe"), None);
    }
}
