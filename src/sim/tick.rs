//! Per-frame simulation step
//!
//! Core game loop that advances the mode machine one frame at a time.

use super::collision::{Outcome, evaluate};
use super::state::{GameEvent, GameMode, GameState, SoundCue, Variant};
use crate::consts::*;

/// A discrete key press seen this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Left,
    Right,
    Enter,
    Space,
    Other,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left held this frame
    pub move_left: bool,
    /// Right held this frame
    pub move_right: bool,
    /// Key-down events since the last frame, in arrival order
    pub keys: Vec<KeyPress>,
    /// Window closed / quit key
    pub quit: bool,
}

impl TickInput {
    pub fn any_key(&self) -> bool {
        !self.keys.is_empty()
    }

    pub fn pressed(&self, key: KeyPress) -> bool {
        self.keys.contains(&key)
    }
}

/// Advance the game state by one frame
///
/// `dt` is the wall time since the previous frame in seconds. Movement is
/// per frame; only the fade uses `dt`. Returns the side effects the caller
/// should perform, in order.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.quit {
        events.push(GameEvent::Quit);
        return events;
    }

    state.time_ticks += 1;

    match state.mode {
        GameMode::Start { intro_y } => {
            let intro_y = (intro_y + INTRO_FALL_SPEED).min(INTRO_REST_Y);
            state.mode = GameMode::Start { intro_y };

            // Presses before the apple lands are dropped
            if state.mode.intro_resting() && input.any_key() {
                set_mode(state, GameMode::Transitioning { elapsed: 0.0 }, &mut events);
            }
        }

        GameMode::Transitioning { elapsed } => {
            let elapsed = elapsed + dt;
            if elapsed >= FADE_DURATION {
                state.reset_round();
                set_mode(state, GameMode::Playing, &mut events);
                events.push(GameEvent::MusicStart);
            } else {
                state.mode = GameMode::Transitioning { elapsed };
            }
        }

        GameMode::Playing => step_playing(state, input, &mut events),

        GameMode::GameOver => {
            if state.variant == Variant::Arcade && input.pressed(KeyPress::Space) {
                set_mode(state, GameMode::start(), &mut events);
            }
        }
    }

    events
}

/// Movement, fall, then exactly one of miss / catch / nothing
fn step_playing(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    // Both directions are checked; holding both nets out
    let max_x = state.player_max_x();
    let x = &mut state.player.pos.x;
    if input.move_left && *x > 0.0 {
        *x = (*x - PLAYER_SPEED).max(0.0);
    }
    if input.move_right && *x < max_x {
        *x = (*x + PLAYER_SPEED).min(max_x);
    }

    state.falling.pos.y += state.round.fall_speed;

    match evaluate(&state.player, &state.falling, SCREEN_HEIGHT) {
        Outcome::Miss => {
            let round = &mut state.round;
            round.lives = round.lives.saturating_sub(1);
            round.misses += 1;
            events.push(GameEvent::Sound(SoundCue::Miss));
            state.respawn_falling();

            if state.round.is_over() {
                let score = state.round.score;
                set_mode(state, GameMode::GameOver, events);
                events.push(GameEvent::RoundOver { score });
                if state.variant == Variant::Arcade {
                    events.push(GameEvent::MusicStop);
                    events.push(GameEvent::Sound(SoundCue::GameOver));
                }
            }
        }
        Outcome::Catch => {
            state.round.score += 1;
            events.push(GameEvent::Sound(SoundCue::Catch));
            state.respawn_falling();
            state.round.fall_speed += FALL_SPEED_STEP;
        }
        Outcome::None => {}
    }
}

fn set_mode(state: &mut GameState, mode: GameMode, events: &mut Vec<GameEvent>) {
    log::debug!("mode {} -> {}", state.mode.name(), mode.name());
    state.mode = mode;
    events.push(GameEvent::ModeChanged(mode));
}
