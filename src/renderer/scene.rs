//! Mode-specific screen layouts
//!
//! One draw function per game mode, all dispatched from [`draw_frame`].

use glam::Vec2;

use super::{Presenter, Rgb, Sprite};
use crate::consts::*;
use crate::settings::Theme;
use crate::sim::{GameMode, GameState, Variant};

/// Draw the current frame for whatever mode the game is in
pub fn draw_frame<P: Presenter + ?Sized>(state: &GameState, theme: Theme, out: &mut P) {
    match state.mode {
        GameMode::Start { intro_y } => {
            draw_title(theme, out);
            out.draw_sprite(Sprite::IntroApple, Vec2::new(SCREEN_WIDTH / 2.0, intro_y));
        }
        GameMode::Transitioning { .. } => {
            draw_title(theme, out);
            if let Some(alpha) = state.mode.fade_alpha() {
                out.fade(alpha);
            }
        }
        GameMode::Playing => draw_playfield(state, theme, out),
        GameMode::GameOver => {
            // Banner goes over the frozen last frame
            draw_playfield(state, theme, out);
            if state.variant == Variant::Arcade {
                draw_game_over(out);
            }
        }
    }
}

fn draw_background<P: Presenter + ?Sized>(theme: Theme, out: &mut P) {
    match theme {
        Theme::Apple => out.draw_sprite(Sprite::Background, Vec2::ZERO),
        Theme::Block => out.clear(Rgb::WHITE),
    }
}

fn draw_title<P: Presenter + ?Sized>(theme: Theme, out: &mut P) {
    draw_background(theme, out);
    let title = Sprite::Title.size();
    out.draw_sprite(
        Sprite::Title,
        Vec2::new(SCREEN_WIDTH / 2.0 - title.x / 2.0, SCREEN_HEIGHT / 2.0 - 150.0),
    );
    let prompt = Sprite::PressEnter.size();
    out.draw_sprite(
        Sprite::PressEnter,
        Vec2::new(SCREEN_WIDTH / 2.0 - prompt.x / 2.0, SCREEN_HEIGHT / 1.5),
    );
}

fn draw_playfield<P: Presenter + ?Sized>(state: &GameState, theme: Theme, out: &mut P) {
    draw_background(theme, out);

    let (player, falling) = match theme {
        Theme::Apple => (Sprite::Crate, Sprite::Apple),
        Theme::Block => (Sprite::Paddle, Sprite::Block),
    };
    out.draw_sprite(player, state.player.pos);
    out.draw_sprite(falling, state.falling.pos);

    let round = &state.round;
    out.draw_text(&format!("Score: {}", round.score), Vec2::new(10.0, 10.0), Rgb::BLACK);
    out.draw_text(&format!("Lives: {}", round.lives), Vec2::new(10.0, 40.0), Rgb::BLACK);
    out.draw_text(
        &format!("Misses: {}/{}", round.misses, MAX_MISSES),
        Vec2::new(10.0, 70.0),
        Rgb::BLACK,
    );
}

fn draw_game_over<P: Presenter + ?Sized>(out: &mut P) {
    out.draw_sprite(Sprite::GameOverBanner, Vec2::new(150.0, 100.0));
    let prompt = Sprite::PressSpace.size();
    out.draw_sprite(
        Sprite::PressSpace,
        Vec2::new(SCREEN_WIDTH / 2.0 - prompt.x / 2.0, SCREEN_HEIGHT - 150.0),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear(Rgb),
        Sprite(Sprite, Vec2),
        Text(String, Vec2),
        Fade(u8),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Presenter for Recorder {
        fn clear(&mut self, color: Rgb) {
            self.calls.push(Call::Clear(color));
        }
        fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2) {
            self.calls.push(Call::Sprite(sprite, pos));
        }
        fn draw_text(&mut self, text: &str, pos: Vec2, _color: Rgb) {
            self.calls.push(Call::Text(text.to_string(), pos));
        }
        fn fade(&mut self, alpha: u8) {
            self.calls.push(Call::Fade(alpha));
        }
    }

    fn record(state: &GameState, theme: Theme) -> Vec<Call> {
        let mut rec = Recorder::default();
        draw_frame(state, theme, &mut rec);
        rec.calls
    }

    #[test]
    fn test_playfield_apple_theme() {
        let mut state = GameState::new(1, Variant::Classic);
        state.falling.pos = Vec2::new(100.0, 50.0);
        state.round.score = 7;
        state.round.lives = 2;
        state.round.misses = 1;

        let calls = record(&state, Theme::Apple);
        assert_eq!(
            calls,
            vec![
                Call::Sprite(Sprite::Background, Vec2::ZERO),
                Call::Sprite(Sprite::Crate, Vec2::new(270.0, 340.0)),
                Call::Sprite(Sprite::Apple, Vec2::new(100.0, 50.0)),
                Call::Text("Score: 7".into(), Vec2::new(10.0, 10.0)),
                Call::Text("Lives: 2".into(), Vec2::new(10.0, 40.0)),
                Call::Text("Misses: 1/3".into(), Vec2::new(10.0, 70.0)),
            ]
        );
    }

    #[test]
    fn test_playfield_block_theme() {
        let state = GameState::new(1, Variant::Classic);
        let calls = record(&state, Theme::Block);
        assert_eq!(calls[0], Call::Clear(Rgb::WHITE));
        assert!(matches!(calls[1], Call::Sprite(Sprite::Paddle, _)));
        assert!(matches!(calls[2], Call::Sprite(Sprite::Block, _)));
    }

    #[test]
    fn test_title_screen_has_intro_apple() {
        let state = GameState::new(1, Variant::Arcade);
        let calls = record(&state, Theme::Apple);
        assert_eq!(
            calls,
            vec![
                Call::Sprite(Sprite::Background, Vec2::ZERO),
                Call::Sprite(Sprite::Title, Vec2::new(100.0, 50.0)),
                Call::Sprite(Sprite::PressEnter, Vec2::new(225.0, 400.0 / 1.5)),
                Call::Sprite(Sprite::IntroApple, Vec2::new(300.0, INTRO_START_Y)),
            ]
        );
    }

    #[test]
    fn test_fade_overlays_title() {
        let mut state = GameState::new(1, Variant::Arcade);
        state.mode = GameMode::Transitioning { elapsed: 0.5 };
        let calls = record(&state, Theme::Apple);
        assert_eq!(calls.last(), Some(&Call::Fade(128)));
        assert!(calls.contains(&Call::Sprite(Sprite::Title, Vec2::new(100.0, 50.0))));
        assert!(!calls.iter().any(|c| matches!(c, Call::Sprite(Sprite::IntroApple, _))));
    }

    #[test]
    fn test_game_over_banner() {
        let mut state = GameState::new(1, Variant::Arcade);
        state.mode = GameMode::GameOver;
        let calls = record(&state, Theme::Apple);
        let tail = &calls[calls.len() - 2..];
        assert_eq!(
            tail,
            &[
                Call::Sprite(Sprite::GameOverBanner, Vec2::new(150.0, 100.0)),
                Call::Sprite(Sprite::PressSpace, Vec2::new(200.0, 250.0)),
            ]
        );
        assert!(calls.contains(&Call::Text("Misses: 0/3".into(), Vec2::new(10.0, 70.0))));
    }

    #[test]
    fn test_classic_game_over_has_no_banner() {
        let mut state = GameState::new(1, Variant::Classic);
        state.mode = GameMode::GameOver;
        let calls = record(&state, Theme::Apple);
        assert!(!calls.iter().any(|c| matches!(c, Call::Sprite(Sprite::GameOverBanner, _))));
    }
}
