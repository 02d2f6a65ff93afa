//! Presentation layer
//!
//! The simulation never draws. [`scene::draw_frame`] walks a `GameState` and
//! issues sprite/text calls against a [`Presenter`]; the terminal front end
//! rasterizes those onto a character-cell canvas.

pub mod canvas;
pub mod scene;
pub mod terminal;

use glam::Vec2;

use crate::consts::*;

pub use canvas::CellCanvas;
pub use scene::draw_frame;
pub use terminal::TerminalPresenter;

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    /// Flat-theme paddle
    pub const PLAYER: Rgb = Rgb(70, 130, 180);
    /// Flat-theme falling block
    pub const BLOCK: Rgb = Rgb(255, 165, 0);

    /// Blend toward black by `alpha / 255`
    pub fn darken(self, alpha: u8) -> Rgb {
        let keep = 255 - alpha as u16;
        let scale = |c: u8| ((c as u16 * keep + 127) / 255) as u8;
        Rgb(scale(self.0), scale(self.1), scale(self.2))
    }
}

/// Named visuals the scene can place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    /// Full-screen backdrop (apple theme)
    Background,
    Apple,
    Crate,
    /// Flat-theme player
    Paddle,
    /// Flat-theme falling object
    Block,
    /// Big apple that drops onto the title screen
    IntroApple,
    Title,
    PressEnter,
    GameOverBanner,
    PressSpace,
}

impl Sprite {
    pub fn size(self) -> Vec2 {
        match self {
            Sprite::Background => Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            Sprite::Apple | Sprite::Block => Vec2::splat(OBJECT_SIZE),
            Sprite::Crate | Sprite::Paddle => Vec2::splat(PLAYER_SIZE),
            Sprite::IntroApple => Vec2::splat(INTRO_SIZE),
            Sprite::Title => Vec2::splat(400.0),
            Sprite::PressEnter => Vec2::splat(150.0),
            Sprite::GameOverBanner => Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
            Sprite::PressSpace => Vec2::splat(200.0),
        }
    }

    /// Text carried by the picture sprites
    pub fn label(self) -> Option<&'static str> {
        match self {
            Sprite::Title => Some("CATCH THE FALLING APPLE"),
            Sprite::PressEnter => Some("PRESS ENTER"),
            Sprite::GameOverBanner => Some("GAME OVER"),
            Sprite::PressSpace => Some("PRESS SPACE"),
            _ => None,
        }
    }
}

/// Drawing capabilities the scene needs from a back end
pub trait Presenter {
    /// Fill the whole frame
    fn clear(&mut self, color: Rgb);
    /// Draw a sprite with its top-left corner at `pos`
    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2);
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Rgb);
    /// Darken everything drawn so far toward black (0 = untouched, 255 = black)
    fn fade(&mut self, alpha: u8);
}
