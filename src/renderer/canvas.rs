//! Character-cell rasterizer
//!
//! Maps playfield pixels onto a grid of terminal cells. Each cell covers
//! `CELL_WIDTH` x `CELL_HEIGHT` pixels, so the 600x400 field becomes 60x20.

use std::ops::Range;

use glam::Vec2;

use super::{Presenter, Rgb, Sprite};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub const CELL_WIDTH: f32 = 10.0;
pub const CELL_HEIGHT: f32 = 20.0;

const SKY: Rgb = Rgb(150, 210, 240);
const GRASS: Rgb = Rgb(90, 160, 40);
const GRASS_TIP: Rgb = Rgb(50, 110, 20);
const APPLE_RED: Rgb = Rgb(200, 30, 30);
const STEM: Rgb = Rgb(90, 60, 20);
const CRATE_WOOD: Rgb = Rgb(150, 100, 50);
const CRATE_GRAIN: Rgb = Rgb(100, 65, 30);

/// Rows of grass at the bottom of the backdrop
const GRASS_ROWS: usize = 2;

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Rgb::BLACK,
        bg: Rgb::BLACK,
    };
}

/// A frame of terminal cells
#[derive(Debug, Clone)]
pub struct CellCanvas {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl CellCanvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::BLANK; cols * rows],
        }
    }

    /// Canvas sized to the whole playfield
    pub fn for_playfield() -> Self {
        Self::new(
            (SCREEN_WIDTH / CELL_WIDTH) as usize,
            (SCREEN_HEIGHT / CELL_HEIGHT) as usize,
        )
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Characters of one row as a string
    pub fn row_text(&self, row: usize) -> String {
        self.row(row).iter().map(|c| c.ch).collect()
    }

    /// Cells covered by `[pos, pos + len)` pixels, clipped to `limit`
    fn span(pos: f32, len: f32, cell: f32, limit: usize) -> Range<usize> {
        let start = (pos / cell).round().max(0.0) as usize;
        let end = ((pos + len) / cell).round().max(0.0) as usize;
        start.min(limit)..end.min(limit)
    }

    fn fill(&mut self, pos: Vec2, size: Vec2, ch: char, fg: Rgb, bg: Rgb) {
        let cols = Self::span(pos.x, size.x, CELL_WIDTH, self.cols);
        let rows = Self::span(pos.y, size.y, CELL_HEIGHT, self.rows);
        for row in rows {
            for col in cols.clone() {
                self.cells[row * self.cols + col] = Cell { ch, fg, bg };
            }
        }
    }

    /// Write characters starting at a cell, keeping each cell's background
    fn put_str(&mut self, col: i64, row: i64, text: &str, fg: Rgb) {
        if row < 0 || row >= self.rows as i64 {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let c = col + i as i64;
            if c < 0 {
                continue;
            }
            if c >= self.cols as i64 {
                break;
            }
            let cell = &mut self.cells[row as usize * self.cols + c as usize];
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    fn draw_background(&mut self) {
        let sky_rows = self.rows.saturating_sub(GRASS_ROWS);
        for row in 0..self.rows {
            let cell = if row < sky_rows {
                Cell {
                    ch: ' ',
                    fg: Rgb::BLACK,
                    bg: SKY,
                }
            } else {
                Cell {
                    ch: '"',
                    fg: GRASS_TIP,
                    bg: GRASS,
                }
            };
            let start = row * self.cols;
            self.cells[start..start + self.cols].fill(cell);
        }
    }

    fn draw_apple(&mut self, pos: Vec2, size: Vec2) {
        self.fill(pos, size, ' ', Rgb::BLACK, APPLE_RED);
        // Stem on the top row, centred
        let row = (pos.y / CELL_HEIGHT).round() as i64;
        let col = ((pos.x + size.x / 2.0) / CELL_WIDTH).floor() as i64;
        self.put_str(col, row, "'", STEM);
    }

    /// Picture sprites render as a centred caption
    fn draw_label(&mut self, sprite: Sprite, pos: Vec2, text: &str) {
        let size = sprite.size();
        let (anchor, color) = match sprite {
            Sprite::Title => (0.1, APPLE_RED),
            Sprite::GameOverBanner => {
                self.fill(pos, size, ' ', Rgb::BLACK, Rgb::BLACK);
                (0.5, APPLE_RED)
            }
            _ => (0.5, Rgb::BLACK),
        };
        let row = ((pos.y + size.y * anchor) / CELL_HEIGHT).floor() as i64;
        let centre = ((pos.x + size.x / 2.0) / CELL_WIDTH).round() as i64;
        let col = centre - text.chars().count() as i64 / 2;
        self.put_str(col, row, text, color);
    }
}

impl Presenter for CellCanvas {
    fn clear(&mut self, color: Rgb) {
        self.cells.fill(Cell {
            ch: ' ',
            fg: Rgb::BLACK,
            bg: color,
        });
    }

    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2) {
        let size = sprite.size();
        match sprite {
            Sprite::Background => self.draw_background(),
            Sprite::Apple | Sprite::IntroApple => self.draw_apple(pos, size),
            Sprite::Crate => self.fill(pos, size, '#', CRATE_GRAIN, CRATE_WOOD),
            Sprite::Paddle => self.fill(pos, size, ' ', Rgb::BLACK, Rgb::PLAYER),
            Sprite::Block => self.fill(pos, size, ' ', Rgb::BLACK, Rgb::BLOCK),
            Sprite::Title | Sprite::PressEnter | Sprite::GameOverBanner | Sprite::PressSpace => {
                if let Some(text) = sprite.label() {
                    self.draw_label(sprite, pos, text);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Rgb) {
        let col = (pos.x / CELL_WIDTH).floor() as i64;
        let row = (pos.y / CELL_HEIGHT).floor() as i64;
        self.put_str(col, row, text, color);
    }

    fn fade(&mut self, alpha: u8) {
        for cell in &mut self.cells {
            cell.fg = cell.fg.darken(alpha);
            cell.bg = cell.bg.darken(alpha);
        }
    }
}
