//! Terminal output via crossterm
//!
//! Owns the terminal for the lifetime of the game: raw mode, alternate
//! screen, hidden cursor. Everything is put back on `end()` or drop.

use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
    EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};

use super::{CellCanvas, Rgb};

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb {
            r: c.0,
            g: c.1,
            b: c.2,
        }
    }
}

pub struct TerminalPresenter {
    out: Stdout,
    canvas: CellCanvas,
    key_release: bool,
    last_size: (u16, u16),
    active: bool,
}

impl TerminalPresenter {
    /// Take over the terminal
    pub fn begin() -> Result<Self> {
        let mut presenter = Self {
            out: io::stdout(),
            canvas: CellCanvas::for_playfield(),
            key_release: false,
            last_size: (0, 0),
            active: true,
        };

        // From here on, drop restores whatever was changed
        terminal::enable_raw_mode().context("enabling raw mode")?;
        execute!(
            presenter.out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            Clear(ClearType::All)
        )
        .context("entering alternate screen")?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                presenter.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .context("enabling key release events")?;
            presenter.key_release = true;
        }
        log::info!(
            "Terminal ready (key release events: {})",
            presenter.key_release
        );

        Ok(presenter)
    }

    /// Whether the terminal reports key releases
    pub fn reports_key_release(&self) -> bool {
        self.key_release
    }

    /// Canvas for the next frame
    pub fn canvas_mut(&mut self) -> &mut CellCanvas {
        &mut self.canvas
    }

    /// Flush the canvas to the screen, centred
    pub fn present(&mut self) -> Result<()> {
        let size = terminal::size().context("querying terminal size")?;
        let (cols, rows) = size;
        let width = self.canvas.cols() as u16;
        let height = self.canvas.rows() as u16;
        let left = cols.saturating_sub(width) / 2;
        let top = rows.saturating_sub(height) / 2;
        let visible_cols = cols.saturating_sub(left).min(width) as usize;

        queue!(self.out, BeginSynchronizedUpdate)?;
        if size != self.last_size {
            queue!(self.out, ResetColor, Clear(ClearType::All))?;
            self.last_size = size;
        }

        for row in 0..height.min(rows.saturating_sub(top)) {
            queue!(self.out, cursor::MoveTo(left, top + row))?;
            let mut fg = None;
            let mut bg = None;
            for cell in &self.canvas.row(row as usize)[..visible_cols] {
                if fg != Some(cell.fg) {
                    queue!(self.out, SetForegroundColor(cell.fg.into()))?;
                    fg = Some(cell.fg);
                }
                if bg != Some(cell.bg) {
                    queue!(self.out, SetBackgroundColor(cell.bg.into()))?;
                    bg = Some(cell.bg);
                }
                queue!(self.out, Print(cell.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush().context("writing frame")?;
        Ok(())
    }

    /// Give the terminal back
    pub fn end(mut self) -> Result<()> {
        self.restore().context("restoring terminal")
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        if self.key_release {
            execute!(self.out, PopKeyboardEnhancementFlags)?;
        }
        execute!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }
}

impl Drop for TerminalPresenter {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
