//! Keyboard input from the terminal
//!
//! Terminals only report key-down events unless keyboard enhancement is
//! available, so "held" has two meanings here: down until released when
//! the terminal reports releases, otherwise down for a short window that
//! key-repeat events keep refreshing.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{KeyPress, TickInput};

/// How long a press counts as held when releases are not reported
pub const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// Held state of one movement key
#[derive(Debug, Clone, Copy, Default)]
pub struct HeldKey {
    down: bool,
    last_seen: Option<Instant>,
}

impl HeldKey {
    pub fn press(&mut self, now: Instant) {
        self.down = true;
        self.last_seen = Some(now);
    }

    pub fn release(&mut self) {
        self.down = false;
        self.last_seen = None;
    }

    /// `window` is `None` when the terminal reports releases
    pub fn is_held(&self, now: Instant, window: Option<Duration>) -> bool {
        match window {
            None => self.down,
            Some(window) => self
                .last_seen
                .is_some_and(|seen| now.saturating_duration_since(seen) <= window),
        }
    }
}

/// Turns crossterm key events into one [`TickInput`] per frame
#[derive(Debug)]
pub struct TerminalInput {
    left: HeldKey,
    right: HeldKey,
    hold_window: Option<Duration>,
}

impl TerminalInput {
    pub fn new(reports_release: bool) -> Self {
        Self {
            left: HeldKey::default(),
            right: HeldKey::default(),
            hold_window: if reports_release {
                None
            } else {
                Some(HOLD_WINDOW)
            },
        }
    }

    /// Drain pending terminal events without blocking
    pub fn poll(&mut self) -> Result<TickInput> {
        let mut input = TickInput::default();
        let now = Instant::now();

        while event::poll(Duration::ZERO).context("polling terminal input")? {
            if let Event::Key(key) = event::read().context("reading terminal input")? {
                self.handle_key(key, now, &mut input);
            }
        }

        self.finish(now, &mut input);
        Ok(input)
    }

    /// Apply one key event to the held state and this frame's input
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant, input: &mut TickInput) {
        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };

        if key.kind == KeyEventKind::Release {
            match code {
                KeyCode::Left | KeyCode::Char('a') => self.left.release(),
                KeyCode::Right | KeyCode::Char('d') => self.right.release(),
                _ => {}
            }
            return;
        }

        let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c');
        if ctrl_c || matches!(code, KeyCode::Esc | KeyCode::Char('q')) {
            input.quit = true;
            return;
        }

        let press = match code {
            KeyCode::Left | KeyCode::Char('a') => {
                self.left.press(now);
                KeyPress::Left
            }
            KeyCode::Right | KeyCode::Char('d') => {
                self.right.press(now);
                KeyPress::Right
            }
            KeyCode::Enter => KeyPress::Enter,
            KeyCode::Char(' ') => KeyPress::Space,
            _ => KeyPress::Other,
        };

        // Auto-repeat keeps a key held but is not a new press
        if key.kind == KeyEventKind::Press {
            input.keys.push(press);
        }
    }

    /// Fill in the held movement intents as of `now`
    pub fn finish(&self, now: Instant, input: &mut TickInput) {
        input.move_left = self.left.is_held(now, self.hold_window);
        input.move_right = self.right.is_held(now, self.hold_window);
    }
}
