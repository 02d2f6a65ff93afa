//! Platform abstraction layer
//!
//! Handles the terminal-side collaborators of the frame loop:
//! - Time/ticks (frame limiter)
//! - Input events (held movement keys, discrete presses, quit)

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{HeldKey, TerminalInput};
