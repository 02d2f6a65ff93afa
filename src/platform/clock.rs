//! Frame limiter

use std::thread;
use std::time::{Duration, Instant};

/// Caps the loop at a fixed rate and reports elapsed time per frame
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(target_hz: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / target_hz.max(1),
            last: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Block until the next frame boundary; returns time since the previous call
    ///
    /// A frame that overran its budget returns immediately.
    pub fn tick(&mut self) -> Duration {
        let deadline = self.last + self.frame;
        let now = Instant::now();
        if now < deadline {
            thread::sleep(deadline - now);
        }

        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration() {
        assert_eq!(FrameClock::new(50).frame_duration(), Duration::from_millis(20));
        // Zero is treated as 1 Hz rather than dividing by zero
        assert_eq!(FrameClock::new(0).frame_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_tick_waits_for_boundary() {
        let mut clock = FrameClock::new(200);
        clock.tick();
        let elapsed = clock.tick();
        assert!(elapsed >= Duration::from_millis(5));
    }

    #[test]
    fn test_overrun_does_not_sleep() {
        let mut clock = FrameClock::new(100);
        thread::sleep(Duration::from_millis(30));
        let start = Instant::now();
        let elapsed = clock.tick();
        assert!(elapsed >= Duration::from_millis(30));
        assert!(start.elapsed() < Duration::from_millis(10));
    }
}
