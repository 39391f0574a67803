//=========================================================================
// Frame Clock
//=========================================================================
//
// Fixed frame-rate cap with instantaneous FPS measurement.
//
// Each `tick()`:
//   1. Measures time since the previous tick
//   2. Sleeps the remainder of the frame budget (1 / target_fps)
//   3. Returns the full frame duration including the sleep
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== FrameClock ==========================================================

/// Caps the frame loop to a target rate.
#[derive(Debug)]
pub struct FrameClock {
    frame_budget: Duration,
    last_tick: Instant,
    last_frame: Duration,
}

impl FrameClock {
    /// Creates a clock for `target_fps` frames per second.
    ///
    /// # Panics
    ///
    /// Panics if `target_fps <= 0.0`.
    pub fn new(target_fps: f64) -> Self {
        assert!(target_fps > 0.0, "Target FPS must be positive, got {}", target_fps);
        Self {
            frame_budget: Duration::from_secs_f64(1.0 / target_fps),
            last_tick: Instant::now(),
            last_frame: Duration::ZERO,
        }
    }

    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// Restarts measurement from now (called when the loop starts).
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
        self.last_frame = Duration::ZERO;
    }

    /// Waits out the rest of the frame and returns its total duration.
    pub fn tick(&mut self) -> Duration {
        let elapsed = self.last_tick.elapsed();
        if elapsed < self.frame_budget {
            thread::sleep(self.frame_budget - elapsed);
        }

        let now = Instant::now();
        self.last_frame = now - self.last_tick;
        self.last_tick = now;
        self.last_frame
    }

    /// Duration of the last completed frame.
    pub fn last_frame(&self) -> Duration {
        self.last_frame
    }

    /// Instantaneous frames per second of the last frame (0 before the first).
    pub fn fps(&self) -> f64 {
        let secs = self.last_frame.as_secs_f64();
        if secs > 0.0 {
            1.0 / secs
        } else {
            0.0
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_matches_target() {
        let clock = FrameClock::new(50.0);
        assert!((clock.frame_budget().as_secs_f64() - 0.02).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "Target FPS must be positive")]
    fn zero_target_panics() {
        FrameClock::new(0.0);
    }

    #[test]
    fn fps_is_zero_before_first_tick() {
        assert_eq!(FrameClock::new(60.0).fps(), 0.0);
    }

    #[test]
    fn tick_waits_at_least_the_budget() {
        let mut clock = FrameClock::new(200.0);
        clock.reset();
        let frame = clock.tick();
        assert!(frame >= clock.frame_budget());
        assert!(clock.fps() > 0.0);
        assert!(clock.fps() <= 1.0 / clock.frame_budget().as_secs_f64() + 1e-6);
    }

    #[test]
    fn slow_frame_is_not_padded() {
        let mut clock = FrameClock::new(1000.0);
        clock.reset();
        thread::sleep(Duration::from_millis(5));
        let frame = clock.tick();
        assert!(frame >= Duration::from_millis(5));
        assert!(clock.fps() < 1000.0);
    }
}
