//! Time management utilities

use std::time::Instant;

/// Frame clock feeding `delta_time` to the simulation
///
/// Supports both wall-clock ticking and fixed-step ticking (headless runs and
/// tests). Delta time is never negative.
pub struct FrameClock {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a new clock
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance using the wall clock (call once per frame)
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(elapsed)
    }

    /// Advance by a fixed step
    pub fn tick_fixed(&mut self, step: f32) -> f32 {
        self.last_frame = Instant::now();
        self.advance(step)
    }

    fn advance(&mut self, elapsed: f32) -> f32 {
        self.delta_time = elapsed.max(0.0);
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since clock creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since clock creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_ticks_accumulate() {
        let mut clock = FrameClock::new();
        for _ in 0..4 {
            clock.tick_fixed(0.25);
        }
        assert_eq!(clock.frame_count(), 4);
        assert_relative_eq!(clock.total_time(), 1.0);
        assert_relative_eq!(clock.average_fps(), 4.0);
    }

    #[test]
    fn test_negative_step_is_clamped() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick_fixed(-1.0), 0.0);
        assert_eq!(clock.total_time(), 0.0);
    }

    #[test]
    fn test_wall_clock_tick_is_non_negative() {
        let mut clock = FrameClock::new();
        assert!(clock.tick() >= 0.0);
        assert_eq!(clock.frame_count(), 1);
    }
}
