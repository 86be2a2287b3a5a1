//! Interpolation progress.
//!
//! Progress is measured in ticks since the interpolation started plus the
//! partial tick of the frame being drawn, over the configured duration:
//!
//! ```text
//! progress = clamp((ticks_since_start + partial_tick) / duration, 0, 1)
//! ```
//!
//! A zero duration means "no interpolation" and always reports 1. A start
//! delay makes `ticks_since_start` negative for a while, which holds
//! progress at 0.

/// Computes interpolation progress.
#[must_use]
pub fn interpolation_progress(ticks_since_start: i64, partial_tick: f32, duration: u32) -> f32 {
    if duration == 0 {
        return 1.0;
    }
    ((ticks_since_start as f32 + partial_tick) / duration as f32).clamp(0.0, 1.0)
}

/// Tick counter plus the start and duration of the current interpolation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InterpolationClock {
    /// Ticks elapsed since the clock was created.
    tick: i64,
    /// Tick the current interpolation starts on.
    start_tick: i64,
    /// Length of the current interpolation in ticks.
    duration: u32,
    /// Progress reported by the most recent `progress()` call.
    last_progress: f32,
}

impl InterpolationClock {
    /// Creates a clock at tick 0 with no interpolation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tick: 0,
            start_tick: 0,
            duration: 0,
            last_progress: 0.0,
        }
    }

    /// Advances one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }

    /// Current tick.
    #[must_use]
    pub const fn tick(&self) -> i64 {
        self.tick
    }

    /// Restarts the interpolation `delay` ticks from now.
    pub fn restart(&mut self, delay: i32) {
        self.start_tick = self.tick + i64::from(delay);
    }

    /// Latches a new duration.
    pub fn set_duration(&mut self, duration: u32) {
        self.duration = duration;
    }

    /// Current duration.
    #[must_use]
    pub const fn duration(&self) -> u32 {
        self.duration
    }

    /// Progress at `partial_tick`, remembered as the last known progress.
    pub fn progress(&mut self, partial_tick: f32) -> f32 {
        let progress = interpolation_progress(self.tick - self.start_tick, partial_tick, self.duration);
        self.last_progress = progress;
        progress
    }

    /// Progress from the most recent [`Self::progress`] call.
    #[must_use]
    pub const fn last_progress(&self) -> f32 {
        self.last_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_duration_is_complete() {
        assert_eq!(interpolation_progress(0, 0.0, 0), 1.0);
        assert_eq!(interpolation_progress(-5, 0.3, 0), 1.0);
    }

    #[test]
    fn test_progress_uses_partial_tick() {
        assert_eq!(interpolation_progress(1, 0.5, 4), 0.375);
        assert_eq!(interpolation_progress(4, 0.0, 4), 1.0);
        assert_eq!(interpolation_progress(9, 0.9, 4), 1.0);
    }

    #[test]
    fn test_delay_holds_progress_at_zero() {
        let mut clock = InterpolationClock::new();
        clock.set_duration(10);
        clock.restart(3);

        clock.advance();
        assert_eq!(clock.progress(0.5), 0.0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.progress(0.0), 0.0);
        clock.advance();
        assert!((clock.progress(0.0) - 0.1).abs() < 1e-6);
        assert!((clock.last_progress() - 0.1).abs() < 1e-6);
    }
}
