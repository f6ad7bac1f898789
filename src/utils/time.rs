#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Wall-clock frame timer feeding `tick(delta_seconds)`.
///
/// Playback speed scales real elapsed time, so the delta comes from the
/// clock and never from a frame count.
pub struct FrameTimer {
    start_time: Instant,
    last_update: Instant,
    /// Time since last tick
    pub delta: Duration,
    /// Total elapsed time since creation
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_update: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Samples the clock; returns the frame delta in seconds.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Like [`tick`](Self::tick) with an explicit timestamp.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        self.delta = now.saturating_duration_since(self.last_update);
        self.elapsed = now.saturating_duration_since(self.start_time);
        self.last_update = now;
        self.frame_count += 1;
        self.dt_seconds()
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_wall_clock() {
        let mut timer = FrameTimer::new();
        let start = timer.last_update;

        let dt = timer.tick_at(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);

        let dt = timer.tick_at(start + Duration::from_secs(10));
        assert!((dt - 9.984).abs() < 1e-4);
        assert_eq!(timer.frame_count, 2);
        assert_eq!(timer.elapsed, Duration::from_secs(10));
    }
}
