//! Frame clock: per-frame delta, total elapsed time and smoothed FPS.

use web_time::{Duration, Instant};

/// Timing inputs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTick {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Seconds since the clock started.
    pub elapsed: f32,
}

impl FrameTick {
    /// Tick with explicit values.
    #[must_use]
    pub fn new(dt: f32, elapsed: f32) -> Self {
        Self { dt, elapsed }
    }

    /// Whether both timings are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.dt.is_finite() && self.elapsed.is_finite()
    }

    /// The tick following this one after `dt` seconds.
    #[must_use]
    pub fn advanced(self, dt: f32) -> Self {
        Self {
            dt,
            elapsed: self.elapsed + dt,
        }
    }
}

/// Frame clock with FPS calculation and optional frame limiting
pub struct FrameClock {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Clock start
    start: Instant,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameClock {
    /// Create a new frame clock with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        Self::starting_at(target_fps, Instant::now())
    }

    fn starting_at(target_fps: u32, now: Instant) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            start: now,
            last_frame: now,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    // 5% new value, 95% old value
        }
    }

    /// Returns true if enough time has passed since the last frame to
    /// render another.
    #[must_use]
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Time left until the next frame is due.
    #[must_use]
    pub fn until_next_frame(&self) -> Duration {
        self.min_frame_duration
            .saturating_sub(self.last_frame.elapsed())
    }

    /// Mark a frame as rendered now and return its timing.
    pub fn tick(&mut self) -> FrameTick {
        self.tick_at(Instant::now())
    }

    /// Mark a frame as rendered at `now` and return its timing.
    pub fn tick_at(&mut self, now: Instant) -> FrameTick {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            // Exponential moving average for smooth display
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        FrameTick {
            dt: frame_time,
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_reports_delta_and_elapsed() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(0, start);
        let a = clock.tick_at(start + Duration::from_millis(16));
        let b = clock.tick_at(start + Duration::from_millis(48));
        assert!((a.dt - 0.016).abs() < 1e-6);
        assert!((b.dt - 0.032).abs() < 1e-6);
        assert!((b.elapsed - 0.048).abs() < 1e-6);
    }

    #[test]
    fn fps_moves_toward_frame_rate() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(0, start);
        for i in 1..=400 {
            let _ = clock.tick_at(start + Duration::from_millis(i * 10));
        }
        assert!((clock.fps() - 100.0).abs() < 1.0);
    }

    #[test]
    fn unlimited_clock_always_renders() {
        let clock = FrameClock::new(0);
        assert!(clock.should_render());
        assert_eq!(clock.until_next_frame(), Duration::ZERO);
    }

    #[test]
    fn advanced_tick_accumulates() {
        let t = FrameTick::default().advanced(0.5).advanced(0.25);
        assert_eq!(t, FrameTick::new(0.25, 0.75));
    }

    #[test]
    fn non_finite_ticks_are_flagged() {
        assert!(FrameTick::new(0.016, 3.0).is_finite());
        assert!(!FrameTick::new(f32::NAN, 3.0).is_finite());
        assert!(!FrameTick::new(0.016, f32::INFINITY).is_finite());
    }
}
