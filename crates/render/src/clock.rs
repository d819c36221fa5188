use std::time::Instant;

/// Time handed to one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous tick.
    pub delta: f32,
}

/// Wall clock for the render loop.
///
/// The instant is passed in by the caller so the loop can be driven by any
/// event source (and by tests). Elapsed time never decreases.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
    last_elapsed: f32,
    frames: u64,
}

impl FrameClock {
    pub fn start(now: Instant) -> Self {
        Self {
            start: now,
            last_elapsed: 0.0,
            frames: 0,
        }
    }

    pub fn tick(&mut self, now: Instant) -> FrameTime {
        let raw = now.saturating_duration_since(self.start).as_secs_f32();
        let elapsed = raw.max(self.last_elapsed);
        let delta = elapsed - self.last_elapsed;
        self.last_elapsed = elapsed;
        self.frames += 1;
        FrameTime { elapsed, delta }
    }

    pub fn elapsed(&self) -> f32 {
        self.last_elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn starts_at_zero() {
        let t0 = Instant::now();
        let mut clock = FrameClock::start(t0);
        let ft = clock.tick(t0);
        assert_eq!(ft.elapsed, 0.0);
        assert_eq!(ft.delta, 0.0);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn elapsed_is_monotonic_non_decreasing() {
        let t0 = Instant::now();
        let mut clock = FrameClock::start(t0);
        let offsets_ms = [16u64, 33, 33, 50, 20, 10, 100, 99, 250];
        let mut prev = 0.0;
        for ms in offsets_ms {
            let ft = clock.tick(t0 + Duration::from_millis(ms));
            assert!(ft.elapsed >= prev);
            assert!(ft.delta >= 0.0);
            prev = ft.elapsed;
        }
        assert!((clock.elapsed() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn instant_before_start_reads_as_zero() {
        let t0 = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::start(t0);
        let ft = clock.tick(t0 - Duration::from_millis(500));
        assert_eq!(ft.elapsed, 0.0);
    }
}
