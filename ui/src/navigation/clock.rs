/// Frame clock fed with millisecond timestamps (`performance.now()` in the
/// browser). The first tick starts the clock.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    start_ms: Option<f64>,
    prev_ms: f64,
    frame_counter: u64,
}

/// Seconds since the first tick and since the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClockSample {
    pub elapsed: f32,
    pub delta: f32,
}

impl Clock {
    pub fn tick(&mut self, now_ms: f64) -> ClockSample {
        let start = *self.start_ms.get_or_insert(now_ms);
        if self.frame_counter == 0 {
            self.prev_ms = now_ms;
        }

        // timestamps can stall or jump back across tab switches
        let dt_ms = (now_ms - self.prev_ms).max(0.0);
        self.prev_ms = self.prev_ms.max(now_ms);
        self.frame_counter += 1;

        ClockSample {
            elapsed: ((now_ms - start).max(0.0) / 1000.0) as f32,
            delta: (dt_ms / 1000.0) as f32,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frame_counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_tick_starts_at_zero() {
        let mut clock = Clock::default();
        assert_eq!(clock.tick(1234.0), ClockSample::default());

        let s = clock.tick(1734.0);
        assert_relative_eq!(s.elapsed, 0.5);
        assert_relative_eq!(s.delta, 0.5);

        let s = clock.tick(1750.0);
        assert_relative_eq!(s.elapsed, 0.516, epsilon = 1e-6);
        assert_relative_eq!(s.delta, 0.016, epsilon = 1e-6);
        assert_eq!(clock.frames(), 3);
    }

    #[test]
    fn backwards_timestamps_do_not_go_negative() {
        let mut clock = Clock::default();
        clock.tick(100.0);
        clock.tick(200.0);
        let s = clock.tick(150.0);
        assert_eq!(s.delta, 0.0);
    }
}
