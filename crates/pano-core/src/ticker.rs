use std::time::Duration;

/// Turns irregular frame times into a whole number of fixed-rate ticks.
///
/// After a long stall (hidden tab, debugger) at most `max_catch_up` ticks are
/// returned and the rest of the backlog is dropped.
#[derive(Clone, Debug)]
pub struct FrameTicker {
    step_sec: f64,
    accum_sec: f64,
    max_catch_up: u32,
}

impl FrameTicker {
    pub fn new(hz: f64, max_catch_up: u32) -> Self {
        Self {
            step_sec: 1.0 / hz.max(f64::EPSILON),
            accum_sec: 0.0,
            max_catch_up: max_catch_up.max(1),
        }
    }

    #[inline]
    pub fn step(&self) -> Duration {
        Duration::from_secs_f64(self.step_sec)
    }

    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.accum_sec += dt.as_secs_f64();
        let due = (self.accum_sec / self.step_sec).floor();
        if due >= self.max_catch_up as f64 {
            self.accum_sec = 0.0;
            return self.max_catch_up;
        }
        self.accum_sec -= due * self.step_sec;
        due as u32
    }
}
