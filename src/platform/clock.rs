use std::thread;
use std::time::{Duration, Instant};

/// Longest step handed to the simulation. A stalled terminal must not make
/// entities tunnel through each other.
pub const MAX_FRAME_DT: f32 = 0.1;

const FPS_WINDOW: usize = 60;

/// Frame-rate limiter with a rolling FPS estimate.
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_times: [f32; FPS_WINDOW],
    frame_index: usize,
    samples: usize,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            samples: 0,
        }
    }

    pub fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Sleeps out the rest of the frame budget for `target_fps` and returns
    /// the real time since the previous tick, capped at `MAX_FRAME_DT`.
    pub fn tick(&mut self, target_fps: u32) -> f32 {
        let budget = Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1)));
        let spent = self.last.elapsed();
        if spent < budget {
            thread::sleep(budget - spent);
        }

        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        self.record(dt);
        dt.min(MAX_FRAME_DT)
    }

    fn record(&mut self, dt: f32) {
        self.frame_times[self.frame_index] = dt;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.samples = (self.samples + 1).min(FPS_WINDOW);
    }

    pub fn fps(&self) -> f32 {
        let total: f32 = self.frame_times[..self.samples].iter().sum();
        if total > 0.0 {
            self.samples as f32 / total
        } else {
            0.0
        }
    }
}
