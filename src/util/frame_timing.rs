use web_time::{Duration, Instant};

/// Interval between periodic FPS reports.
pub const REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Frame timing with a smoothed FPS estimate and periodic reporting.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Last time `end_frame` produced a report
    last_report: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    frames: u64,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Create a new frame timer starting now.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            last_frame: now,
            last_report: now,
            smoothed_fps: 60.0,
            smoothing: 0.05,
            frames: 0,
        }
    }

    /// Call after each presented frame.
    ///
    /// Returns the smoothed FPS once every [`REPORT_INTERVAL`].
    pub fn end_frame(&mut self) -> Option<f32> {
        self.end_frame_at(Instant::now())
    }

    fn end_frame_at(&mut self, now: Instant) -> Option<f32> {
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frames += 1;
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps =
                self.smoothed_fps * (1.0 - self.smoothing) + instant_fps * self.smoothing;
        }

        if now.duration_since(self.last_report) >= REPORT_INTERVAL {
            self.last_report = now;
            Some(self.smoothed_fps)
        } else {
            None
        }
    }

    /// Get the current FPS (smoothed).
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames counted since creation.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
