/// Per-frame clock.
/// The engine ticks once per rendered frame with a variable delta; the clock
/// keeps the running elapsed time that time-based effects key off.
pub struct FrameClock {
    /// Seconds since the clock started.
    elapsed: f32,
    /// Delta of the most recent frame, after capping.
    delta: f32,
    /// Uncapped wall-clock delta of the most recent frame.
    wall_delta: f32,
    /// Largest delta a single frame may report.
    max_delta: f32,
    /// Number of frames ticked so far.
    frames: u64,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            elapsed: 0.0,
            delta: 0.0,
            wall_delta: 0.0,
            max_delta,
            frames: 0,
        }
    }

    /// Advance by one frame. Returns the capped delta.
    pub fn advance(&mut self, frame_dt: f32) -> f32 {
        self.wall_delta = frame_dt.max(0.0);
        // Cap so a backgrounded tab does not produce one giant animation step
        let dt = self.wall_delta.min(self.max_delta);
        self.delta = dt;
        self.elapsed += dt;
        self.frames += 1;
        dt
    }

    /// Elapsed seconds since start.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Delta of the last frame in seconds.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Uncapped delta of the last frame in seconds.
    /// Wall-clock timers use this so they keep real time when frames stall.
    pub fn wall_delta(&self) -> f32 {
        self.wall_delta
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.1)
    }
}
