//! Frame timing and the start/stop contract for per-frame scheduling.

/// Milliseconds in one normalized time unit (one frame at ~60 Hz).
pub const FRAME_MS: f64 = 16.0;
/// Largest delta a single frame may report, in normalized units.
/// A backgrounded tab can hand us seconds between frames.
pub const MAX_FRAME_UNITS: f32 = 10.0;

/// Converts host timestamps into normalized frame deltas.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Record a frame at `now_ms` and return the delta since the previous
    /// one in normalized units. The first frame after a reset counts as one unit.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / FRAME_MS) as f32,
            None => 1.0,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, MAX_FRAME_UNITS)
    }

    /// Forget the previous timestamp.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Something driven once per host animation frame.
///
/// `start` and `stop` are idempotent and report whether the state changed.
/// Stopping never interrupts a frame already in progress; it only means the
/// host should not request another one.
pub trait Ticker {
    fn start(&mut self) -> bool;
    fn stop(&mut self) -> bool;
    fn is_running(&self) -> bool;
}

/// The frame loop a field owns: running flag, clock and frame counter.
#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    running: bool,
    clock: FrameClock,
    frames: u64,
}

impl FrameLoop {
    /// A stopped loop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a frame. Returns the normalized delta, or `None` when stopped.
    pub fn frame(&mut self, now_ms: f64) -> Option<f32> {
        if !self.running {
            return None;
        }
        self.frames += 1;
        Some(self.clock.advance(now_ms))
    }

    /// Frames run since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Ticker for FrameLoop {
    fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        // Time spent stopped must not show up as one giant step.
        self.clock.reset();
        self.running = true;
        true
    }

    fn stop(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        was_running
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
