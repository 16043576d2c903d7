// Cooperative frame loop and debounce bookkeeping. The browser adapter
// supplies the hosts; the host tests supply fakes.

/// Refresh-synchronized callback source (`requestAnimationFrame`).
pub trait FrameHost {
    fn request_frame(&mut self) -> Option<i32>;
    fn cancel_frame(&mut self, id: i32);
}

/// One-shot timer source (`setTimeout`).
pub trait TimerHost {
    fn set_timeout(&mut self, delay_ms: i32) -> Option<i32>;
    fn clear_timeout(&mut self, id: i32);
}

/// Self-rescheduling frame loop with at most one pending request.
#[derive(Debug, Default)]
pub struct FrameLoop {
    running: bool,
    pending: Option<i32>,
}

impl FrameLoop {
    /// Returns false when the loop was already running.
    pub fn start(&mut self, host: &mut impl FrameHost) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.pending = host.request_frame();
        true
    }

    /// Called at the top of a frame callback. Returns whether the tick should
    /// run; a callback that slips through after `stop` is ignored.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        self.running
    }

    pub fn schedule_next(&mut self, host: &mut impl FrameHost) {
        if !self.running {
            return;
        }
        if let Some(stale) = self.pending.take() {
            host.cancel_frame(stale);
        }
        self.pending = host.request_frame();
    }

    pub fn stop(&mut self, host: &mut impl FrameHost) {
        self.running = false;
        if let Some(id) = self.pending.take() {
            host.cancel_frame(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Collapses bursts of events into one call after a quiet period.
#[derive(Debug)]
pub struct Debouncer {
    delay_ms: i32,
    pending: Option<i32>,
}

impl Debouncer {
    pub fn new(delay_ms: i32) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Restart the quiet period.
    pub fn trigger(&mut self, host: &mut impl TimerHost) {
        if let Some(id) = self.pending.take() {
            host.clear_timeout(id);
        }
        self.pending = host.set_timeout(self.delay_ms);
    }

    /// Called from the timer callback. Returns true when the debounced
    /// handler should run.
    pub fn fire(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn cancel(&mut self, host: &mut impl TimerHost) {
        if let Some(id) = self.pending.take() {
            host.clear_timeout(id);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn delay_ms(&self) -> i32 {
        self.delay_ms
    }
}
