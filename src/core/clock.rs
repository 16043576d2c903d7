use super::constants::MAX_FRAME_DELTA_SEC;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    pub elapsed: f32,
    pub delta: f32,
}

/// Monotonic animation clock fed with host timestamps in seconds.
///
/// Elapsed time counts from `start`; it is never reset while running.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnimationClock {
    origin: Option<f64>,
    last: f64,
}

impl AnimationClock {
    pub fn start(&mut self, now: f64) {
        if self.origin.is_none() {
            self.origin = Some(now);
            self.last = now;
        }
    }

    pub fn stop(&mut self) {
        self.origin = None;
    }

    pub fn is_running(&self) -> bool {
        self.origin.is_some()
    }

    pub fn tick(&mut self, now: f64) -> FrameTime {
        let Some(origin) = self.origin else {
            return FrameTime::default();
        };
        // Host timestamps can step backwards by a hair; never go below the last tick.
        let now = now.max(self.last);
        let delta = ((now - self.last) as f32).clamp(0.0, MAX_FRAME_DELTA_SEC);
        self.last = now;
        FrameTime {
            elapsed: (now - origin) as f32,
            delta,
        }
    }
}
