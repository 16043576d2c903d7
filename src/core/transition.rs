use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    CubicOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A timed interpolation between two rotations on the master clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub start_time: f32,
    pub duration: f32,
    pub from: Vec3,
    pub to: Vec3,
    pub easing: Easing,
}

impl Transition {
    pub fn progress(&self, now: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now: f32) -> Vec3 {
        let eased = self.easing.apply(self.progress(now));
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, now: f32) -> bool {
        self.progress(now) >= 1.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum EntryAnimation {
    #[default]
    Idle,
    Animating(Transition),
}

impl EntryAnimation {
    /// Start (or restart) the spin from the current instantaneous rotation.
    /// A running animation is superseded.
    pub fn trigger(&mut self, now: f32, current: Vec3, turn: Vec3, duration: f32) {
        *self = EntryAnimation::Animating(Transition {
            start_time: now,
            duration,
            from: current,
            to: current + turn,
            easing: Easing::CubicOut,
        });
    }

    /// Rotation to apply this tick, if animating. Returns to `Idle` once the
    /// final value has been produced.
    pub fn advance(&mut self, now: f32) -> Option<Vec3> {
        let EntryAnimation::Animating(transition) = *self else {
            return None;
        };
        let value = transition.sample(now);
        if transition.is_finished(now) {
            *self = EntryAnimation::Idle;
        }
        Some(value)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, EntryAnimation::Animating(_))
    }
}
