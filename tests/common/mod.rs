// Shared host-side harness. The main crate is wasm-only, so the pure `core`
// modules are included directly, plus fakes for the browser hosts.

#![allow(dead_code)]

pub mod core {
    pub mod clock {
        include!("../../src/core/clock.rs");
    }
    pub mod constants {
        include!("../../src/core/constants.rs");
    }
    pub mod geometry {
        include!("../../src/core/geometry.rs");
    }
    pub mod infrastructure {
        include!("../../src/core/infrastructure.rs");
    }
    pub mod lifecycle {
        include!("../../src/core/lifecycle.rs");
    }
    pub mod palette {
        include!("../../src/core/palette.rs");
    }
    pub mod scene {
        include!("../../src/core/scene.rs");
    }
    pub mod schedule {
        include!("../../src/core/schedule.rs");
    }
    pub mod theme {
        include!("../../src/core/theme.rs");
    }
    pub mod transition {
        include!("../../src/core/transition.rs");
    }
    pub mod viewport {
        include!("../../src/core/viewport.rs");
    }
}

use self::core::clock::FrameTime;
use self::core::lifecycle::Surface;
use self::core::scene::{DrawList, SceneContext, SceneDriver};
use self::core::schedule::{FrameHost, TimerHost};
use self::core::theme::Theme;
use self::core::viewport::{Environment, SurfaceSize, ViewportSize};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

pub fn env(width: f64, height: f64, dpr: f64) -> Environment {
    Environment {
        viewport: ViewportSize::new(width, height),
        window_width: width,
        device_pixel_ratio: dpr,
        reduced_motion: false,
    }
}

pub fn wide_env() -> Environment {
    env(1280.0, 800.0, 1.0)
}

pub fn narrow_env() -> Environment {
    env(375.0, 700.0, 2.0)
}

/// Ordered record of calls across the fakes, for sequencing assertions.
pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// `requestAnimationFrame` stand-in: tracks outstanding ids.
#[derive(Default)]
pub struct FakeFrames {
    next_id: i32,
    pub pending: Vec<i32>,
    pub requested: usize,
    pub cancelled: Vec<i32>,
}

impl FakeFrames {
    /// Deliver the oldest outstanding callback, if any.
    pub fn fire(&mut self) -> Option<i32> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameHost for FakeFrames {
    fn request_frame(&mut self) -> Option<i32> {
        self.next_id += 1;
        self.requested += 1;
        self.pending.push(self.next_id);
        Some(self.next_id)
    }

    fn cancel_frame(&mut self, id: i32) {
        self.pending.retain(|&p| p != id);
        self.cancelled.push(id);
    }
}

/// `setTimeout` stand-in with a manual clock in milliseconds.
#[derive(Default)]
pub struct FakeTimers {
    next_id: i32,
    now_ms: i32,
    pub pending: Vec<(i32, i32)>,
    pub set_calls: usize,
    pub cleared: Vec<i32>,
}

impl FakeTimers {
    /// Move the clock forward and return how many timers came due.
    pub fn advance(&mut self, ms: i32) -> usize {
        self.now_ms += ms;
        let now = self.now_ms;
        let before = self.pending.len();
        self.pending.retain(|&(_, due)| due > now);
        before - self.pending.len()
    }
}

impl TimerHost for FakeTimers {
    fn set_timeout(&mut self, delay_ms: i32) -> Option<i32> {
        self.next_id += 1;
        self.set_calls += 1;
        self.pending.push((self.next_id, self.now_ms + delay_ms));
        Some(self.next_id)
    }

    fn clear_timeout(&mut self, id: i32) {
        self.pending.retain(|&(p, _)| p != id);
        self.cleared.push(id);
    }
}

#[derive(Default)]
pub struct SurfaceLog {
    pub resizes: Vec<SurfaceSize>,
    pub presents: usize,
    pub released: usize,
    pub last_mesh_count: usize,
    pub last_particle_count: usize,
}

pub struct RecordingSurface {
    pub log: Rc<RefCell<SurfaceLog>>,
    journal: Journal,
}

impl RecordingSurface {
    pub fn new(journal: &Journal) -> (Self, Rc<RefCell<SurfaceLog>>) {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        (
            Self {
                log: log.clone(),
                journal: journal.clone(),
            },
            log,
        )
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, size: SurfaceSize) {
        self.log.borrow_mut().resizes.push(size);
    }

    fn present(&mut self, frame: &DrawList) {
        let mut log = self.log.borrow_mut();
        log.presents += 1;
        log.last_mesh_count = frame.meshes.len();
        log.last_particle_count = frame.particles.positions.len();
    }

    fn release(self) {
        self.log.borrow_mut().released += 1;
        self.journal.borrow_mut().push("surface.release".into());
    }
}

/// Scene driver that only records which hooks ran.
pub struct RecordingDriver {
    pub journal: Journal,
    pub setups: usize,
    pub updates: Vec<FrameTime>,
    pub resizes: usize,
    pub themes: Vec<Theme>,
    pub scrolls: Vec<f64>,
    pub pointers: Vec<Vec2>,
    pub teardowns: usize,
    pub objects: usize,
}

impl RecordingDriver {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            setups: 0,
            updates: Vec::new(),
            resizes: 0,
            themes: Vec::new(),
            scrolls: Vec::new(),
            pointers: Vec::new(),
            teardowns: 0,
            objects: 0,
        }
    }

    fn note(&self, what: &str) {
        self.journal.borrow_mut().push(what.to_owned());
    }
}

impl SceneDriver for RecordingDriver {
    fn setup_scene(&mut self, _ctx: &mut SceneContext<'_>) {
        self.setups += 1;
        self.objects = 4;
        self.note("driver.setup");
    }

    fn update(&mut self, _ctx: &mut SceneContext<'_>, time: FrameTime) {
        self.updates.push(time);
    }

    fn on_resize(&mut self, _ctx: &mut SceneContext<'_>) {
        self.resizes += 1;
        self.note("driver.resize");
    }

    fn on_theme_change(&mut self, theme: Theme) {
        self.themes.push(theme);
        self.note("driver.theme");
    }

    fn on_scroll(&mut self, scroll_y: f64, _env: &Environment) {
        self.scrolls.push(scroll_y);
    }

    fn on_pointer_move(&mut self, pointer: Vec2) {
        self.pointers.push(pointer);
    }

    fn draw(&self, _out: &mut DrawList) {}

    fn teardown(&mut self) {
        self.teardowns += 1;
        self.objects = 0;
        self.note("driver.teardown");
    }
}
