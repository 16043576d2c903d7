use super::clock::{AnimationClock, FrameTime};
use super::constants::RESIZE_DEBOUNCE_MS;
use super::scene::{Camera, DrawList, SceneContext, SceneDriver};
use super::schedule::{Debouncer, FrameHost, FrameLoop, TimerHost};
use super::theme::Theme;
use super::viewport::{Environment, Projection, SurfaceSize};

/// A drawable surface owned by exactly one lifecycle. `release` consumes it,
/// so GPU resources can only be freed once.
pub trait Surface {
    fn resize(&mut self, size: SurfaceSize);
    fn present(&mut self, frame: &DrawList);
    fn release(self);
}

/// Host-agnostic lifecycle of one decorative scene instance: attach, frame
/// loop, debounced resize, theme changes, input forwarding, and teardown.
///
/// Browser effects go through [`FrameHost`] and [`TimerHost`]; the surface is
/// installed separately because it is created asynchronously.
pub struct Lifecycle<D, S> {
    driver: D,
    surface: Option<S>,
    env: Environment,
    theme: Theme,
    camera: Camera,
    surface_size: SurfaceSize,
    clock: AnimationClock,
    frames: FrameLoop,
    resize: Debouncer,
    draw_list: DrawList,
    attached: bool,
    generation: u64,
    last_frame: FrameTime,
}

impl<D: SceneDriver, S: Surface> Lifecycle<D, S> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            surface: None,
            env: Environment::default(),
            theme: Theme::default(),
            camera: Camera::default(),
            surface_size: SurfaceSize::default(),
            clock: AnimationClock::default(),
            frames: FrameLoop::default(),
            resize: Debouncer::new(RESIZE_DEBOUNCE_MS),
            draw_list: DrawList::default(),
            attached: false,
            generation: 0,
            last_frame: FrameTime::default(),
        }
    }

    /// Set up the scene for a freshly connected host. Returns the surface
    /// generation the asynchronously created surface must present to
    /// [`Lifecycle::install_surface`]. Idempotent while attached.
    pub fn attach(&mut self, env: Environment, theme: Theme) -> u64 {
        if self.attached {
            return self.generation;
        }
        self.attached = true;
        self.generation += 1;
        self.env = env;
        self.theme = theme;
        self.surface_size = SurfaceSize::for_viewport(env.viewport, env.device_pixel_ratio);
        self.camera = Camera::new(Projection::for_viewport(env.viewport, env.window_width));
        self.last_frame = FrameTime::default();

        let mut ctx = SceneContext {
            env: &self.env,
            theme: self.theme,
            camera: &mut self.camera,
        };
        self.driver.setup_scene(&mut ctx);
        self.driver.on_theme_change(self.theme);
        log::info!(
            "[lifecycle] attach gen={} viewport={}x{} surface={}x{} theme={}",
            self.generation,
            self.env.viewport.width,
            self.env.viewport.height,
            self.surface_size.width,
            self.surface_size.height,
            self.theme.as_str()
        );
        self.generation
    }

    /// Start the clock and the frame loop. Returns false when detached or
    /// already running.
    pub fn start_animation(&mut self, now: f64, frames: &mut impl FrameHost) -> bool {
        if !self.attached {
            return false;
        }
        self.clock.start(now);
        self.frames.start(frames)
    }

    /// Accept a surface for the current generation. A stale, late, or
    /// duplicate surface is handed back for the caller to release.
    pub fn install_surface(&mut self, mut surface: S, generation: u64) -> Result<(), S> {
        if !self.attached || generation != self.generation || self.surface.is_some() {
            log::debug!(
                "[lifecycle] rejecting surface gen={} current={} attached={}",
                generation,
                self.generation,
                self.attached
            );
            return Err(surface);
        }
        surface.resize(self.surface_size);
        self.surface = Some(surface);
        Ok(())
    }

    /// One frame-loop callback. Returns whether a tick actually ran.
    pub fn tick(&mut self, now: f64, frames: &mut impl FrameHost) -> bool {
        if !self.frames.begin_frame() {
            return false;
        }
        self.frames.schedule_next(frames);

        let time = self.clock.tick(now);
        self.last_frame = time;
        let mut ctx = SceneContext {
            env: &self.env,
            theme: self.theme,
            camera: &mut self.camera,
        };
        self.driver.update(&mut ctx, time);

        if let Some(surface) = self.surface.as_mut() {
            self.draw_list.clear();
            self.draw_list.set_camera(&self.camera);
            self.driver.draw(&mut self.draw_list);
            surface.present(&self.draw_list);
        }
        true
    }

    /// Debounce a raw resize notification.
    pub fn request_resize(&mut self, timers: &mut impl TimerHost) {
        if self.attached {
            self.resize.trigger(timers);
        }
    }

    /// Timer callback for the resize debounce. `env` is the freshly measured
    /// environment; the reduced-motion flag is owned by
    /// [`Lifecycle::set_reduced_motion`] and kept.
    pub fn resize_timer_fired(&mut self, env: Environment) -> bool {
        if !self.resize.fire() || !self.attached {
            return false;
        }
        self.env = Environment {
            reduced_motion: self.env.reduced_motion,
            ..env
        };
        self.camera
            .projection
            .update(self.env.viewport, self.env.window_width);
        self.surface_size =
            SurfaceSize::for_viewport(self.env.viewport, self.env.device_pixel_ratio);
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(self.surface_size);
        }
        let mut ctx = SceneContext {
            env: &self.env,
            theme: self.theme,
            camera: &mut self.camera,
        };
        self.driver.on_resize(&mut ctx);
        log::debug!(
            "[lifecycle] resize viewport={}x{} surface={}x{} fov={}",
            self.env.viewport.width,
            self.env.viewport.height,
            self.surface_size.width,
            self.surface_size.height,
            self.camera.projection.fov_deg
        );
        true
    }

    /// Returns whether the driver was notified.
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        if theme == self.theme {
            return false;
        }
        self.theme = theme;
        if self.attached {
            self.driver.on_theme_change(theme);
        }
        true
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.env.reduced_motion = reduced;
    }

    pub fn scroll_to(&mut self, scroll_y: f64) {
        if self.attached {
            self.driver.on_scroll(scroll_y.max(0.0), &self.env);
        }
    }

    pub fn pointer_moved(&mut self, client_x: f64, client_y: f64) {
        if self.attached {
            let pointer = self.env.viewport.normalized_pointer(client_x, client_y);
            self.driver.on_pointer_move(pointer);
        }
    }

    /// Stop everything and free the surface. Safe to call without a prior
    /// attach and safe to call twice.
    pub fn detach(&mut self, frames: &mut impl FrameHost, timers: &mut impl TimerHost) {
        self.frames.stop(frames);
        self.resize.cancel(timers);
        if self.attached {
            self.driver.teardown();
        }
        if let Some(surface) = self.surface.take() {
            surface.release();
        }
        self.clock.stop();
        if self.attached {
            log::info!("[lifecycle] detach gen={}", self.generation);
        }
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frames.has_pending()
    }

    pub fn has_pending_resize(&self) -> bool {
        self.resize.is_pending()
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn surface_size(&self) -> SurfaceSize {
        self.surface_size
    }

    pub fn projection(&self) -> Projection {
        self.camera.projection
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn last_frame(&self) -> FrameTime {
        self.last_frame
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }
}
