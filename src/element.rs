use crate::constants::{ELEMENT_TAG, REDUCED_MOTION_QUERY};
use crate::core::infrastructure::InfrastructureScene;
use crate::core::lifecycle::{Lifecycle, Surface};
use crate::core::scene::SceneDriver;
use crate::core::schedule::{FrameHost, TimerHost};
use crate::core::theme::resolve_theme;
use crate::dom;
use crate::render::SurfaceRenderer;
use crate::theme_watch::{self, ThemeSubscription};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// `requestAnimationFrame` driving one stored tick closure.
struct WindowFrames {
    window: web::Window,
    callback: Option<Closure<dyn FnMut()>>,
}

impl FrameHost for WindowFrames {
    fn request_frame(&mut self) -> Option<i32> {
        let cb = self.callback.as_ref()?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, id: i32) {
        _ = self.window.cancel_animation_frame(id);
    }
}

/// `setTimeout` firing one stored callback.
struct WindowTimers {
    window: web::Window,
    callback: Option<Closure<dyn FnMut()>>,
}

impl TimerHost for WindowTimers {
    fn set_timeout(&mut self, delay_ms: i32) -> Option<i32> {
        let cb = self.callback.as_ref()?;
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                delay_ms,
            )
            .ok()
    }

    fn clear_timeout(&mut self, id: i32) {
        self.window.clear_timeout_with_handle(id);
    }
}

/// An event listener that can be removed by the same closure reference.
struct Listener {
    target: web::EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    fn add(
        target: &web::EventTarget,
        event: &'static str,
        passive: bool,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let options = web::AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .ok()?;
        Some(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    fn remove(self) {
        _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// Observers and listeners that exist only while the host is connected.
struct Attachment {
    listeners: Vec<Listener>,
    resize_observer: Option<(
        web::ResizeObserver,
        Closure<dyn FnMut(js_sys::Array, web::ResizeObserver)>,
    )>,
    _theme: ThemeSubscription,
}

struct Inner<D: SceneDriver> {
    host: web::HtmlElement,
    window: web::Window,
    origin: Instant,
    lifecycle: RefCell<Lifecycle<D, SurfaceRenderer>>,
    frames: RefCell<WindowFrames>,
    timers: RefCell<WindowTimers>,
    attachment: RefCell<Option<Attachment>>,
}

impl<D: SceneDriver> Inner<D> {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Browser adapter around a [`Lifecycle`]: owns the canvas, the frame and
/// timer callbacks, every listener, and the asynchronous GPU setup.
pub struct SceneElement<D: SceneDriver + 'static> {
    inner: Rc<Inner<D>>,
}

impl<D: SceneDriver + 'static> SceneElement<D> {
    pub fn new(host: web::HtmlElement, driver: D) -> Result<Self, JsValue> {
        let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
        Ok(Self {
            inner: Rc::new(Inner {
                host,
                window: window.clone(),
                origin: Instant::now(),
                lifecycle: RefCell::new(Lifecycle::new(driver)),
                frames: RefCell::new(WindowFrames {
                    window: window.clone(),
                    callback: None,
                }),
                timers: RefCell::new(WindowTimers {
                    window,
                    callback: None,
                }),
                attachment: RefCell::new(None),
            }),
        })
    }

    pub fn connected(&self) {
        let inner = &self.inner;
        if inner.attachment.borrow().is_some() {
            return;
        }
        let canvas = match dom::mount_canvas(&inner.host) {
            Ok(c) => c,
            Err(e) => {
                log::error!("[element] mount failed: {:?}", e);
                return;
            }
        };

        let env = dom::measure_environment(&inner.window, &inner.host);
        let theme = resolve_theme(&dom::theme_signals(&inner.window));
        let generation = inner.lifecycle.borrow_mut().attach(env, theme);
        dom::sync_canvas_backing_size(&canvas, inner.lifecycle.borrow().surface_size());
        inner.lifecycle.borrow_mut().scroll_to(dom::scroll_y(&inner.window));

        let tick_inner = inner.clone();
        inner.frames.borrow_mut().callback = Some(Closure::wrap(Box::new(move || {
            let now = tick_inner.now();
            let mut frames = tick_inner.frames.borrow_mut();
            tick_inner.lifecycle.borrow_mut().tick(now, &mut *frames);
        }) as Box<dyn FnMut()>));

        let timer_inner = inner.clone();
        let timer_canvas = canvas.clone();
        inner.timers.borrow_mut().callback = Some(Closure::wrap(Box::new(move || {
            let env = dom::measure_environment(&timer_inner.window, &timer_inner.host);
            let mut lifecycle = timer_inner.lifecycle.borrow_mut();
            if lifecycle.resize_timer_fired(env) {
                dom::sync_canvas_backing_size(&timer_canvas, lifecycle.surface_size());
            }
        }) as Box<dyn FnMut()>));

        let theme_inner = inner.clone();
        let (subscription, _) = theme_watch::subscribe(move |theme| {
            theme_inner.lifecycle.borrow_mut().set_theme(theme);
        });

        let resize_observer = self.observe_host_resize();
        let listeners = self.add_listeners();

        *inner.attachment.borrow_mut() = Some(Attachment {
            listeners,
            resize_observer,
            _theme: subscription,
        });

        let now = inner.now();
        let started = inner
            .lifecycle
            .borrow_mut()
            .start_animation(now, &mut *inner.frames.borrow_mut());
        log::debug!(
            "[element] <{}> connected gen={} loop_started={}",
            ELEMENT_TAG,
            generation,
            started
        );

        let gpu_inner = inner.clone();
        spawn_local(async move {
            let size = gpu_inner.lifecycle.borrow().surface_size();
            match SurfaceRenderer::new(&canvas, size).await {
                Ok(renderer) => {
                    let rejected = gpu_inner
                        .lifecycle
                        .borrow_mut()
                        .install_surface(renderer, generation);
                    if let Err(stale) = rejected {
                        stale.release();
                    }
                }
                Err(e) => log::error!("[gpu] init failed, scene will not draw: {:?}", e),
            }
        });
    }

    pub fn disconnected(&self) {
        let inner = &self.inner;
        inner.lifecycle.borrow_mut().detach(
            &mut *inner.frames.borrow_mut(),
            &mut *inner.timers.borrow_mut(),
        );
        if let Some(attachment) = inner.attachment.borrow_mut().take() {
            for listener in attachment.listeners {
                listener.remove();
            }
            if let Some((observer, _)) = &attachment.resize_observer {
                observer.disconnect();
            }
        }
        // Pending ids were cancelled above; the closures can go now.
        inner.frames.borrow_mut().callback = None;
        inner.timers.borrow_mut().callback = None;
    }

    fn observe_host_resize(
        &self,
    ) -> Option<(
        web::ResizeObserver,
        Closure<dyn FnMut(js_sys::Array, web::ResizeObserver)>,
    )> {
        let resize_inner = self.inner.clone();
        let on_resize = Closure::wrap(Box::new(move |_: js_sys::Array, _: web::ResizeObserver| {
            let mut timers = resize_inner.timers.borrow_mut();
            resize_inner.lifecycle.borrow_mut().request_resize(&mut *timers);
        })
            as Box<dyn FnMut(js_sys::Array, web::ResizeObserver)>);
        match web::ResizeObserver::new(on_resize.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&self.inner.host);
                Some((observer, on_resize))
            }
            Err(_) => {
                log::warn!("[element] ResizeObserver unavailable; relying on window resize");
                None
            }
        }
    }

    fn add_listeners(&self) -> Vec<Listener> {
        let window: &web::EventTarget = self.inner.window.as_ref();
        let mut listeners = Vec::with_capacity(4);

        let resize_inner = self.inner.clone();
        listeners.extend(Listener::add(window, "resize", false, move |_| {
            let mut timers = resize_inner.timers.borrow_mut();
            resize_inner.lifecycle.borrow_mut().request_resize(&mut *timers);
        }));

        let scroll_inner = self.inner.clone();
        listeners.extend(Listener::add(window, "scroll", true, move |_| {
            let y = dom::scroll_y(&scroll_inner.window);
            scroll_inner.lifecycle.borrow_mut().scroll_to(y);
        }));

        let pointer_inner = self.inner.clone();
        listeners.extend(Listener::add(window, "mousemove", true, move |e| {
            if let Some(m) = e.dyn_ref::<web::MouseEvent>() {
                pointer_inner
                    .lifecycle
                    .borrow_mut()
                    .pointer_moved(m.client_x() as f64, m.client_y() as f64);
            }
        }));

        match dom::match_media(&self.inner.window, REDUCED_MOTION_QUERY) {
            Some(mql) => {
                let motion_inner = self.inner.clone();
                let query = mql.clone();
                listeners.extend(Listener::add(mql.as_ref(), "change", false, move |_| {
                    motion_inner
                        .lifecycle
                        .borrow_mut()
                        .set_reduced_motion(query.matches());
                }));
            }
            None => log::warn!("[element] matchMedia unavailable; reduced-motion changes ignored"),
        }
        listeners
    }
}

/// `<data-infrastructure-scene>`: the JS custom element forwards its
/// lifecycle callbacks here.
#[wasm_bindgen]
pub struct DataInfrastructureScene {
    element: SceneElement<InfrastructureScene>,
}

#[wasm_bindgen]
impl DataInfrastructureScene {
    #[wasm_bindgen(constructor)]
    pub fn new(host: web::HtmlElement) -> Result<DataInfrastructureScene, JsValue> {
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        Ok(Self {
            element: SceneElement::new(host, InfrastructureScene::new(seed))?,
        })
    }

    #[wasm_bindgen(js_name = connectedCallback)]
    pub fn connected_callback(&self) {
        self.element.connected();
    }

    #[wasm_bindgen(js_name = disconnectedCallback)]
    pub fn disconnected_callback(&self) {
        self.element.disconnected();
    }
}
