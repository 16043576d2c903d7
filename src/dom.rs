use crate::constants::{DARK_SCHEME_QUERY, DOM_READY_EVENT, REDUCED_MOTION_QUERY, SHADOW_MARKUP};
use crate::core::theme::{ThemeSignals, THEME_ATTRIBUTE};
use crate::core::viewport::{Environment, SurfaceSize, ViewportSize};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(element: &web::Element, mut handler: impl FnMut() + 'static) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Run `handler` once the document body is parsed, or right away if it
/// already is.
pub fn when_dom_ready(document: &web::Document, handler: impl FnOnce() + 'static) {
    if document.ready_state() != "loading" {
        handler();
        return;
    }
    let options = web::AddEventListenerOptions::new();
    options.set_once(true);
    let callback = wasm_bindgen::closure::Closure::once_into_js(handler);
    _ = document.add_event_listener_with_callback_and_add_event_listener_options(
        DOM_READY_EVENT,
        callback.unchecked_ref(),
        &options,
    );
}

pub fn window_size(window: &web::Window) -> (f64, f64) {
    let extent = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    (extent(window.inner_width()), extent(window.inner_height()))
}

pub fn host_size(host: &web::HtmlElement) -> (f64, f64) {
    (host.offset_width() as f64, host.offset_height() as f64)
}

pub fn scroll_y(window: &web::Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn match_media(window: &web::Window, query: &str) -> Option<web::MediaQueryList> {
    window.match_media(query).ok().flatten()
}

pub fn media_matches(window: &web::Window, query: &str) -> bool {
    match_media(window, query).is_some_and(|mql| mql.matches())
}

pub fn prefers_reduced_motion(window: &web::Window) -> bool {
    media_matches(window, REDUCED_MOTION_QUERY)
}

/// Measure everything the lifecycle needs from the host and the window.
pub fn measure_environment(window: &web::Window, host: &web::HtmlElement) -> Environment {
    let win = window_size(window);
    Environment {
        viewport: ViewportSize::from_host_or_window(host_size(host), win),
        window_width: win.0,
        device_pixel_ratio: window.device_pixel_ratio(),
        reduced_motion: prefers_reduced_motion(window),
    }
}

/// Snapshot of the root element's theme inputs and the OS preference.
pub fn theme_signals(window: &web::Window) -> ThemeSignals {
    let root = window.document().and_then(|d| d.document_element());
    let attribute = root.as_ref().and_then(|el| el.get_attribute(THEME_ATTRIBUTE));
    let classes = root.as_ref().map(|el| el.class_name()).unwrap_or_default();
    ThemeSignals::with_class_list(attribute, &classes, media_matches(window, DARK_SCHEME_QUERY))
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, size: SurfaceSize) {
    canvas.set_width(size.width.max(1));
    canvas.set_height(size.height.max(1));
}

/// Attach (or reuse) the host's open shadow root, write the fixed markup,
/// and return its canvas.
pub fn mount_canvas(host: &web::HtmlElement) -> anyhow::Result<web::HtmlCanvasElement> {
    let root = match host.shadow_root() {
        Some(root) => root,
        None => host
            .attach_shadow(&web::ShadowRootInit::new(web::ShadowRootMode::Open))
            .map_err(|e| anyhow::anyhow!(format!("attachShadow failed: {:?}", e)))?,
    };
    root.set_inner_html(SHADOW_MARKUP);
    let canvas = root
        .query_selector("canvas")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("missing shadow canvas"))?;
    canvas
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}
