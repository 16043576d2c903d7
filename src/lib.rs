#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod constants;
mod core;
mod dom;
mod element;
mod render;
mod theme_toggle;
mod theme_watch;

pub use element::DataInfrastructureScene;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scroll-scenes starting");

    if let Err(e) = theme_toggle::init() {
        log::error!("theme init error: {:?}", e);
    }
    Ok(())
}

/// Persist and apply a theme preference (`auto`, `light` or `dark`) from
/// page scripts. Unrecognized values fall back to `auto`.
#[wasm_bindgen(js_name = applyThemePreference)]
pub fn apply_theme_preference(value: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let preference = crate::core::theme::ThemePreference::from_stored(Some(value));
    theme_toggle::store_preference(&window, preference);
    theme_toggle::apply_preference(&document, preference);
    Ok(())
}
