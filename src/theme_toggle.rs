// Persisted light/dark/auto preference and the page's theme option buttons.

use crate::constants::{THEME_OPTION_ACTIVE_CLASS, THEME_OPTION_SELECTOR};
use crate::core::theme::{ThemePreference, THEME_ATTRIBUTE, THEME_STORAGE_KEY};
use crate::dom;
use crate::theme_watch;
use wasm_bindgen::JsCast;
use web_sys as web;

fn storage(window: &web::Window) -> Option<web::Storage> {
    window.local_storage().ok().flatten()
}

pub fn load_preference(window: &web::Window) -> ThemePreference {
    let stored = storage(window).and_then(|s| s.get_item(THEME_STORAGE_KEY).ok().flatten());
    ThemePreference::from_stored(stored.as_deref())
}

pub fn store_preference(window: &web::Window, preference: ThemePreference) {
    if let Some(storage) = storage(window) {
        _ = storage.set_item(THEME_STORAGE_KEY, preference.as_str());
    }
}

/// Reflect the preference on `<html data-theme>`; `Auto` removes the
/// attribute so the OS preference applies.
pub fn apply_preference(document: &web::Document, preference: ThemePreference) {
    if let Some(root) = document.document_element() {
        match preference.attribute_value() {
            Some(value) => {
                _ = root.set_attribute(THEME_ATTRIBUTE, value);
            }
            None => {
                _ = root.remove_attribute(THEME_ATTRIBUTE);
            }
        }
    }
    mark_active_option(document, preference);
    theme_watch::notify_document_changed();
}

fn theme_options(document: &web::Document) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(THEME_OPTION_SELECTOR) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect()
}

fn option_preference(option: &web::Element) -> Option<ThemePreference> {
    option
        .get_attribute(THEME_ATTRIBUTE)
        .and_then(|v| ThemePreference::parse(&v))
}

fn mark_active_option(document: &web::Document, preference: ThemePreference) {
    for option in theme_options(document) {
        let active = option_preference(&option) == Some(preference);
        _ = option
            .class_list()
            .toggle_with_force(THEME_OPTION_ACTIVE_CLASS, active);
    }
}

/// Apply the stored preference now and wire the option buttons once the
/// body is parsed. Pages without theme options still get the stored
/// preference applied.
pub fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let preference = load_preference(&window);
    apply_preference(&document, preference);

    let ready_document = document.clone();
    dom::when_dom_ready(&document, move || {
        wire_options(&window, &ready_document, preference)
    });
    Ok(())
}

fn wire_options(window: &web::Window, document: &web::Document, preference: ThemePreference) {
    let options = theme_options(document);
    if options.is_empty() {
        return;
    }
    // Buttons parsed after startup missed the first pass.
    mark_active_option(document, preference);
    for option in &options {
        let Some(choice) = option_preference(option) else {
            continue;
        };
        let window = window.clone();
        let document = document.clone();
        dom::add_click_listener(option, move || {
            store_preference(&window, choice);
            apply_preference(&document, choice);
        });
    }
    log::debug!(
        "[theme] {} options wired, preference={}",
        options.len(),
        preference.as_str()
    );
}
