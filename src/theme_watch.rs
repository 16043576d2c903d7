// One document-wide theme watcher shared by every scene instance. The DOM
// observers exist only while at least one subscription is alive.

use crate::constants::{DARK_SCHEME_QUERY, THEME_OBSERVED_ATTRIBUTES};
use crate::core::theme::{SubscriptionId, Theme, ThemeContext};
use crate::dom;
use std::cell::RefCell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

struct Watchers {
    observer: Option<web::MutationObserver>,
    _on_mutation: Option<Closure<dyn FnMut(js_sys::Array, web::MutationObserver)>>,
    media: Option<(web::MediaQueryList, Closure<dyn FnMut(web::Event)>)>,
}

impl Watchers {
    fn install(window: &web::Window) -> Self {
        let mut watchers = Watchers {
            observer: None,
            _on_mutation: None,
            media: None,
        };

        let on_mutation = Closure::wrap(Box::new(move |_: js_sys::Array, _: web::MutationObserver| {
            republish();
        })
            as Box<dyn FnMut(js_sys::Array, web::MutationObserver)>);
        let root = window.document().and_then(|d| d.document_element());
        match (web::MutationObserver::new(on_mutation.as_ref().unchecked_ref()), root) {
            (Ok(observer), Some(root)) => {
                let init = web::MutationObserverInit::new();
                let filter: js_sys::Array = THEME_OBSERVED_ATTRIBUTES
                    .iter()
                    .map(|a| JsValue::from_str(a))
                    .collect();
                _ = js_sys::Reflect::set(&init, &"attributes".into(), &JsValue::TRUE);
                _ = js_sys::Reflect::set(&init, &"attributeFilter".into(), &filter);
                if observer.observe_with_options(&root, &init).is_ok() {
                    watchers.observer = Some(observer);
                    watchers._on_mutation = Some(on_mutation);
                } else {
                    log::warn!(
                        "[theme] MutationObserver.observe failed; attribute changes ignored"
                    );
                }
            }
            _ => log::warn!("[theme] MutationObserver unavailable; attribute changes ignored"),
        }

        match dom::match_media(window, DARK_SCHEME_QUERY) {
            Some(mql) => {
                let on_change = Closure::wrap(
                    Box::new(move |_: web::Event| republish()) as Box<dyn FnMut(web::Event)>
                );
                if mql
                    .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
                    .is_ok()
                {
                    watchers.media = Some((mql, on_change));
                }
            }
            None => log::warn!("[theme] matchMedia unavailable; OS theme changes ignored"),
        }
        watchers
    }

    fn disconnect(self) {
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
        if let Some((mql, on_change)) = &self.media {
            _ = mql
                .remove_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
        }
    }
}

struct Hub {
    context: ThemeContext,
    watchers: Option<Watchers>,
}

thread_local! {
    static HUB: RefCell<Hub> = RefCell::new(Hub {
        context: ThemeContext::new(Theme::default()),
        watchers: None,
    });
}

fn republish() {
    let Some(window) = web::window() else {
        return;
    };
    let signals = dom::theme_signals(&window);
    HUB.with(|hub| {
        if let Ok(mut hub) = hub.try_borrow_mut() {
            if let Some(theme) = hub.context.publish(&signals) {
                log::debug!("[theme] changed to {}", theme.as_str());
            }
        }
    });
}

/// Keeps a listener registered; dropping it unsubscribes, and the last drop
/// disconnects the document watchers.
pub struct ThemeSubscription {
    id: SubscriptionId,
}

impl Drop for ThemeSubscription {
    fn drop(&mut self) {
        let id = self.id;
        let watchers = HUB.with(|hub| {
            let mut hub = hub.try_borrow_mut().ok()?;
            hub.context.unsubscribe(id);
            if hub.context.subscriber_count() == 0 {
                hub.watchers.take()
            } else {
                None
            }
        });
        if let Some(watchers) = watchers {
            watchers.disconnect();
            log::debug!("[theme] watchers disconnected");
        }
    }
}

/// Subscribe to resolved theme changes. Returns the subscription and the
/// theme in effect right now. Listeners must not subscribe or unsubscribe
/// from inside the callback.
pub fn subscribe(listener: impl FnMut(Theme) + 'static) -> (ThemeSubscription, Theme) {
    let window = web::window();
    let signals = window.as_ref().map(dom::theme_signals).unwrap_or_default();
    HUB.with(|hub| {
        let mut hub = hub.borrow_mut();
        if hub.watchers.is_none() {
            if let Some(window) = window.as_ref() {
                hub.watchers = Some(Watchers::install(window));
            }
        }
        let (id, current) = hub.context.join(&signals, listener);
        (ThemeSubscription { id }, current)
    })
}

/// Re-read the document and notify subscribers if the theme changed. Used
/// after scripts change the theme attribute directly.
pub fn notify_document_changed() {
    republish();
}
