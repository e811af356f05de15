use js_sys::{Promise, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, EventTarget};

use crate::install::{DeferredInstall, InstallError, InstallOutcome};
use crate::subscription::Subscription;

/// Read a window global as text. Numbers and booleans are accepted in their
/// display form; anything else present under `key` is logged and skipped.
pub fn read_global(key: &str) -> Option<String> {
    let value = Reflect::get(&js_sys::global(), &JsValue::from_str(key)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    if let Some(text) = value.as_string() {
        return Some(text);
    }
    if let Some(n) = value.as_f64() {
        return Some(n.to_string());
    }
    if let Some(b) = value.as_bool() {
        return Some(b.to_string());
    }
    log::warn!("ignoring global {key}: not a string, number or boolean");
    None
}

/// Register `handler` for `event` on `target`; dropping the returned
/// subscription removes the listener and frees the closure.
pub fn listen(
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<Subscription, JsValue> {
    let cb = Closure::<dyn FnMut(Event)>::wrap(Box::new(handler));
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    let target = target.clone();
    Ok(Subscription::new(move || {
        let _ = target.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
        drop(cb);
    }))
}

#[wasm_bindgen]
extern "C" {
    /// Chromium's `BeforeInstallPromptEvent`; not in `web_sys`.
    #[wasm_bindgen(extends = Event)]
    pub type BeforeInstallPromptEvent;

    #[wasm_bindgen(method, catch, js_name = prompt)]
    fn show_prompt(this: &BeforeInstallPromptEvent) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method, getter, js_name = userChoice)]
    fn user_choice(this: &BeforeInstallPromptEvent) -> Promise;
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl DeferredInstall for BeforeInstallPromptEvent {
    async fn prompt(self) -> Result<InstallOutcome, InstallError> {
        let shown = self
            .show_prompt()
            .map_err(|e| InstallError::Prompt(describe(&e)))?;
        JsFuture::from(shown)
            .await
            .map_err(|e| InstallError::Prompt(describe(&e)))?;
        let choice = JsFuture::from(self.user_choice())
            .await
            .map_err(|e| InstallError::Choice(describe(&e)))?;
        let outcome = Reflect::get(&choice, &JsValue::from_str("outcome"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        outcome.parse()
    }
}

/// Listen for `beforeinstallprompt` on the window. The platform banner is
/// suppressed as soon as the event arrives, before `on_signal` runs.
pub fn listen_before_install(
    mut on_signal: impl FnMut(BeforeInstallPromptEvent) + 'static,
) -> Result<Subscription, JsValue> {
    let win = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    listen(&win, "beforeinstallprompt", move |ev: Event| {
        ev.prevent_default();
        log::debug!("install: beforeinstallprompt captured");
        on_signal(ev.unchecked_into::<BeforeInstallPromptEvent>());
    })
}
