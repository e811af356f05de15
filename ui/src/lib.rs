pub mod app;
pub mod button;
pub mod chart;
pub mod install;
pub mod state;
pub mod theme;

pub use app::App;

#[cfg(target_arch = "wasm32")]
use leptos::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // Only fails if a logger is already installed.
    let _ = console_log::init_with_level(level);
    log_environment();
    leptos::mount_to_body(|| view! { <App/> });
}

#[cfg(target_arch = "wasm32")]
fn log_environment() {
    let Some(win) = web_sys::window() else {
        return;
    };
    let service_worker =
        js_sys::Reflect::has(&win.navigator(), &JsValue::from_str("serviceWorker")).unwrap_or(false);
    let protocol = win.location().protocol().unwrap_or_default();
    log::debug!("app starting; service worker support: {service_worker}; protocol: {protocol}");
}
