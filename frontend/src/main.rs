//! Pagelift Main Entry Point

use std::cell::RefCell;
use std::sync::OnceLock;
use zoon::*;

/// Stores the bootstrap task handle to prevent it from being dropped.
static MAIN_TASK: OnceLock<TaskHandle> = OnceLock::new();

mod app;
mod behaviors;
mod config;
mod connection;
mod dataflow;
mod debug_api;
mod debug_utils;
mod lifecycle;
mod loading_indicator;
mod scroll_restoration;

thread_local! {
    /// The app owns every coordinator task; it must live as long as the page.
    static APP_INSTANCE: RefCell<Option<app::PageliftApp>> = const { RefCell::new(None) };
}

pub fn main() {
    // Deployed pages don't include the devserver's ReconnectingEventSource
    // helper. Provide a minimal shim so the transport can initialize.
    ensure_reconnecting_event_source();

    let handle = Task::start_droppable(async {
        lifecycle::dom_content_loaded().await;

        let app = app::PageliftApp::new().await;

        debug_api::store_socket_debug_state(app.connection.clone(), app.session_accepted.clone());
        debug_api::expose_socket_debug_api();

        APP_INSTANCE.with(|cell| {
            *cell.borrow_mut() = Some(app);
        });
    });
    let _ = MAIN_TASK.set(handle);
}

#[wasm_bindgen::prelude::wasm_bindgen(inline_js = r#"
export function ensure_reconnecting_event_source() {
  if (typeof window === 'undefined') return;
  if (typeof window.ReconnectingEventSource !== 'undefined') return;
  if (typeof window.EventSource !== 'undefined') {
    window.ReconnectingEventSource = window.EventSource;
    return;
  }
  // Fallback stub: won't stream events but prevents init crash.
  window.ReconnectingEventSource = function(url) {
    console.warn('ReconnectingEventSource stub: EventSource not available', url);
    this.url = url;
    this.close = function() {};
    this.addEventListener = function() {};
    this.removeEventListener = function() {};
    this.dispatchEvent = function() { return true; };
  };
}
"#)]
extern "C" {
    fn ensure_reconnecting_event_source();
}
