//! Navigation lifecycle event source
//!
//! The navigation library and the view layer announce themselves through
//! DOM events on `window`; this module is the only place that listens.
//! Each handler resolves whatever it needs from the DOM synchronously
//! (opt-in markers, the current scroll offset) and forwards a typed event
//! into the owning coordinator's relay. Listeners are installed once and
//! leaked for the page lifetime.

use crate::behaviors::BehaviorRegistry;
use crate::loading_indicator::LoadingIndicator;
use crate::scroll_restoration::{self, LinkActivation, ScrollRestoration};
use futures::channel::oneshot;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

pub const LINK_ACTIVATED_EVENT: &str = "turbo:click";
pub const PAGE_LOADED_EVENT: &str = "turbo:load";
pub const LOADING_STARTED_EVENT: &str = "phx:page-loading-start";
pub const LOADING_STOPPED_EVENT: &str = "phx:page-loading-stop";

/// Resolve once the document has finished parsing, so listeners and the
/// progress bar mount against a complete body. Resolves immediately when
/// the document is already interactive.
pub async fn dom_content_loaded() {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .expect("document unavailable at startup");

    if document.ready_state() != "loading" {
        return;
    }

    let (sender, receiver) = oneshot::channel::<()>();
    let mut sender = Some(sender);
    let loaded_closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        if let Some(sender) = sender.take() {
            let _ = sender.send(());
        }
    }) as Box<dyn FnMut(web_sys::Event)>);

    document
        .add_event_listener_with_callback(
            "DOMContentLoaded",
            loaded_closure.as_ref().unchecked_ref(),
        )
        .unwrap();
    loaded_closure.forget();

    let _ = receiver.await;
}

/// Wire the window-level lifecycle events into the coordinators.
pub fn install_window_listeners(
    scroll: &ScrollRestoration,
    indicator: &LoadingIndicator,
    behaviors: &BehaviorRegistry,
) {
    let window = web_sys::window().expect("window unavailable at startup");

    // Outgoing navigation: capability and offset are read in the same tick,
    // before the navigation library starts replacing the page.
    let link_activated_relay = scroll.link_activated_relay.clone();
    let click_closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let preserve_scroll = event
            .target()
            .map(|target| scroll_restoration::wants_scroll_preserved(&target))
            .unwrap_or(false);
        link_activated_relay.send(LinkActivation {
            preserve_scroll,
            scroll_top: scroll_restoration::current_scroll_top(),
        });
    }) as Box<dyn FnMut(web_sys::Event)>);
    window
        .add_event_listener_with_callback(
            LINK_ACTIVATED_EVENT,
            click_closure.as_ref().unchecked_ref(),
        )
        .unwrap();
    click_closure.forget();

    // Incoming navigation: restore scroll, re-attach behaviors to the
    // swapped body.
    let page_loaded_relay = scroll.page_loaded_relay.clone();
    let behaviors_page_loaded_relay = behaviors.page_loaded_relay.clone();
    let load_closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        page_loaded_relay.send(());
        behaviors_page_loaded_relay.send(());
    }) as Box<dyn FnMut(web_sys::Event)>);
    window
        .add_event_listener_with_callback(PAGE_LOADED_EVENT, load_closure.as_ref().unchecked_ref())
        .unwrap();
    load_closure.forget();

    let loading_started_relay = indicator.loading_started_relay.clone();
    let started_closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        loading_started_relay.send(());
    }) as Box<dyn FnMut(web_sys::Event)>);
    window
        .add_event_listener_with_callback(
            LOADING_STARTED_EVENT,
            started_closure.as_ref().unchecked_ref(),
        )
        .unwrap();
    started_closure.forget();

    let loading_stopped_relay = indicator.loading_stopped_relay.clone();
    let stopped_closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        loading_stopped_relay.send(());
    }) as Box<dyn FnMut(web_sys::Event)>);
    window
        .add_event_listener_with_callback(
            LOADING_STOPPED_EVENT,
            stopped_closure.as_ref().unchecked_ref(),
        )
        .unwrap();
    stopped_closure.forget();
}
